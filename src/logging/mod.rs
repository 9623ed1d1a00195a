//! Logging for the dataset split tool
//!
//! - Bracketed event formatting
//! - Dual output (log file + stdout)
//! - One timestamped log file per run

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
