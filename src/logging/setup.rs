use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "debug";

/// Install the global subscriber: stdout plus a timestamped file under `log_dir`.
///
/// Returns the path of the log file for this run.
pub fn setup_logging(log_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("dataset_split_{}.log", timestamp));

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    let file_layer = fmt::layer()
        .event_format(BracketedFormatter::detailed())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter::compact())
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    info!("Log file created at: {:?}", log_path);

    Ok(log_path)
}
