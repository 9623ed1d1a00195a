pub mod analysis;
pub mod dataset;
pub mod operations;

pub use analysis::*;
pub use dataset::*;
pub use operations::*;
