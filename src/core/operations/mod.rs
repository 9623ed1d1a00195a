mod file_ops;
mod materializer;

pub use file_ops::{
    copy_with_metadata, destination_path, ensure_dir, FileOpError, FileOpResult,
};
pub use materializer::{materialize, MaterializeStats};
