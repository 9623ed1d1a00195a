use std::fs::{self, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{error, trace};

/// Result type for file operations
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Error types for file operations
#[derive(Debug)]
pub enum FileOpError {
    ReadDirFailed(String),
    CreateDirFailed(String),
    CopyFailed(String),
    MetadataFailed(String),
    InvalidFileName(PathBuf),
    InvalidClassName(PathBuf),
    IoError(std::io::Error),
}

impl std::fmt::Display for FileOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOpError::ReadDirFailed(msg) => write!(f, "Read directory failed: {}", msg),
            FileOpError::CreateDirFailed(msg) => write!(f, "Create directory failed: {}", msg),
            FileOpError::CopyFailed(msg) => write!(f, "Copy failed: {}", msg),
            FileOpError::MetadataFailed(msg) => write!(f, "Metadata update failed: {}", msg),
            FileOpError::InvalidFileName(path) => write!(f, "Path has no file name: {:?}", path),
            FileOpError::InvalidClassName(path) => {
                write!(f, "Class folder name is not valid UTF-8: {:?}", path)
            }
            FileOpError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FileOpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileOpError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FileOpError {
    fn from(error: std::io::Error) -> Self {
        FileOpError::IoError(error)
    }
}

/// Create a directory and all missing parents. Existing directories are reused.
pub fn ensure_dir(dir: &Path) -> FileOpResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        error!("Failed to create directory {:?}: {}", dir, e);
        FileOpError::CreateDirFailed(format!("Failed to create {:?}: {}", dir, e))
    })
}

/// Copy a file to `dest`, keeping its permissions and its access and
/// modification times. An existing file at `dest` is overwritten.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path
///
/// # Returns
/// * `Ok(bytes_copied)` if successful
/// * `Err(FileOpError)` if the copy or the timestamp update failed
pub fn copy_with_metadata(src: &Path, dest: &Path) -> FileOpResult<u64> {
    trace!("Copying file from {:?} to {:?}", src, dest);

    // fs::copy carries the permission bits over
    let bytes = fs::copy(src, dest).map_err(|e| {
        error!("Failed to copy file from {:?} to {:?}: {}", src, dest, e);
        FileOpError::CopyFailed(format!(
            "Failed to copy from {:?} to {:?}: {}",
            src, dest, e
        ))
    })?;

    copy_timestamps(src, dest)?;

    Ok(bytes)
}

fn copy_timestamps(src: &Path, dest: &Path) -> FileOpResult<()> {
    let metadata_failed = |e: std::io::Error| {
        error!("Failed to copy timestamps from {:?} to {:?}: {}", src, dest, e);
        FileOpError::MetadataFailed(format!("{:?}: {}", dest, e))
    };

    let metadata = fs::metadata(src).map_err(metadata_failed)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed().map_err(metadata_failed)?)
        .set_modified(metadata.modified().map_err(metadata_failed)?);

    // Windows needs write access to change times on a handle
    let file = OpenOptions::new()
        .write(true)
        .open(dest)
        .map_err(metadata_failed)?;
    file.set_times(times).map_err(metadata_failed)
}

/// Destination path for `src` inside `dest_dir`, keeping the original file name.
pub fn destination_path(src: &Path, dest_dir: &Path) -> FileOpResult<PathBuf> {
    src.file_name()
        .map(|name| dest_dir.join(name))
        .ok_or_else(|| FileOpError::InvalidFileName(src.to_path_buf()))
}
