use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::operations::{FileOpError, FileOpResult};

use super::ClassCatalog;

/// Whether the file name of `path` ends with `.<ext>` for one of the allowed
/// extensions (case-insensitive). A bare `.png` counts as an image.
pub fn is_image_file(path: &Path, extensions: &[&str]) -> bool {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy().to_lowercase();
            extensions
                .iter()
                .any(|allowed| name.ends_with(&format!(".{}", allowed)))
        }
        None => false,
    }
}

/// Collect all images from the given split folders, grouped by class folder name.
///
/// Each source directory is expected to hold one sub-folder per class. Missing
/// source directories are skipped with a warning; any other I/O failure aborts
/// the collection. Image lists are sorted by path once everything is gathered.
///
/// # Arguments
/// * `source_dirs` - Original split folders (e.g. `train`, `val`, `test`)
/// * `extensions` - Lowercase image extensions to pick up
///
/// # Returns
/// * `Ok(ClassCatalog)` possibly empty when no class folder was found
/// * `Err(FileOpError)` if an existing directory could not be listed
pub fn collect_catalog(source_dirs: &[PathBuf], extensions: &[&str]) -> FileOpResult<ClassCatalog> {
    let mut catalog = ClassCatalog::new();

    for base_dir in source_dirs {
        if !base_dir.exists() {
            warn!("{:?} does not exist, skipping...", base_dir);
            continue;
        }

        info!("Reading class folders from: {:?}", base_dir);
        for class_dir in list_class_dirs(base_dir)? {
            // Class names become destination folder names, so they must round-trip
            let class_name = match class_dir.file_name().map(|name| name.to_str()) {
                Some(Some(name)) => name.to_string(),
                Some(None) => return Err(FileOpError::InvalidClassName(class_dir.clone())),
                None => continue,
            };

            let images = list_images(&class_dir, extensions)?;
            debug!("Found {} images in {:?}", images.len(), class_dir);

            catalog.extend_class(&class_name, images);
        }
    }

    catalog.sort_images();

    info!(
        "Collected {} images across {} classes",
        catalog.total_images(),
        catalog.len()
    );

    Ok(catalog)
}

fn list_class_dirs(base_dir: &Path) -> FileOpResult<Vec<PathBuf>> {
    let entries = fs::read_dir(base_dir).map_err(|e| read_dir_failed(base_dir, e))?;

    let mut class_dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| read_dir_failed(base_dir, e))?.path();
        if path.is_dir() {
            class_dirs.push(path);
        }
    }

    Ok(class_dirs)
}

fn list_images(class_dir: &Path, extensions: &[&str]) -> FileOpResult<Vec<PathBuf>> {
    let entries = fs::read_dir(class_dir).map_err(|e| read_dir_failed(class_dir, e))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| read_dir_failed(class_dir, e))?.path();
        if path.is_file() && is_image_file(&path, extensions) {
            images.push(path);
        }
    }

    Ok(images)
}

fn read_dir_failed(dir: &Path, e: std::io::Error) -> FileOpError {
    FileOpError::ReadDirFailed(format!("Failed to list {:?}: {}", dir, e))
}
