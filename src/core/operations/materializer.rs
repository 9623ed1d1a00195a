use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::SplitConfig;
use crate::core::analysis::ClassSplit;
use crate::core::dataset::DatasetSplit;

use super::{copy_with_metadata, destination_path, ensure_dir, FileOpResult};

/// Totals gathered while copying the split dataset to disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub files_copied: usize,
    pub bytes_copied: u64,
    /// Copies that replaced a file written earlier in the same run
    pub name_collisions: usize,
}

/// Copy every class split into `<output_root>/<split>/<class>/<file name>`.
///
/// Class directories are created for all three splits, even when a slice is
/// empty. Originals are never touched. The first I/O error aborts the copy;
/// files already written stay on disk.
pub fn materialize(splits: &[ClassSplit], config: &SplitConfig) -> FileOpResult<MaterializeStats> {
    let mut stats = MaterializeStats::default();

    for class_split in splits {
        for split in DatasetSplit::all() {
            let class_dir = config
                .destination_dir(split)
                .join(&class_split.class_name);
            copy_slice(class_split.get(split), &class_dir, &mut stats)?;
        }
    }

    info!(
        "Copied {} files ({} bytes), {} name collisions",
        stats.files_copied, stats.bytes_copied, stats.name_collisions
    );

    Ok(stats)
}

fn copy_slice(
    images: &[PathBuf],
    class_dir: &Path,
    stats: &mut MaterializeStats,
) -> FileOpResult<()> {
    ensure_dir(class_dir)?;

    let mut written: HashSet<OsString> = HashSet::with_capacity(images.len());
    for image in images {
        let target = destination_path(image, class_dir)?;

        if let Some(name) = target.file_name() {
            if !written.insert(name.to_os_string()) {
                warn!(
                    "{:?} overwrites a file with the same name in {:?}",
                    image, class_dir
                );
                stats.name_collisions += 1;
            }
        }

        stats.bytes_copied += copy_with_metadata(image, &target)?;
        stats.files_copied += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_image(path: &Path, contents: &[u8]) -> PathBuf {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        path.to_path_buf()
    }

    fn count_files(dir: &Path) -> usize {
        fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[test]
    fn test_copies_each_slice_into_its_split() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let config = SplitConfig::with_roots(&src, dir.path().join("out"));

        let split = ClassSplit {
            class_name: "Jute_Hairy".to_string(),
            train: vec![
                write_image(&src.join("train/Jute_Hairy/a.jpg"), b"a"),
                write_image(&src.join("train/Jute_Hairy/b.jpg"), b"bb"),
            ],
            val: vec![write_image(&src.join("val/Jute_Hairy/c.jpg"), b"ccc")],
            test: vec![],
        };

        let stats = materialize(&[split], &config).unwrap();

        assert_eq!(stats.files_copied, 3);
        assert_eq!(stats.bytes_copied, 6);
        assert_eq!(stats.name_collisions, 0);
        let out = |s: DatasetSplit| config.destination_dir(s).join("Jute_Hairy");
        assert_eq!(count_files(&out(DatasetSplit::Train)), 2);
        assert_eq!(fs::read(out(DatasetSplit::Val).join("c.jpg")).unwrap(), b"ccc");
        // Empty slice still gets its class directory
        assert!(out(DatasetSplit::Test).is_dir());
        assert_eq!(count_files(&out(DatasetSplit::Test)), 0);
        // Originals are left in place
        assert!(src.join("train/Jute_Hairy/a.jpg").exists());
    }

    #[test]
    fn test_same_basename_overwrites_and_is_counted() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let config = SplitConfig::with_roots(&src, dir.path().join("out"));

        let split = ClassSplit {
            class_name: "Termite".to_string(),
            train: vec![
                write_image(&src.join("train/Termite/img1.jpg"), b"first"),
                write_image(&src.join("val/Termite/img1.jpg"), b"second"),
            ],
            val: vec![],
            test: vec![],
        };

        let stats = materialize(&[split], &config).unwrap();

        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.name_collisions, 1);
        let dest = config.destination_dir(DatasetSplit::Train).join("Termite");
        assert_eq!(count_files(&dest), 1);
        assert_eq!(fs::read(dest.join("img1.jpg")).unwrap(), b"second");
    }

    #[test]
    fn test_missing_source_aborts() {
        let dir = tempdir().unwrap();
        let config = SplitConfig::with_roots(dir.path().join("src"), dir.path().join("out"));

        let split = ClassSplit {
            class_name: "Cutworm".to_string(),
            train: vec![dir.path().join("src/train/Cutworm/vanished.jpg")],
            val: vec![],
            test: vec![],
        };

        assert!(materialize(&[split], &config).is_err());
    }

    #[test]
    fn test_rerun_reuses_existing_directories() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let config = SplitConfig::with_roots(&src, dir.path().join("out"));

        let split = ClassSplit {
            class_name: "Pod_Borer".to_string(),
            train: vec![write_image(&src.join("train/Pod_Borer/p.png"), b"p")],
            val: vec![],
            test: vec![],
        };

        materialize(std::slice::from_ref(&split), &config).unwrap();
        let stats = materialize(&[split], &config).unwrap();

        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.name_collisions, 0);
    }
}
