use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::{SplitConfig, SplitRatios};
use crate::core::operations::{FileOpResult, MaterializeStats};

use super::ClassSplit;

/// Image counts for one class after splitting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub total: usize,
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

/// Record of a completed run, written next to the new splits
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub created_at: String,
    pub seed: u64,
    pub ratios: SplitRatios,
    pub classes: Vec<ClassSummary>,
    pub total_images: usize,
    pub total_train: usize,
    pub total_val: usize,
    pub total_test: usize,
    pub files_copied: usize,
    pub name_collisions: usize,
}

impl SplitSummary {
    pub fn new(splits: &[ClassSplit], stats: &MaterializeStats, config: &SplitConfig) -> Self {
        let classes: Vec<ClassSummary> = splits
            .iter()
            .map(|split| {
                let sizes = split.sizes();
                ClassSummary {
                    name: split.class_name.clone(),
                    total: sizes.total(),
                    train: sizes.train,
                    val: sizes.val,
                    test: sizes.test,
                }
            })
            .collect();

        Self {
            created_at: chrono::Local::now().to_rfc3339(),
            seed: config.seed,
            ratios: config.ratios,
            total_images: classes.iter().map(|c| c.total).sum(),
            total_train: classes.iter().map(|c| c.train).sum(),
            total_val: classes.iter().map(|c| c.val).sum(),
            total_test: classes.iter().map(|c| c.test).sum(),
            classes,
            files_copied: stats.files_copied,
            name_collisions: stats.name_collisions,
        }
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> FileOpResult<()> {
        let json = serde_json::to_vec_pretty(self).map_err(std::io::Error::from)?;
        fs::write(path, json)?;
        info!("Split summary written to: {:?}", path);
        Ok(())
    }

    /// Human-readable per-class table for the console
    pub fn render_table(&self) -> String {
        let width = self
            .classes
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("Class".len());

        let mut out = format!(
            "{:<width$}  {:>6}  {:>6}  {:>6}  {:>6}\n",
            "Class",
            "Total",
            "Train",
            "Val",
            "Test",
            width = width
        );
        for c in &self.classes {
            out.push_str(&format!(
                "{:<width$}  {:>6}  {:>6}  {:>6}  {:>6}\n",
                c.name,
                c.total,
                c.train,
                c.val,
                c.test,
                width = width
            ));
        }
        out.push_str(&format!(
            "{:<width$}  {:>6}  {:>6}  {:>6}  {:>6}\n",
            "All",
            self.total_images,
            self.total_train,
            self.total_val,
            self.total_test,
            width = width
        ));
        out
    }
}
