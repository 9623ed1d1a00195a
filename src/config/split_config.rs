use serde::Serialize;
use std::path::PathBuf;

use crate::core::dataset::DatasetSplit;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error types for an invalid split configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A single ratio is negative, above one, or not a finite number
    InvalidRatio { split: DatasetSplit, value: f64 },
    /// The three ratios do not add up to one
    RatioSum(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidRatio { split, value } => write!(
                f,
                "Invalid {} ratio {}: must be a finite value between 0 and 1",
                split.as_str(),
                value
            ),
            ConfigError::RatioSum(sum) => {
                write!(f, "Split ratios must sum to 1.0, got {}", sum)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Allowed deviation of the ratio sum from exactly 1.0
const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Target ratios for train/val/test split distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitRatios {
    pub train: f64, // 0.70 for 70%
    pub val: f64,   // 0.15 for 15%
    pub test: f64,  // 0.15 for 15%
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.70,
            val: 0.15,
            test: 0.15,
        }
    }
}

impl SplitRatios {
    /// Get the target ratio for a specific split
    pub fn get(&self, split: DatasetSplit) -> f64 {
        match split {
            DatasetSplit::Train => self.train,
            DatasetSplit::Val => self.val,
            DatasetSplit::Test => self.test,
        }
    }

    /// Check that every ratio lies in `[0, 1]` and that together they cover the whole class.
    pub fn validate(&self) -> ConfigResult<()> {
        for split in DatasetSplit::all() {
            let value = self.get(split);
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidRatio { split, value });
            }
        }

        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(ConfigError::RatioSum(sum));
        }

        Ok(())
    }
}

/// Run configuration containing all fixed paths and constants
///
/// `Default` is the configuration used by the binary; there is no file or flag
/// to override it.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Root of the original dataset, holding one folder per split
    pub source_root: PathBuf,
    /// Root the redistributed dataset is written to
    pub output_root: PathBuf,
    pub ratios: SplitRatios,
    /// Seed for the single generator shared by every class
    pub seed: u64,
    /// Lowercase image extensions picked up by the collector
    pub image_extensions: Vec<&'static str>,
    /// File name of the JSON run summary, written under `output_root`
    pub summary_file_name: &'static str,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("Jute_Pest_Dataset"),
            output_root: PathBuf::from("Jute_Pest_Dataset_Split"),
            ratios: SplitRatios::default(),
            seed: 42,
            image_extensions: vec!["png", "jpg", "jpeg", "bmp", "gif"],
            summary_file_name: "split_summary.json",
        }
    }
}

impl SplitConfig {
    /// Build a configuration reading from `source_root` and writing to `output_root`,
    /// keeping every other default.
    pub fn with_roots(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Original split folders, in train/val/test order
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        DatasetSplit::all()
            .into_iter()
            .map(|split| self.source_root.join(split.as_str()))
            .collect()
    }

    /// Destination root for one of the new splits
    pub fn destination_dir(&self, split: DatasetSplit) -> PathBuf {
        self.output_root.join(split.as_str())
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_root.join(self.summary_file_name)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.ratios.validate()
    }
}
