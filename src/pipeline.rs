//! Top-level driver: collect, split, copy, summarize.

use rand::Rng;
use tracing::{error, info, info_span};

use crate::config::{ConfigError, SplitConfig};
use crate::core::analysis::{split_catalog, SplitSummary};
use crate::core::dataset::{collect_catalog, DatasetSplit};
use crate::core::operations::{ensure_dir, materialize, FileOpError};

/// Result type for a split run
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors that abort a split run
#[derive(Debug)]
pub enum SplitError {
    Config(ConfigError),
    Collect(FileOpError),
    Copy(FileOpError),
    Summary(FileOpError),
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::Config(e) => write!(f, "Invalid configuration: {}", e),
            SplitError::Collect(e) => write!(f, "Collecting images failed: {}", e),
            SplitError::Copy(e) => write!(f, "Copying images failed: {}", e),
            SplitError::Summary(e) => write!(f, "Writing split summary failed: {}", e),
        }
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SplitError::Config(e) => Some(e),
            SplitError::Collect(e) | SplitError::Copy(e) | SplitError::Summary(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SplitError {
    fn from(error: ConfigError) -> Self {
        SplitError::Config(error)
    }
}

/// How a run ended when nothing went wrong
#[derive(Debug)]
pub enum RunOutcome {
    /// Every class was split and copied
    Completed(SplitSummary),
    /// No class folder was found in any source directory; nothing was written
    NoImages,
}

/// Redistribute the dataset described by `config` into new train/val/test folders.
///
/// `rng` is used for every class in name order; pass a seeded generator for a
/// reproducible split.
pub fn run_split<R: Rng + ?Sized>(config: &SplitConfig, rng: &mut R) -> SplitResult<RunOutcome> {
    config.validate()?;

    let catalog = {
        let _span = info_span!("collect").entered();
        collect_catalog(&config.source_dirs(), &config.image_extensions)
            .map_err(SplitError::Collect)?
    };

    if catalog.is_empty() {
        error!("No images found in the specified directories!");
        return Ok(RunOutcome::NoImages);
    }

    info!("Found {} classes:", catalog.len());
    for (class_name, images) in catalog.iter() {
        info!("  {}: {} images", class_name, images.len());
    }

    let splits = {
        let _span = info_span!("split").entered();
        split_catalog(catalog, &config.ratios, rng)
    };

    let stats = {
        let _span = info_span!("materialize").entered();
        for split in DatasetSplit::all() {
            ensure_dir(&config.destination_dir(split)).map_err(SplitError::Copy)?;
        }
        materialize(&splits, config).map_err(SplitError::Copy)?
    };

    let summary = SplitSummary::new(&splits, &stats, config);
    summary
        .write_to(&config.summary_path())
        .map_err(SplitError::Summary)?;

    info!("Dataset split completed successfully!");
    Ok(RunOutcome::Completed(summary))
}

/// Process exit status for a finished run: 0 for any `Ok` outcome, 1 otherwise.
/// A fatal error is logged here, once.
pub fn exit_status(result: &SplitResult<RunOutcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
