//! Redistribute the Jute Pest image dataset into a stratified 70/15/15
//! train/val/test split.

pub mod config;
pub mod core;
pub mod logging;
pub mod pipeline;

pub use pipeline::{exit_status, run_split, RunOutcome, SplitError, SplitResult};
