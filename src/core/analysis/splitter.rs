//! Stratified train/val/test splitting.
//!
//! Each class is shuffled and sliced on its own, so every new split keeps the
//! per-class proportions of the whole dataset. One generator is shared by all
//! classes: a fixed seed reproduces the same split as long as the catalog and
//! its class order are unchanged.

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

use crate::config::SplitRatios;
use crate::core::dataset::{ClassCatalog, DatasetSplit};

/// Slice sizes for one class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitSizes {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl SplitSizes {
    /// Compute slice sizes for a class of `total` images.
    ///
    /// Train and val are floored; test takes whatever is left, so the three
    /// always add up to `total`.
    pub fn for_total(total: usize, ratios: &SplitRatios) -> Self {
        let train = ((total as f64 * ratios.train).floor() as usize).min(total);
        let val = ((total as f64 * ratios.val).floor() as usize).min(total - train);
        Self {
            train,
            val,
            test: total - train - val,
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }
}

/// The three disjoint image lists produced for one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSplit {
    pub class_name: String,
    pub train: Vec<PathBuf>,
    pub val: Vec<PathBuf>,
    pub test: Vec<PathBuf>,
}

impl ClassSplit {
    pub fn get(&self, split: DatasetSplit) -> &[PathBuf] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Val => &self.val,
            DatasetSplit::Test => &self.test,
        }
    }

    pub fn sizes(&self) -> SplitSizes {
        SplitSizes {
            train: self.train.len(),
            val: self.val.len(),
            test: self.test.len(),
        }
    }
}

/// Shuffle one class's images and cut them into train/val/test slices.
pub fn split_class<R: Rng + ?Sized>(
    class_name: &str,
    mut images: Vec<PathBuf>,
    ratios: &SplitRatios,
    rng: &mut R,
) -> ClassSplit {
    images.shuffle(rng);

    let sizes = SplitSizes::for_total(images.len(), ratios);
    let test = images.split_off(sizes.train + sizes.val);
    let val = images.split_off(sizes.train);
    let train = images;

    info!(
        "Split class {}: train={}, val={}, test={}",
        class_name,
        train.len(),
        val.len(),
        test.len()
    );

    ClassSplit {
        class_name: class_name.to_string(),
        train,
        val,
        test,
    }
}

/// Split every class of the catalog, visiting classes in catalog order with a
/// single shared generator.
pub fn split_catalog<R: Rng + ?Sized>(
    catalog: ClassCatalog,
    ratios: &SplitRatios,
    rng: &mut R,
) -> Vec<ClassSplit> {
    info!(
        "Splitting {} classes with ratio {:.0}-{:.0}-{:.0}",
        catalog.len(),
        ratios.train * 100.0,
        ratios.val * 100.0,
        ratios.test * 100.0
    );

    catalog
        .into_iter()
        .map(|(class_name, images)| split_class(&class_name, images, ratios, &mut *rng))
        .collect()
}
