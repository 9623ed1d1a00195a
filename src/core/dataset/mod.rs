mod collector;
mod dataset;

pub use collector::{collect_catalog, is_image_file};
pub use dataset::{ClassCatalog, DatasetSplit};
