mod splitter;
mod summary;

pub use splitter::{split_catalog, split_class, ClassSplit, SplitSizes};
pub use summary::{ClassSummary, SplitSummary};
