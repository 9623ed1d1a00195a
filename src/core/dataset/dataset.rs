use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Val,
    Test,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Val => "val",
            DatasetSplit::Test => "test",
        }
    }

    pub fn all() -> [DatasetSplit; 3] {
        [DatasetSplit::Train, DatasetSplit::Val, DatasetSplit::Test]
    }
}

/// In-memory mapping from class name to every image path known for that class.
///
/// Classes are kept in name order, which fixes the order the splitter visits
/// them in and therefore how the shared random sequence is consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassCatalog {
    classes: BTreeMap<String, Vec<PathBuf>>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `class_name` has an entry, even if no image is ever added to it.
    #[cfg(test)]
    pub fn ensure_class(&mut self, class_name: &str) {
        if !self.classes.contains_key(class_name) {
            self.classes.insert(class_name.to_string(), Vec::new());
        }
    }

    /// Append images to a class, creating the entry if absent
    pub fn extend_class<I>(&mut self, class_name: &str, images: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.classes
            .entry(class_name.to_string())
            .or_default()
            .extend(images);
    }

    /// Sort every class's image list by path
    pub fn sort_images(&mut self) {
        for images in self.classes.values_mut() {
            images.sort();
        }
    }

    #[cfg(test)]
    pub fn get(&self, class_name: &str) -> Option<&Vec<PathBuf>> {
        self.classes.get(class_name)
    }

    #[cfg(test)]
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(|name| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.classes
            .iter()
            .map(|(name, images)| (name.as_str(), images.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Number of images across all classes
    pub fn total_images(&self) -> usize {
        self.classes.values().map(|images| images.len()).sum()
    }
}

impl IntoIterator for ClassCatalog {
    type Item = (String, Vec<PathBuf>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<PathBuf>>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_names() {
        let names: Vec<&str> = DatasetSplit::all().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["train", "val", "test"]);
    }

    #[test]
    fn test_extend_aggregates_across_calls() {
        let mut catalog = ClassCatalog::new();
        catalog.extend_class("Jute_Aphid", vec![PathBuf::from("train/Jute_Aphid/a.jpg")]);
        catalog.extend_class("Jute_Aphid", vec![PathBuf::from("val/Jute_Aphid/b.jpg")]);
        catalog.extend_class("Field_Cricket", vec![PathBuf::from("test/Field_Cricket/c.png")]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_images(), 3);
        assert_eq!(catalog.get("Jute_Aphid").map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_classes_iterate_in_name_order() {
        let mut catalog = ClassCatalog::new();
        catalog.ensure_class("Yellow_Mite");
        catalog.ensure_class("Beet_Armyworm");
        catalog.ensure_class("Jute_Hairy");

        let names: Vec<&str> = catalog.class_names().collect();
        assert_eq!(names, vec!["Beet_Armyworm", "Jute_Hairy", "Yellow_Mite"]);
    }

    #[test]
    fn test_ensure_class_keeps_existing_images() {
        let mut catalog = ClassCatalog::new();
        catalog.extend_class("Termite", vec![PathBuf::from("x.jpg")]);
        catalog.ensure_class("Termite");
        assert_eq!(catalog.get("Termite").map(|v| v.len()), Some(1));
        assert!(!catalog.is_empty());
    }
}
