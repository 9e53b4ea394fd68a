//! Immutable, process-wide dataset context.

use std::path::Path;

use super::frame::Frame;
use super::loader::{DatasetLoader, LoaderConfig};
use super::source::DatasetSource;
use crate::error::Result;
use crate::intent::IntentExtractor;

/// The loaded dataset plus everything derived from it once at startup.
///
/// Never mutated after construction; share it behind an `Arc` and call
/// [`snapshot`](Self::snapshot) for a private per-request copy.
#[derive(Debug, Clone)]
pub struct DatasetContext {
    dataset: Frame,
    locations: Vec<String>,
    extractor: IntentExtractor,
    source: Option<DatasetSource>,
}

impl DatasetContext {
    /// Build a context from an in-memory frame.
    pub fn new(dataset: Frame) -> Result<Self> {
        let locations = dataset.locations();
        let extractor = IntentExtractor::new(&locations)?;
        Ok(Self {
            dataset,
            locations,
            extractor,
            source: None,
        })
    }

    /// Load a dataset file and build its context.
    pub fn from_file(path: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        let (frame, source) = DatasetLoader::with_config(config).load_file(path)?;
        let mut context = Self::new(frame)?;
        context.source = Some(source);
        Ok(context)
    }

    /// Rebind the extractor to a region name.
    pub fn with_region(mut self, region: &str) -> Self {
        self.extractor = self.extractor.with_region(region);
        self
    }

    /// A fresh, fully independent copy of the dataset.
    pub fn snapshot(&self) -> Frame {
        self.dataset.clone()
    }

    /// Read-only view of the dataset.
    pub fn dataset(&self) -> &Frame {
        &self.dataset
    }

    /// Distinct known location names, sorted, case preserved.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Extractor bound to this dataset's location list.
    pub fn extractor(&self) -> &IntentExtractor {
        &self.extractor
    }

    /// Metadata of the file the dataset came from, if loaded from disk.
    pub fn source(&self) -> Option<&DatasetSource> {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    #[test]
    fn test_context_lists_sorted_locations() {
        let frame = Frame::new(
            vec!["total units".to_string()],
            vec![
                Record::new("Wakad", 2020, vec![Some(1.0)]),
                Record::new("Aundh", 2020, vec![Some(2.0)]),
                Record::new("Wakad", 2021, vec![Some(3.0)]),
            ],
        );
        let context = DatasetContext::new(frame).unwrap();

        assert_eq!(context.locations(), &["Aundh", "Wakad"]);
        assert_eq!(
            context.extractor().matcher().names().collect::<Vec<_>>(),
            vec!["Aundh", "Wakad"]
        );
        assert!(context.source().is_none());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let frame = Frame::new(vec![], vec![Record::new("Wakad", 2020, vec![])]);
        let context = DatasetContext::new(frame).unwrap();

        let mut copy = context.snapshot().into_records();
        copy.clear();
        assert_eq!(context.dataset().len(), 1);
    }
}
