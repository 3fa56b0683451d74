//! Server-side dataset file

use crate::error::Result;
use crate::storage::DatasetStore;
use crate::types::Dataset;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dataset read from a JSON file of the form `{"events": [...]}`
#[derive(Debug, Clone)]
pub struct JsonDatasetStore {
    path: PathBuf,
}

impl JsonDatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetStore for JsonDatasetStore {
    fn load(&self) -> Result<Option<Dataset>> {
        if !self.path.exists() {
            debug!("No dataset at {}", self.path.display());
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)?;
        let dataset: Dataset = serde_json::from_str(&text)?;
        debug!(
            "Loaded {} events from {}",
            dataset.len(),
            self.path.display()
        );
        Ok(Some(dataset))
    }
}
