//! Storage layer for notify-rank
//!
//! The scoring core never touches files or databases. Everything it needs
//! from the outside world comes through the traits defined here:
//!
//! - [`WeightStore`]: the trained model, absent until the first training run
//! - [`DatasetStore`]: the server-side event dataset
//! - [`SettingsStore`]: per-domain notification preferences
//!
//! None of the stores serialize concurrent writers; callers that train
//! concurrently must coordinate (the HTTP server holds a training lock).

pub mod dataset;
pub mod settings;
pub mod weights;

use crate::error::Result;
use crate::types::{Dataset, WeightVector};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use dataset::JsonDatasetStore;
pub use settings::{DomainSettings, SqliteSettingsStore};
pub use weights::{JsonWeightStore, MemoryWeightStore};

/// A persisted model with optional training metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredModel {
    pub weights: WeightVector,
    pub n_samples: Option<usize>,
    pub trained_at: Option<DateTime<Utc>>,
}

impl StoredModel {
    pub fn new(weights: WeightVector) -> Self {
        Self {
            weights,
            n_samples: None,
            trained_at: None,
        }
    }
}

/// Persistence for the trained weight vector
pub trait WeightStore: Send + Sync {
    /// Load the current model; `Ok(None)` when none has been trained
    fn load(&self) -> Result<Option<StoredModel>>;

    /// Replace the current model wholesale
    fn save(&self, model: &StoredModel) -> Result<()>;

    /// Remove the model; returns whether one existed
    fn delete(&self) -> Result<bool>;
}

/// Source of the server-side dataset
pub trait DatasetStore: Send + Sync {
    /// Load the dataset; `Ok(None)` when none is present
    fn load(&self) -> Result<Option<Dataset>>;
}

/// Per-domain notification settings
pub trait SettingsStore: Send + Sync {
    fn get(&self, domain: &str) -> Result<Option<DomainSettings>>;

    fn upsert(&self, domain: &str, settings: &DomainSettings) -> Result<()>;

    /// Remove every stored entry; returns how many were removed
    fn clear(&self) -> Result<usize>;
}
