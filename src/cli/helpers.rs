//! Shared helpers for CLI handlers

use notify_rank::{
    error::{RankError, Result},
    Dataset, DatasetStore, JsonDatasetStore, JsonWeightStore, PriorityEngine, RankConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Load the dataset from an explicit path or the configured location
pub fn load_dataset(config: &RankConfig, path: Option<PathBuf>) -> Result<Dataset> {
    let path = path.unwrap_or_else(|| config.storage.dataset_path());
    debug!("Reading dataset from {}", path.display());

    JsonDatasetStore::new(&path)
        .load()?
        .ok_or_else(|| RankError::DatasetNotFound(path.display().to_string()))
}

/// Engine over the configured model file
pub fn build_engine(config: &RankConfig) -> Result<PriorityEngine> {
    let store = Arc::new(JsonWeightStore::new(config.storage.model_path()));
    PriorityEngine::new(store)
        .with_trainer_config(config.training.clone())
        .with_blend_alpha(config.blend.alpha)
}

/// Human-readable domain label; the missing-domain group prints as `(none)`
pub fn domain_label(domain: &Option<String>) -> &str {
    domain.as_deref().unwrap_or("(none)")
}
