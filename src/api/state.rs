//! Shared handler state

use crate::config::RankConfig;
use crate::engine::PriorityEngine;
use crate::error::Result;
use crate::storage::{
    DatasetStore, JsonDatasetStore, JsonWeightStore, SettingsStore, SqliteSettingsStore,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PriorityEngine>,
    pub datasets: Arc<dyn DatasetStore>,
    pub settings: Arc<dyn SettingsStore>,
    /// Serializes training runs so concurrent writers never race on the model
    pub train_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        engine: PriorityEngine,
        datasets: Arc<dyn DatasetStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            datasets,
            settings,
            train_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Wire file- and SQLite-backed stores from configuration
    pub fn from_config(config: &RankConfig) -> Result<Self> {
        let storage = &config.storage;
        info!("Data directory: {}", storage.data_dir.display());

        let engine = PriorityEngine::new(Arc::new(JsonWeightStore::new(storage.model_path())))
            .with_trainer_config(config.training.clone())
            .with_blend_alpha(config.blend.alpha)?;
        let datasets = Arc::new(JsonDatasetStore::new(storage.dataset_path()));
        let settings = Arc::new(SqliteSettingsStore::open(storage.settings_path())?);

        Ok(Self::new(engine, datasets, settings))
    }
}
