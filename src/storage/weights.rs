//! Weight stores: a JSON file for deployments and an in-memory slot for tests
//!
//! File layout:
//!
//! ```json
//! { "weights": [w0, w1, w2, w3, w4], "n_samples": 120, "trained_at": "2024-05-01T12:00:00Z" }
//! ```
//!
//! Only `weights` is required; an empty list reads as "no model".

use crate::error::{RankError, Result};
use crate::storage::{StoredModel, WeightStore};
use crate::types::WeightVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    #[serde(default)]
    weights: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    n_samples: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trained_at: Option<DateTime<Utc>>,
}

/// Model persisted as a JSON file, replaced atomically on save
#[derive(Debug, Clone)]
pub struct JsonWeightStore {
    path: PathBuf,
}

impl JsonWeightStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "model.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl WeightStore for JsonWeightStore {
    fn load(&self) -> Result<Option<StoredModel>> {
        if !self.path.exists() {
            debug!("No model file at {}", self.path.display());
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)?;
        let file: ModelFile = serde_json::from_str(&text)?;
        if file.weights.is_empty() {
            debug!("Model file {} holds no weights", self.path.display());
            return Ok(None);
        }

        Ok(Some(StoredModel {
            weights: WeightVector::try_from(file.weights)?,
            n_samples: file.n_samples,
            trained_at: file.trained_at,
        }))
    }

    fn save(&self, model: &StoredModel) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = ModelFile {
            weights: model.weights.into(),
            n_samples: model.n_samples,
            trained_at: model.trained_at,
        };
        let tmp = self.temp_path();
        fs::write(&tmp, serde_json::to_vec_pretty(&file)?)?;
        fs::rename(&tmp, &self.path)?;

        info!("Model saved to {}", self.path.display());
        Ok(())
    }

    fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Model removed from {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local model slot
#[derive(Debug, Default)]
pub struct MemoryWeightStore {
    model: RwLock<Option<StoredModel>>,
}

impl MemoryWeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: StoredModel) -> Self {
        Self {
            model: RwLock::new(Some(model)),
        }
    }
}

fn poisoned<T>(_: T) -> RankError {
    RankError::Other("weight store lock poisoned".to_string())
}

impl WeightStore for MemoryWeightStore {
    fn load(&self) -> Result<Option<StoredModel>> {
        Ok(self.model.read().map_err(poisoned)?.clone())
    }

    fn save(&self, model: &StoredModel) -> Result<()> {
        *self.model.write().map_err(poisoned)? = Some(model.clone());
        Ok(())
    }

    fn delete(&self) -> Result<bool> {
        Ok(self.model.write().map_err(poisoned)?.take().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn model() -> StoredModel {
        StoredModel {
            weights: WeightVector::new([0.1, 0.2, 0.3, 0.4, 0.5]),
            n_samples: Some(12),
            trained_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_missing_file_is_no_model() {
        let dir = TempDir::new().unwrap();
        let store = JsonWeightStore::new(dir.path().join("model.json"));
        assert!(store.load().unwrap().is_none());
        assert!(!store.delete().unwrap());
    }

    #[test]
    fn test_save_load_delete() {
        let dir = TempDir::new().unwrap();
        let store = JsonWeightStore::new(dir.path().join("nested").join("model.json"));

        let saved = model();
        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), Some(saved));
        assert!(!store.temp_path().exists());

        assert!(store.delete().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_legacy_file_with_only_weights() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("priority_model.json");
        fs::write(&path, r#"{"weights": [1, 2, 3, 4, 5]}"#).unwrap();

        let loaded = JsonWeightStore::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.weights, WeightVector::new([1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(loaded.n_samples, None);
    }

    #[test]
    fn test_empty_weights_is_no_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"weights": []}"#).unwrap();
        assert!(JsonWeightStore::new(&path).load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_or_wrong_length_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonWeightStore::new(&path).load(),
            Err(RankError::Serialization(_))
        ));

        fs::write(&path, r#"{"weights": [1.0, 2.0]}"#).unwrap();
        assert!(matches!(
            JsonWeightStore::new(&path).load(),
            Err(RankError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryWeightStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&model()).unwrap();
        assert!(store.load().unwrap().is_some());
        assert!(store.delete().unwrap());
        assert!(!store.delete().unwrap());
    }
}
