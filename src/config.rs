//! Configuration for notify-rank
//!
//! Sources are layered, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config`)
//! 3. Environment variables: `NOTIFY_RANK__<SECTION>__<KEY>`,
//!    e.g. `NOTIFY_RANK__BLEND__ALPHA=0.7`

use crate::error::{RankError, Result};
use crate::scoring::{validate_alpha, TrainerConfig, DEFAULT_BLEND_ALPHA};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix
const ENV_PREFIX: &str = "NOTIFY_RANK";

/// Get the default data directory using XDG_DATA_HOME standard
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notify-rank")
}

/// Where the boundary stores keep their files.
///
/// Relative file names resolve against `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub dataset_file: PathBuf,
    pub model_file: PathBuf,
    pub settings_db: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset_file: PathBuf::from("sample_dataset.json"),
            model_file: PathBuf::from("priority_model.json"),
            settings_db: PathBuf::from("storage.db"),
        }
    }
}

impl StorageConfig {
    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.resolve(&self.dataset_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.model_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.resolve(&self.settings_db)
    }
}

/// Blend weight of the model against the heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    pub alpha: f64,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_BLEND_ALPHA,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    /// Frontend directory served at `/` when set
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".to_string(),
            static_dir: None,
        }
    }
}

/// Complete notify-rank configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub storage: StorageConfig,
    pub training: TrainerConfig,
    pub blend: BlendConfig,
    pub server: ServerConfig,
}

impl RankConfig {
    /// Load defaults, then the optional file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&RankConfig::default())?);

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: RankConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.blend.alpha)?;
        self.training.validate()?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RankError::Other(format!("Failed to render config: {}", e)))
    }
}
