//! Per-domain notification settings in SQLite

use crate::error::Result;
use crate::storage::SettingsStore;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// User-chosen delivery preferences for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainSettings {
    pub priority: String,
    pub sound: String,
    pub vibration: String,
    #[serde(deserialize_with = "volume_from_number_or_text")]
    pub volume: i64,
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            priority: "medium".to_string(),
            sound: "chime".to_string(),
            vibration: "short".to_string(),
            volume: 70,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VolumeInput {
    Int(i64),
    Float(f64),
    Text(String),
}

fn volume_from_number_or_text<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match VolumeInput::deserialize(deserializer)? {
        VolumeInput::Int(v) => Ok(v),
        VolumeInput::Float(v) => Ok(v.trunc() as i64),
        VolumeInput::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid volume: {:?}", s))),
    }
}

const CREATE_SETTINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS settings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        domain TEXT UNIQUE,
        priority TEXT,
        sound TEXT,
        vibration TEXT,
        volume INTEGER
    )
"#;

/// Settings store backed by a SQLite file
#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    db_path: PathBuf,
}

impl SqliteSettingsStore {
    /// Open the database, creating the file and table if needed
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let store = Self { db_path };
        store.get_conn()?.execute_batch(CREATE_SETTINGS_TABLE)?;
        info!("Settings database ready at {}", store.db_path.display());
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn get_conn(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, domain: &str) -> Result<Option<DomainSettings>> {
        let conn = self.get_conn()?;
        let settings = conn
            .query_row(
                "SELECT priority, sound, vibration, volume FROM settings WHERE domain = ?1",
                params![domain],
                |row| {
                    Ok(DomainSettings {
                        priority: row.get(0)?,
                        sound: row.get(1)?,
                        vibration: row.get(2)?,
                        volume: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    fn upsert(&self, domain: &str, settings: &DomainSettings) -> Result<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO settings (domain, priority, sound, vibration, volume)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(domain) DO UPDATE SET
                priority = excluded.priority,
                sound = excluded.sound,
                vibration = excluded.vibration,
                volume = excluded.volume
            "#,
            params![
                domain,
                settings.priority,
                settings.sound,
                settings.vibration,
                settings.volume
            ],
        )?;
        debug!("Saved settings for domain {}", domain);
        Ok(())
    }

    fn clear(&self) -> Result<usize> {
        let removed = self.get_conn()?.execute("DELETE FROM settings", [])?;
        info!("Cleared {} domain settings", removed);
        Ok(removed)
    }
}
