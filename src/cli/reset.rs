//! Reset command: clears settings and the trained model, keeps the dataset

use super::helpers::build_engine;
use notify_rank::{error::Result, RankConfig, SettingsStore, SqliteSettingsStore};

/// Handle reset command
pub async fn handle(config: &RankConfig) -> Result<()> {
    let settings = SqliteSettingsStore::open(config.storage.settings_path())?;
    let cleared = settings.clear()?;
    let removed = build_engine(config)?.reset_model()?;

    println!("✓ Cleared {} domain settings", cleared);
    if removed {
        println!("✓ Model removed");
    } else {
        println!("  No model to remove");
    }
    println!("  Dataset preserved: {}", config.storage.dataset_path().display());
    Ok(())
}
