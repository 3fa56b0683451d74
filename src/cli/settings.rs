//! Per-domain settings command

use clap::Subcommand;
use notify_rank::{error::Result, DomainSettings, RankConfig, SettingsStore, SqliteSettingsStore};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show settings for a domain
    Get {
        /// Domain identifier
        domain: String,
    },

    /// Save settings for a domain (unspecified fields use defaults)
    Set {
        /// Domain identifier
        domain: String,

        /// Priority label (e.g. low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Notification sound
        #[arg(long)]
        sound: Option<String>,

        /// Vibration pattern
        #[arg(long)]
        vibration: Option<String>,

        /// Volume (0-100)
        #[arg(long)]
        volume: Option<i64>,
    },
}

/// Handle settings command
pub async fn handle(config: &RankConfig, action: SettingsAction) -> Result<()> {
    let store = SqliteSettingsStore::open(config.storage.settings_path())?;

    match action {
        SettingsAction::Get { domain } => match store.get(&domain)? {
            Some(settings) => {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            None => println!("No settings stored for {}", domain),
        },
        SettingsAction::Set {
            domain,
            priority,
            sound,
            vibration,
            volume,
        } => {
            let defaults = DomainSettings::default();
            let settings = DomainSettings {
                priority: priority.unwrap_or(defaults.priority),
                sound: sound.unwrap_or(defaults.sound),
                vibration: vibration.unwrap_or(defaults.vibration),
                volume: volume.unwrap_or(defaults.volume),
            };
            store.upsert(&domain, &settings)?;
            println!("✓ Settings saved for {}", domain);
        }
    }

    Ok(())
}
