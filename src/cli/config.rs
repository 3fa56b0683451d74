//! Configuration inspection command

use clap::Subcommand;
use notify_rank::{error::Result, RankConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print resolved storage paths
    Paths,
}

/// Handle configuration command
pub async fn handle(config: &RankConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Paths => {
            println!("Dataset:  {}", config.storage.dataset_path().display());
            println!("Model:    {}", config.storage.model_path().display());
            println!("Settings: {}", config.storage.settings_path().display());
        }
    }
    Ok(())
}
