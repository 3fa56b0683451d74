//! Model training command

use super::helpers::{build_engine, load_dataset};
use notify_rank::{error::Result, RankConfig};
use std::path::PathBuf;

/// Handle train command
pub async fn handle(config: &RankConfig, dataset: Option<PathBuf>) -> Result<()> {
    let dataset = load_dataset(config, dataset)?;
    let engine = build_engine(config)?;

    let report = engine.train(&dataset)?.into_report()?;
    println!("✓ Model trained on {} samples", report.n_samples);
    println!("  Epochs: {}", report.epochs);
    println!("  Final learning rate: {:.6}", report.final_learning_rate);
    println!("  Weights: {:?}", report.weights.as_array());
    println!("  Saved to: {}", config.storage.model_path().display());

    Ok(())
}
