//! Domain ranking command

use super::helpers::{build_engine, domain_label, load_dataset};
use notify_rank::{error::Result, RankConfig};
use std::path::PathBuf;

/// Handle predict command
pub async fn handle(
    config: &RankConfig,
    dataset: Option<PathBuf>,
    alpha: Option<f64>,
    show_scores: bool,
) -> Result<()> {
    let dataset = load_dataset(config, dataset)?;
    let engine = build_engine(config)?;
    let prediction = engine.predict(&dataset, alpha)?;

    if prediction.order.is_empty() {
        println!("No domains in dataset");
        return Ok(());
    }

    if !prediction.model_used {
        println!("(no trained model, heuristic ranking)");
    }

    for (i, ranked) in prediction.scores.iter().enumerate() {
        if show_scores {
            let model = ranked
                .model
                .map(|m| format!("{:.4}", m))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:>3}. {:<30} score={:.4} heuristic={:.4} model={}",
                i + 1,
                domain_label(&ranked.domain),
                ranked.score,
                ranked.heuristic,
                model
            );
        } else {
            println!("{:>3}. {}", i + 1, domain_label(&ranked.domain));
        }
    }

    Ok(())
}
