//! Blending heuristic and model scores into a final domain ranking.
//!
//! For every domain in the heuristic map:
//!
//! ```text
//! final = alpha * model + (1 - alpha) * heuristic   if a model score exists
//! final = heuristic                                 otherwise
//! ```
//!
//! Ranking is descending by final score. The sort is stable, so equal
//! scores keep the heuristic map's order: the order in which domains were
//! first seen in the dataset.

use crate::error::{RankError, Result};
use crate::types::{DomainKey, DomainScores};
use serde::Serialize;
use std::cmp::Ordering;

/// Default weight of the model relative to the heuristic
pub const DEFAULT_BLEND_ALPHA: f64 = 0.6;

/// A domain with its final score and the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDomain {
    pub domain: DomainKey,
    pub score: f64,
    pub heuristic: f64,
    pub model: Option<f64>,
}

/// Reject blend weights outside [0, 1]
pub fn validate_alpha(alpha: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(RankError::InvalidBlendWeight(alpha))
    }
}

/// Merge heuristic and model scores, one entry per heuristic domain
pub fn blend(heuristic: &DomainScores, model: &DomainScores, alpha: f64) -> Result<DomainScores> {
    let alpha = validate_alpha(alpha)?;
    Ok(heuristic
        .iter()
        .map(|(domain, h)| {
            let score = match model.get(domain) {
                Some(m) => alpha * m + (1.0 - alpha) * h,
                None => h,
            };
            (domain.clone(), score)
        })
        .collect())
}

/// Blend and sort, keeping per-domain diagnostics
pub fn blend_and_rank(
    heuristic: &DomainScores,
    model: &DomainScores,
    alpha: f64,
) -> Result<Vec<RankedDomain>> {
    let blended = blend(heuristic, model, alpha)?;

    let mut ranked: Vec<RankedDomain> = blended
        .iter()
        .map(|(domain, score)| RankedDomain {
            domain: domain.clone(),
            score,
            heuristic: heuristic.get(domain).unwrap_or(score),
            model: model.get(domain),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}

/// Domain identifiers in descending score order
pub fn rank(scores: &DomainScores) -> Vec<DomainKey> {
    let mut entries: Vec<(&DomainKey, f64)> = scores.iter().collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries.into_iter().map(|(domain, _)| domain.clone()).collect()
}
