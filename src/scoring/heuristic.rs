//! Deterministic, model-free domain scoring.
//!
//! Used on its own whenever no model has been trained, and as the baseline
//! signal blended with model output otherwise.
//!
//! ```text
//! score = rate * 1.2 + recent_score * 0.8 + ln(1 + count) * 0.03
//! ```
//!
//! - `rate = acted / max(1, count)` rewards domains the user engages with
//! - `recent_score = 1 / (1 + min_delay)` rewards fast historical reactions
//! - the log-count term is a small volume bonus that grows sub-linearly

use crate::scoring::features::inv_delay;
use crate::types::{Dataset, DomainKey, DomainScores, Event};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

const RATE_WEIGHT: f64 = 1.2;
const RECENCY_WEIGHT: f64 = 0.8;
const VOLUME_WEIGHT: f64 = 0.03;

/// Aggregate statistics for one domain
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainStats {
    /// Events seen
    pub count: usize,
    /// Events that were opened or had their action clicked
    pub acted: usize,
    /// Smallest observed delay, absent until an event is seen
    pub recent_min_delay: Option<f64>,
}

impl DomainStats {
    fn observe(&mut self, event: &Event) {
        self.count += 1;
        if event.engaged() {
            self.acted += 1;
        }
        let delay = event.delay_seconds;
        if self.recent_min_delay.map_or(true, |min| delay < min) {
            self.recent_min_delay = Some(delay);
        }
    }

    pub fn rate(&self) -> f64 {
        self.acted as f64 / self.count.max(1) as f64
    }

    pub fn recent_score(&self) -> f64 {
        inv_delay(self.recent_min_delay.unwrap_or(0.0))
    }

    pub fn score(&self) -> f64 {
        self.rate() * RATE_WEIGHT
            + self.recent_score() * RECENCY_WEIGHT
            + (self.count as f64).ln_1p() * VOLUME_WEIGHT
    }
}

/// Group events by domain in first-seen order
pub fn domain_stats(dataset: &Dataset) -> IndexMap<DomainKey, DomainStats> {
    let mut groups: IndexMap<DomainKey, DomainStats> = IndexMap::new();
    for event in &dataset.events {
        groups
            .entry(event.domain.clone())
            .or_default()
            .observe(event);
    }
    groups
}

/// Heuristic score for every domain present in the dataset
pub fn heuristic_scores(dataset: &Dataset) -> DomainScores {
    let scores: DomainScores = domain_stats(dataset)
        .into_iter()
        .map(|(domain, stats)| {
            let score = stats.score();
            (domain, score)
        })
        .collect();

    debug!("Heuristic scored {} domains", scores.len());
    scores
}
