//! Train and predict against an injected weight store.
//!
//! [`PriorityEngine`] ties the pure scoring functions to a [`WeightStore`]:
//! training persists the fitted weights, prediction loads them (falling
//! back to heuristic-only ranking when none exist).

use crate::error::Result;
use crate::scoring::{
    blend_and_rank, extract, heuristic_scores, model_scores, validate_alpha, RankedDomain,
    SgdTrainer, TrainerConfig, TrainingOutcome, DEFAULT_BLEND_ALPHA,
};
use crate::storage::{StoredModel, WeightStore};
use crate::types::{Dataset, DomainKey};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Ranked output of a prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Domains by descending priority
    pub order: Vec<DomainKey>,
    /// Per-domain scores in the same order
    pub scores: Vec<RankedDomain>,
    /// Whether a trained model contributed
    pub model_used: bool,
}

/// Priority engine over a weight store
pub struct PriorityEngine {
    weights: Arc<dyn WeightStore>,
    trainer: SgdTrainer,
    blend_alpha: f64,
}

impl PriorityEngine {
    pub fn new(weights: Arc<dyn WeightStore>) -> Self {
        Self {
            weights,
            trainer: SgdTrainer::default(),
            blend_alpha: DEFAULT_BLEND_ALPHA,
        }
    }

    pub fn with_trainer_config(mut self, config: TrainerConfig) -> Self {
        self.trainer = SgdTrainer::new(config);
        self
    }

    /// Set the default blend weight used when a request supplies none
    pub fn with_blend_alpha(mut self, alpha: f64) -> Result<Self> {
        self.blend_alpha = validate_alpha(alpha)?;
        Ok(self)
    }

    pub fn blend_alpha(&self) -> f64 {
        self.blend_alpha
    }

    pub fn trainer_config(&self) -> &TrainerConfig {
        self.trainer.config()
    }

    /// Train on the dataset and persist the resulting weights
    pub fn train(&self, dataset: &Dataset) -> Result<TrainingOutcome> {
        let outcome = self.trainer.fit(&extract(dataset))?;
        self.persist(outcome)
    }

    /// Train with a caller-supplied random source
    pub fn train_with_rng<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<TrainingOutcome> {
        let outcome = self.trainer.fit_with_rng(&extract(dataset), rng)?;
        self.persist(outcome)
    }

    fn persist(&self, outcome: TrainingOutcome) -> Result<TrainingOutcome> {
        if let TrainingOutcome::Trained(report) = &outcome {
            self.weights.save(&StoredModel {
                weights: report.weights,
                n_samples: Some(report.n_samples),
                trained_at: Some(report.trained_at),
            })?;
            info!("Trained model on {} samples", report.n_samples);
        } else {
            info!("Training skipped: dataset has no events");
        }
        Ok(outcome)
    }

    /// Rank the dataset's domains, blending in the stored model if any
    pub fn predict(&self, dataset: &Dataset, alpha: Option<f64>) -> Result<Prediction> {
        let alpha = validate_alpha(alpha.unwrap_or(self.blend_alpha))?;
        let model = self.weights.load()?;
        if model.is_none() {
            debug!("No trained model, ranking by heuristic only");
        }

        let heuristic = heuristic_scores(dataset);
        let model_scores = model_scores(model.as_ref().map(|m| &m.weights), dataset);
        let scores = blend_and_rank(&heuristic, &model_scores, alpha)?;

        debug!(
            "Ranked {} domains (alpha={}, model={})",
            scores.len(),
            alpha,
            model.is_some()
        );

        Ok(Prediction {
            order: scores.iter().map(|s| s.domain.clone()).collect(),
            scores,
            model_used: model.is_some(),
        })
    }

    /// Whether a trained model is currently stored
    pub fn has_model(&self) -> Result<bool> {
        Ok(self.weights.load()?.is_some())
    }

    /// Delete the stored model, returning whether one existed
    pub fn reset_model(&self) -> Result<bool> {
        self.weights.delete()
    }
}
