//! Logistic-loss linear classifier fit by stochastic gradient descent.
//!
//! # Learning Algorithm
//!
//! 1. Draw initial weights uniformly from `[-init_range, init_range]`
//! 2. For each epoch, shuffle the samples and for every sample:
//!    `w[j] += lr * (label - sigmoid(w · x)) * x[j]`
//! 3. After each epoch, `lr *= lr_decay`
//!
//! The same random source drives initialization and every shuffle, so a
//! fixed seed reproduces a run within one build of the crate.

use crate::error::{RankError, Result};
use crate::scoring::features::TrainingSet;
use crate::scoring::predictor::sigmoid;
use crate::types::{WeightVector, FEATURE_COUNT};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Trainer hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Initial learning rate
    pub learning_rate: f64,
    /// Full passes over the samples
    pub epochs: usize,
    /// Multiplicative learning rate decay applied after every epoch
    pub lr_decay: f64,
    /// Seed for the default random source
    pub seed: u64,
    /// Half-width of the uniform weight initialization interval
    pub init_range: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.15,
            epochs: 300,
            lr_decay: 0.995,
            seed: 42,
            init_range: 0.1,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RankError::InvalidTrainingConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.lr_decay > 0.0 && self.lr_decay <= 1.0) {
            return Err(RankError::InvalidTrainingConfig(format!(
                "lr_decay must be in (0, 1], got {}",
                self.lr_decay
            )));
        }
        if !(self.init_range.is_finite() && self.init_range >= 0.0) {
            return Err(RankError::InvalidTrainingConfig(format!(
                "init_range must be non-negative, got {}",
                self.init_range
            )));
        }
        Ok(())
    }

    /// Learning rate in effect at the start of epoch `epoch` (0-based)
    pub fn learning_rate_at(&self, epoch: usize) -> f64 {
        let exponent = i32::try_from(epoch).unwrap_or(i32::MAX);
        self.learning_rate * self.lr_decay.powi(exponent)
    }
}

/// Summary of a successful training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub epochs: usize,
    /// Learning rate after the last decay step
    pub final_learning_rate: f64,
    /// Per-sample gradient steps taken
    pub updates: usize,
    pub weights: WeightVector,
    pub trained_at: DateTime<Utc>,
}

/// Result of a training attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    Trained(TrainingReport),
    /// The dataset had no events; nothing was fit
    NoData,
}

impl TrainingOutcome {
    pub fn report(&self) -> Option<&TrainingReport> {
        match self {
            TrainingOutcome::Trained(report) => Some(report),
            TrainingOutcome::NoData => None,
        }
    }

    /// The report, or [`RankError::NoData`] when nothing was trained
    pub fn into_report(self) -> Result<TrainingReport> {
        match self {
            TrainingOutcome::Trained(report) => Ok(report),
            TrainingOutcome::NoData => Err(RankError::NoData),
        }
    }
}

/// SGD trainer for the priority model
#[derive(Debug, Clone, Default)]
pub struct SgdTrainer {
    config: TrainerConfig,
}

impl SgdTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit using a generator seeded from the configured seed
    pub fn fit(&self, samples: &TrainingSet) -> Result<TrainingOutcome> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.fit_with_rng(samples, &mut rng)
    }

    /// Fit using a caller-supplied random source
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        samples: &TrainingSet,
        rng: &mut R,
    ) -> Result<TrainingOutcome> {
        self.config.validate()?;

        if samples.features.len() != samples.labels.len() {
            return Err(RankError::Other(format!(
                "feature/label length mismatch: {} vs {}",
                samples.features.len(),
                samples.labels.len()
            )));
        }

        if samples.is_empty() {
            debug!("No samples to train on");
            return Ok(TrainingOutcome::NoData);
        }

        let config = &self.config;
        info!(
            "Training on {} samples for {} epochs (lr={}, decay={})",
            samples.len(),
            config.epochs,
            config.learning_rate,
            config.lr_decay
        );

        let mut weights = [0.0; FEATURE_COUNT];
        for w in weights.iter_mut() {
            *w = rng.gen_range(-config.init_range..=config.init_range);
        }

        let mut order: Vec<usize> = (0..samples.len()).collect();
        let mut lr = config.learning_rate;
        let mut updates = 0;

        for epoch in 0..config.epochs {
            order.shuffle(rng);

            for &i in &order {
                let x = &samples.features[i];
                let pred = sigmoid(WeightVector::new(weights).dot(x));
                let error = f64::from(samples.labels[i]) - pred;
                for (w, xj) in weights.iter_mut().zip(x.iter()) {
                    *w += lr * error * xj;
                }
                updates += 1;
            }

            lr *= config.lr_decay;
            trace!("Epoch {} done, lr={:.6}", epoch + 1, lr);
        }

        info!(
            "Training complete: {} samples, final lr={:.6}",
            samples.len(),
            lr
        );

        Ok(TrainingOutcome::Trained(TrainingReport {
            n_samples: samples.len(),
            epochs: config.epochs,
            final_learning_rate: lr,
            updates,
            weights: WeightVector::new(weights),
            trained_at: Utc::now(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::features::extract;
    use crate::types::{Dataset, Event};
    use rand::RngCore;

    fn sample_dataset() -> Dataset {
        let mut events = Vec::new();
        for i in 0..20 {
            events.push(
                Event::for_domain("chat")
                    .with_opened(true)
                    .with_delay(i as f64 * 0.5),
            );
            events.push(
                Event::for_domain("promo")
                    .with_dismissed(true)
                    .with_delay(600.0 + i as f64),
            );
        }
        Dataset::new(events)
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let trainer = SgdTrainer::default();
        let outcome = trainer.fit(&TrainingSet::default()).unwrap();
        assert_eq!(outcome, TrainingOutcome::NoData);
        assert!(outcome.report().is_none());
        assert!(matches!(outcome.into_report(), Err(RankError::NoData)));
    }

    #[test]
    fn test_learning_rate_decays_once_per_epoch() {
        let config = TrainerConfig {
            epochs: 10,
            ..Default::default()
        };
        let trainer = SgdTrainer::new(config.clone());
        let outcome = trainer.fit(&extract(&sample_dataset())).unwrap();
        let report = outcome.report().unwrap();

        let expected = 0.15 * 0.995f64.powi(10);
        assert!((report.final_learning_rate - expected).abs() < 1e-12);
        assert!((config.learning_rate_at(10) - expected).abs() < 1e-12);
        assert_eq!(report.epochs, 10);
    }

    #[test]
    fn test_runs_exactly_one_shuffled_pass_per_epoch() {
        let samples = TrainingSet {
            features: vec![
                [1.0, 0.0, 1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 1.0, 0.1],
                [1.0, 1.0, 1.0, 0.0, 0.5],
            ],
            labels: vec![1, 0, 1],
        };
        let config = TrainerConfig {
            epochs: 7,
            ..Default::default()
        };
        let mut trained = StdRng::seed_from_u64(3);
        let outcome = SgdTrainer::new(config.clone())
            .fit_with_rng(&samples, &mut trained)
            .unwrap();
        assert_eq!(outcome.report().unwrap().updates, 7 * 3);

        // replay: weight init, then one shuffle per epoch
        let mut replay = StdRng::seed_from_u64(3);
        for _ in 0..FEATURE_COUNT {
            let _: f64 = replay.gen_range(-config.init_range..=config.init_range);
        }
        let mut order: Vec<usize> = (0..samples.len()).collect();
        for _ in 0..7 {
            order.shuffle(&mut replay);
        }
        assert_eq!(trained.next_u64(), replay.next_u64());
    }

    #[test]
    fn test_update_count_scales_with_epochs() {
        let samples = extract(&sample_dataset());
        for epochs in [0, 1, 12] {
            let trainer = SgdTrainer::new(TrainerConfig {
                epochs,
                ..Default::default()
            });
            let outcome = trainer.fit(&samples).unwrap();
            assert_eq!(outcome.report().unwrap().updates, epochs * samples.len());
        }
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let samples = extract(&sample_dataset());
        let trainer = SgdTrainer::new(TrainerConfig {
            epochs: 25,
            ..Default::default()
        });

        let a = trainer.fit(&samples).unwrap();
        let b = trainer.fit(&samples).unwrap();
        assert_eq!(
            a.report().unwrap().weights,
            b.report().unwrap().weights
        );
    }

    #[test]
    fn test_zero_epochs_keeps_initial_weights_in_range() {
        let trainer = SgdTrainer::new(TrainerConfig {
            epochs: 0,
            ..Default::default()
        });
        let outcome = trainer.fit(&extract(&sample_dataset())).unwrap();
        let report = outcome.report().unwrap();

        assert!(report.weights.as_array().iter().all(|w| w.abs() <= 0.1));
        assert_eq!(report.final_learning_rate, 0.15);
    }

    #[test]
    fn test_training_separates_engaged_from_ignored() {
        let samples = extract(&sample_dataset());
        let outcome = SgdTrainer::default().fit(&samples).unwrap();
        let weights = outcome.report().unwrap().weights;

        let opened = sigmoid(weights.dot(&samples.features[0]));
        let dismissed = sigmoid(weights.dot(&samples.features[1]));
        assert!(opened > 0.8, "opened event scored {}", opened);
        assert!(dismissed < 0.2, "dismissed event scored {}", dismissed);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let trainer = SgdTrainer::new(TrainerConfig {
            learning_rate: 0.0,
            ..Default::default()
        });
        let err = trainer.fit(&extract(&sample_dataset())).unwrap_err();
        assert!(matches!(err, RankError::InvalidTrainingConfig(_)));

        let config = TrainerConfig {
            lr_decay: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let samples = TrainingSet {
            features: vec![[1.0, 0.0, 0.0, 0.0, 1.0]],
            labels: vec![],
        };
        assert!(SgdTrainer::default().fit(&samples).is_err());
    }
}
