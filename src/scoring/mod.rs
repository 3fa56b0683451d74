//! Priority scoring for notification domains.
//!
//! # Architecture
//!
//! - **features**: Event → fixed five-element feature vector and binary label
//! - **heuristic**: Deterministic per-domain score from event statistics
//! - **trainer**: Logistic classifier fit by SGD with learning-rate decay
//! - **predictor**: Applies trained weights to events, averaged per domain
//! - **blender**: Merges heuristic and model scores into a ranking
//!
//! Data flow:
//!
//! ```text
//! Dataset ─┬─> features ─┬─> trainer ──> WeightVector
//!          │             └─> predictor ─┐
//!          └─> heuristic ───────────────┴─> blender ──> ranked domains
//! ```
//!
//! Everything here is synchronous and free of I/O; persistence lives in
//! [`crate::storage`].
//!
//! # Usage
//!
//! ```rust
//! use notify_rank::scoring::{blend_and_rank, heuristic_scores, model_scores};
//! use notify_rank::{Dataset, Event};
//!
//! let dataset = Dataset::new(vec![
//!     Event::for_domain("chat").with_opened(true),
//!     Event::for_domain("promo").with_dismissed(true).with_delay(900.0),
//! ]);
//!
//! let heuristic = heuristic_scores(&dataset);
//! let model = model_scores(None, &dataset);
//! let ranked = blend_and_rank(&heuristic, &model, 0.6).unwrap();
//! assert_eq!(ranked[0].domain.as_deref(), Some("chat"));
//! ```

pub mod blender;
pub mod features;
pub mod heuristic;
pub mod predictor;
pub mod trainer;

pub use blender::{blend, blend_and_rank, rank, validate_alpha, RankedDomain, DEFAULT_BLEND_ALPHA};
pub use features::{event_features, event_label, extract, inv_delay, TrainingSet};
pub use heuristic::{domain_stats, heuristic_scores, DomainStats};
pub use predictor::{model_scores, score_event, sigmoid};
pub use trainer::{SgdTrainer, TrainerConfig, TrainingOutcome, TrainingReport};
