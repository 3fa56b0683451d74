//! notify-rank - Notification Domain Priority Ranking
//!
//! Ranks notification sources ("domains") by predicted importance to a user:
//! - Fixed five-feature extraction from interaction events
//! - Logistic classifier trained by stochastic gradient descent
//! - Deterministic heuristic fallback scorer
//! - Blending of heuristic and model scores into a final ranking
//!
//! # Architecture
//!
//! The system is organized into several layers:
//! - **Types**: Events, datasets, weight vectors, ordered domain scores
//! - **Scoring**: Pure, synchronous scoring core (no I/O)
//! - **Storage**: Weight, dataset and settings stores behind traits
//! - **Engine**: Train/predict facade over an injected weight store
//! - **API**: HTTP boundary (axum)
//!
//! # Example
//!
//! ```rust
//! use notify_rank::{Dataset, Event, MemoryWeightStore, PriorityEngine};
//! use std::sync::Arc;
//!
//! let engine = PriorityEngine::new(Arc::new(MemoryWeightStore::new()));
//! let dataset = Dataset::new(vec![
//!     Event::for_domain("chat").with_opened(true).with_delay(2.0),
//!     Event::for_domain("promo").with_dismissed(true).with_delay(600.0),
//! ]);
//!
//! // No model yet: heuristic ranking
//! let prediction = engine.predict(&dataset, None).unwrap();
//! assert_eq!(prediction.order[0].as_deref(), Some("chat"));
//!
//! engine.train(&dataset).unwrap();
//! assert!(engine.predict(&dataset, None).unwrap().model_used);
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod scoring;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::RankConfig;
pub use engine::{Prediction, PriorityEngine};
pub use error::{RankError, Result};
pub use scoring::{RankedDomain, TrainerConfig, TrainingOutcome, TrainingReport};
pub use storage::{
    DatasetStore, DomainSettings, JsonDatasetStore, JsonWeightStore, MemoryWeightStore,
    SettingsStore, SqliteSettingsStore, StoredModel, WeightStore,
};
pub use types::{Dataset, DomainKey, DomainScores, Event, WeightVector, FEATURE_COUNT};
