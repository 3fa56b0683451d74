//! Feature extraction from notification events.
//!
//! Every event maps to the same fixed five-element vector:
//!
//! | Index | Feature          | Range   |
//! |-------|------------------|---------|
//! | 0     | bias             | 1.0     |
//! | 1     | action_clicked   | {0, 1}  |
//! | 2     | opened           | {0, 1}  |
//! | 3     | dismissed        | {0, 1}  |
//! | 4     | inv_delay        | (0, 1]  |
//!
//! `inv_delay = 1 / (1 + delay_seconds)` is higher for notifications the
//! user reacted to quickly.

use crate::types::{Dataset, Event, FeatureVector, Label};
use tracing::debug;

/// Feature vectors and labels in dataset order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<Label>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Immediacy feature, monotonically decreasing in the delay
pub fn inv_delay(delay_seconds: f64) -> f64 {
    1.0 / (1.0 + delay_seconds)
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Build the feature vector for a single event
pub fn event_features(event: &Event) -> FeatureVector {
    [
        1.0,
        indicator(event.action_clicked),
        indicator(event.opened),
        indicator(event.dismissed),
        inv_delay(event.delay_seconds),
    ]
}

/// 1 iff the notification was opened or its action clicked
pub fn event_label(event: &Event) -> Label {
    Label::from(event.engaged())
}

/// Extract parallel feature/label sequences from a dataset
pub fn extract(dataset: &Dataset) -> TrainingSet {
    let (features, labels) = dataset
        .events
        .iter()
        .map(|event| (event_features(event), event_label(event)))
        .unzip();

    let set = TrainingSet { features, labels };
    debug!("Extracted {} training samples", set.len());
    set
}
