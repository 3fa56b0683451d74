//! Core data types for notification priority ranking
//!
//! Events arrive as loosely-shaped JSON records. Decoding is lenient: a
//! malformed field falls back to its documented default instead of
//! rejecting the event or the dataset.
//!
//! | Field            | Accepted                                  | Default |
//! |------------------|-------------------------------------------|---------|
//! | `domain`         | string, number, bool (as JSON text)       | absent  |
//! | `action_clicked` | bool, number, numeric or "true"/"false"   | 0       |
//! | `opened`         | same as above                             | 0       |
//! | `dismissed`      | same as above                             | 0       |
//! | `delay_seconds`  | finite non-negative number or numeric str | 0.0     |

use crate::error::RankError;
use serde::{Deserialize, Deserializer, Serialize};
use indexmap::IndexMap;
use serde_json::Value;

/// Number of model features, bias included
pub const FEATURE_COUNT: usize = 5;

/// Identifier of a notification source.
///
/// `None` is the group of events whose domain was absent or unusable; it is
/// ranked like any other domain.
pub type DomainKey = Option<String>;

/// `[bias, action_clicked, opened, dismissed, inv_delay]`
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Binary interaction label (1 = opened or action clicked)
pub type Label = u8;

/// One recorded notification occurrence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Event {
    pub domain: DomainKey,
    pub action_clicked: bool,
    pub opened: bool,
    pub dismissed: bool,
    pub delay_seconds: f64,
}

impl Event {
    /// Create an event for a domain with every outcome unset
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Default::default()
        }
    }

    pub fn with_action_clicked(mut self, clicked: bool) -> Self {
        self.action_clicked = clicked;
        self
    }

    pub fn with_opened(mut self, opened: bool) -> Self {
        self.opened = opened;
        self
    }

    pub fn with_dismissed(mut self, dismissed: bool) -> Self {
        self.dismissed = dismissed;
        self
    }

    pub fn with_delay(mut self, delay_seconds: f64) -> Self {
        self.delay_seconds = sanitize_delay(delay_seconds);
        self
    }

    /// Whether the user meaningfully interacted with the notification.
    ///
    /// `dismissed` never contributes.
    pub fn engaged(&self) -> bool {
        self.opened || self.action_clicked
    }

    /// Decode a single JSON record, coercing bad fields to defaults
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        Self {
            domain: map.get("domain").and_then(coerce_domain),
            action_clicked: map.get("action_clicked").map(coerce_flag).unwrap_or(false),
            opened: map.get("opened").map(coerce_flag).unwrap_or(false),
            dismissed: map.get("dismissed").map(coerce_flag).unwrap_or(false),
            delay_seconds: map.get("delay_seconds").map(coerce_delay).unwrap_or(0.0),
        }
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Event::from_value(&value))
    }
}

fn coerce_domain(value: &Value) -> DomainKey {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f.trunc() != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(f) = s.parse::<f64>() {
                f.is_finite() && f.trunc() != 0.0
            } else {
                s.eq_ignore_ascii_case("true")
            }
        }
        _ => false,
    }
}

fn coerce_delay(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    sanitize_delay(raw)
}

/// Delays must keep `1 / (1 + delay)` inside (0, 1]
fn sanitize_delay(delay: f64) -> f64 {
    if delay.is_finite() && delay > 0.0 {
        delay
    } else {
        0.0
    }
}

/// A collection of events under the `events` key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "lenient_events")]
    pub events: Vec<Event>,
}

impl Dataset {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn lenient_events<'de, D>(deserializer: D) -> std::result::Result<Vec<Event>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(Event::from_value).collect(),
        _ => Vec::new(),
    })
}

/// Trained linear model weights, one per feature position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector([f64; FEATURE_COUNT]);

impl WeightVector {
    pub fn new(weights: [f64; FEATURE_COUNT]) -> Self {
        Self(weights)
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn dot(&self, features: &FeatureVector) -> f64 {
        self.0.iter().zip(features.iter()).map(|(w, x)| w * x).sum()
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = RankError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(RankError::InvalidModel(
                "weights must be finite numbers".to_string(),
            ));
        }
        let len = weights.len();
        let array: [f64; FEATURE_COUNT] = weights.try_into().map_err(|_| {
            RankError::InvalidModel(format!(
                "expected {} weights, got {}",
                FEATURE_COUNT, len
            ))
        })?;
        Ok(Self(array))
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.0.to_vec()
    }
}

/// Per-domain scores that remember first-insertion order.
///
/// Iteration follows the order in which domains were first inserted, which
/// for heuristic scores is the order domains first appear in the dataset.
/// Equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct DomainScores(IndexMap<DomainKey, f64>);

impl DomainScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a score; overwriting keeps the original position
    pub fn insert(&mut self, domain: DomainKey, score: f64) {
        self.0.insert(domain, score);
    }

    pub fn get(&self, domain: &DomainKey) -> Option<f64> {
        self.0.get(domain).copied()
    }

    pub fn contains(&self, domain: &DomainKey) -> bool {
        self.0.contains_key(domain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DomainKey, f64)> {
        self.0.iter().map(|(d, s)| (d, *s))
    }

    pub fn domains(&self) -> impl Iterator<Item = &DomainKey> {
        self.0.keys()
    }
}

impl PartialEq for DomainScores {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl FromIterator<(DomainKey, f64)> for DomainScores {
    fn from_iter<I: IntoIterator<Item = (DomainKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
