//! Model-based scoring of events and domains.

use crate::scoring::features::event_features;
use crate::types::{Dataset, DomainKey, DomainScores, Event, WeightVector};
use indexmap::IndexMap;
use tracing::debug;

/// Inputs at or below this are treated as saturated to 0
const SIGMOID_FLOOR: f64 = -700.0;

/// Logistic link that never overflows.
///
/// Very negative inputs return `0.0` without evaluating the exponential; NaN
/// also maps to `0.0`.
pub fn sigmoid(x: f64) -> f64 {
    if x > SIGMOID_FLOOR {
        1.0 / (1.0 + (-x).exp())
    } else {
        0.0
    }
}

/// Score one event; `None` when no model is available
pub fn score_event(weights: Option<&WeightVector>, event: &Event) -> Option<f64> {
    let weights = weights?;
    Some(sigmoid(weights.dot(&event_features(event))))
}

/// Average model score per domain.
///
/// Domains without any scored event are absent, so the result is empty
/// when no model is available.
pub fn model_scores(weights: Option<&WeightVector>, dataset: &Dataset) -> DomainScores {
    let mut totals: IndexMap<&DomainKey, (f64, usize)> = IndexMap::new();

    for event in &dataset.events {
        let Some(score) = score_event(weights, event) else {
            continue;
        };
        let (sum, n) = totals.entry(&event.domain).or_insert((0.0, 0));
        *sum += score;
        *n += 1;
    }

    let scores: DomainScores = totals
        .into_iter()
        .map(|(domain, (sum, n))| (domain.clone(), sum / n.max(1) as f64))
        .collect();

    debug!("Model scored {} domains", scores.len());
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_saturates() {
        assert_eq!(sigmoid(-700.0), 0.0);
        assert_eq!(sigmoid(-1e308), 0.0);
        assert_eq!(sigmoid(f64::NAN), 0.0);
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1e308), 1.0);
        assert!(sigmoid(-699.0).is_finite());
    }

    #[test]
    fn test_no_model_means_unscored() {
        let event = Event::for_domain("a").with_opened(true);
        assert_eq!(score_event(None, &event), None);

        let dataset = Dataset::new(vec![event]);
        assert!(model_scores(None, &dataset).is_empty());
    }

    #[test]
    fn test_score_event_uses_features() {
        let weights = WeightVector::new([0.0, 0.0, 2.0, 0.0, 0.0]);
        let opened = Event::for_domain("a").with_opened(true);
        let ignored = Event::for_domain("a");

        assert_eq!(score_event(Some(&weights), &opened), Some(sigmoid(2.0)));
        assert_eq!(score_event(Some(&weights), &ignored), Some(0.5));
    }

    #[test]
    fn test_model_scores_average_per_domain() {
        let weights = WeightVector::new([0.0, 0.0, 2.0, 0.0, 0.0]);
        let dataset = Dataset::new(vec![
            Event::for_domain("a").with_opened(true),
            Event::for_domain("b"),
            Event::for_domain("a"),
        ]);

        let scores = model_scores(Some(&weights), &dataset);
        let expected_a = (sigmoid(2.0) + 0.5) / 2.0;
        assert!((scores.get(&Some("a".into())).unwrap() - expected_a).abs() < 1e-12);
        assert_eq!(scores.get(&Some("b".into())), Some(0.5));

        let order: Vec<_> = scores.domains().cloned().collect();
        assert_eq!(order, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let weights = WeightVector::new([0.3, -1.0, 0.7, -0.4, 1.1]);
        let dataset = Dataset::new(vec![
            Event::for_domain("a").with_delay(3.0),
            Event::for_domain("b").with_action_clicked(true),
        ]);

        assert_eq!(
            model_scores(Some(&weights), &dataset),
            model_scores(Some(&weights), &dataset)
        );
    }
}
