//! End-to-end tests for training and ranking through the engine facade

mod common;

use common::{temp_dir, three_domain_dataset, write_sample_dataset};
use mockall::mock;
use notify_rank::scoring::heuristic_scores;
use notify_rank::{
    error::Result, Dataset, DatasetStore, JsonDatasetStore, JsonWeightStore, MemoryWeightStore,
    PriorityEngine, RankError, StoredModel, TrainerConfig, TrainingOutcome, WeightStore,
    WeightVector,
};
use std::sync::Arc;

mock! {
    pub Store {}

    impl WeightStore for Store {
        fn load(&self) -> Result<Option<StoredModel>>;
        fn save(&self, model: &StoredModel) -> Result<()>;
        fn delete(&self) -> Result<bool>;
    }
}

fn some(domains: &[&str]) -> Vec<Option<String>> {
    domains.iter().map(|d| Some(d.to_string())).collect()
}

#[test]
fn test_three_domains_without_model_rank_by_heuristic() {
    let dataset = three_domain_dataset();
    let heuristic = heuristic_scores(&dataset);
    let a = heuristic.get(&Some("A".into())).unwrap();
    let b = heuristic.get(&Some("B".into())).unwrap();
    let c = heuristic.get(&Some("C".into())).unwrap();
    assert!(a > b && b > c);

    let engine = PriorityEngine::new(Arc::new(MemoryWeightStore::new()));
    let prediction = engine.predict(&dataset, None).unwrap();
    assert_eq!(prediction.order, some(&["A", "B", "C"]));
    assert!(!prediction.model_used);
}

#[test]
fn test_train_then_predict_with_files() {
    let dir = temp_dir();
    let dataset_path = write_sample_dataset(dir.path());
    let model_path = dir.path().join("priority_model.json");

    let dataset = JsonDatasetStore::new(&dataset_path).load().unwrap().unwrap();
    assert_eq!(dataset.len(), 7);

    let engine = PriorityEngine::new(Arc::new(JsonWeightStore::new(&model_path)));
    let outcome = engine.train(&dataset).unwrap();
    assert_eq!(outcome.report().unwrap().n_samples, 7);
    assert!(model_path.exists());

    let file: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&model_path).unwrap()).unwrap();
    assert_eq!(file["weights"].as_array().unwrap().len(), 5);
    assert_eq!(file["n_samples"], 7);

    // a fresh engine over the same file sees the model
    let reloaded = PriorityEngine::new(Arc::new(JsonWeightStore::new(&model_path)));
    let prediction = reloaded.predict(&dataset, None).unwrap();
    assert!(prediction.model_used);
    assert_eq!(prediction.order.len(), 4);
    assert!(prediction.order.contains(&None));
}

#[test]
fn test_deleting_model_restores_heuristic_ranking() {
    let dir = temp_dir();
    let dataset = three_domain_dataset();
    let engine = PriorityEngine::new(Arc::new(JsonWeightStore::new(
        dir.path().join("model.json"),
    )));

    let heuristic_only = engine.predict(&dataset, None).unwrap();
    engine.train(&dataset).unwrap();
    assert!(engine.predict(&dataset, None).unwrap().model_used);

    assert!(engine.reset_model().unwrap());
    assert_eq!(engine.predict(&dataset, None).unwrap(), heuristic_only);
}

#[test]
fn test_alpha_zero_ignores_model() {
    let dataset = three_domain_dataset();
    let store = Arc::new(MemoryWeightStore::with_model(StoredModel::new(
        WeightVector::new([-5.0, 0.0, 0.0, 0.0, 9.0]),
    )));
    let engine = PriorityEngine::new(store);

    let prediction = engine.predict(&dataset, Some(0.0)).unwrap();
    let heuristic = heuristic_scores(&dataset);
    for ranked in &prediction.scores {
        assert_eq!(ranked.score, heuristic.get(&ranked.domain).unwrap());
        assert!(ranked.model.is_some());
    }
}

#[test]
fn test_no_data_does_not_touch_store() {
    let mut store = MockStore::new();
    store.expect_save().never();

    let engine = PriorityEngine::new(Arc::new(store));
    let outcome = engine.train(&Dataset::default()).unwrap();
    assert_eq!(outcome, TrainingOutcome::NoData);

    let err = outcome.into_report().unwrap_err();
    assert!(matches!(err, RankError::NoData));
    assert_eq!(err.to_string(), "no data");
}

#[test]
fn test_training_saves_exactly_once() {
    let mut store = MockStore::new();
    store
        .expect_save()
        .withf(|model| model.n_samples == Some(4) && model.trained_at.is_some())
        .times(1)
        .returning(|_| Ok(()));

    let engine = PriorityEngine::new(Arc::new(store)).with_trainer_config(TrainerConfig {
        epochs: 5,
        ..Default::default()
    });
    engine.train(&three_domain_dataset()).unwrap();
}

#[test]
fn test_store_failure_propagates() {
    let mut store = MockStore::new();
    store
        .expect_load()
        .returning(|| Err(RankError::InvalidModel("expected 5 weights, got 2".into())));

    let engine = PriorityEngine::new(Arc::new(store));
    let err = engine.predict(&three_domain_dataset(), None).unwrap_err();
    assert!(matches!(err, RankError::InvalidModel(_)));
}

#[test]
fn test_malformed_events_never_reject_dataset() {
    let dataset: Dataset = serde_json::from_str(
        r#"{"events": [
            {"domain": "a", "opened": "maybe", "delay_seconds": "later"},
            42,
            {"domain": ["x"], "action_clicked": true},
            {"domain": "a", "delay_seconds": -3}
        ]}"#,
    )
    .unwrap();
    assert_eq!(dataset.len(), 4);

    let engine = PriorityEngine::new(Arc::new(MemoryWeightStore::new()));
    let prediction = engine.predict(&dataset, None).unwrap();
    assert_eq!(prediction.order, vec![None, Some("a".to_string())]);
}
