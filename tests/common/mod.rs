//! Common test utilities and helpers

#![allow(dead_code)]

use notify_rank::{Dataset, Event};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Three domains whose heuristic order is A > B > C
pub fn three_domain_dataset() -> Dataset {
    Dataset::new(vec![
        Event::for_domain("C").with_delay(100.0),
        Event::for_domain("A").with_opened(true),
        Event::for_domain("B").with_delay(1.0),
        Event::for_domain("A").with_action_clicked(true).with_delay(2.0),
    ])
}

/// Mixed engagement dataset in the on-disk JSON shape
pub fn sample_dataset_json() -> serde_json::Value {
    json!({
        "events": [
            {"domain": "chat", "action_clicked": 1, "opened": 1, "dismissed": 0, "delay_seconds": 3},
            {"domain": "chat", "action_clicked": 0, "opened": 1, "dismissed": 0, "delay_seconds": 8},
            {"domain": "news", "action_clicked": 0, "opened": 0, "dismissed": 1, "delay_seconds": 240},
            {"domain": "news", "action_clicked": 0, "opened": 1, "dismissed": 0, "delay_seconds": 60},
            {"domain": "promo", "action_clicked": 0, "opened": 0, "dismissed": 1, "delay_seconds": 900},
            {"domain": "promo", "dismissed": 1},
            {"opened": 1, "delay_seconds": "15"}
        ]
    })
}

/// Write the sample dataset into `dir` and return its path
pub fn write_sample_dataset(dir: &Path) -> PathBuf {
    let path = dir.join("sample_dataset.json");
    std::fs::write(&path, sample_dataset_json().to_string()).expect("write dataset");
    path
}

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}
