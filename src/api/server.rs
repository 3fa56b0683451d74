//! HTTP API server for training, prediction and domain settings

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::storage::DomainSettings;
use crate::types::Dataset;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{net::SocketAddr, path::PathBuf};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
    /// Frontend directory served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 5000).into(),
            static_dir: None,
        }
    }
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create new API server
    pub fn new(config: ApiServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build router
    pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
        let mut router = Router::new()
            .route("/api/train", post(train_handler))
            .route("/api/predict", post(predict_handler))
            .route(
                "/api/settings/:domain",
                get(load_settings_handler).post(save_settings_handler),
            )
            .route("/api/reset", post(reset_handler))
            .route("/health", get(health_handler))
            .with_state(state);

        if let Some(dir) = static_dir {
            router = router
                .route_service("/domain/*name", ServeFile::new(dir.join("page_domain.html")))
                .fallback_service(ServeDir::new(dir));
        }

        router
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start serving until Ctrl-C
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = Self::router(self.state, self.config.static_dir.clone());
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("API server listening on http://{}", self.config.addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    debug!("Shutdown signal received");
}

/// Run blocking storage/scoring work off the async executor
async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResponse {
    pub status: String,
    pub n_samples: usize,
}

/// Train on the server-side dataset
async fn train_handler(State(state): State<AppState>) -> ApiResult<Json<TrainResponse>> {
    let lock = state.train_lock.clone();
    let _guard = lock.lock().await;

    let report = run_blocking(move || {
        let dataset = state
            .datasets
            .load()?
            .ok_or_else(|| ApiError::BadRequest("dataset not found on server".to_string()))?;
        Ok(state.engine.train(&dataset)?.into_report()?)
    })
    .await?;

    Ok(Json(TrainResponse {
        status: "trained".to_string(),
        n_samples: report.n_samples,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct PredictParams {
    alpha: Option<f64>,
    #[serde(default)]
    scores: bool,
}

/// A non-empty JSON object body is the dataset; anything else defers to the store
fn inline_dataset(body: &[u8]) -> Option<Dataset> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) if !map.is_empty() => {
            serde_json::from_value(Value::Object(map)).ok()
        }
        _ => None,
    }
}

/// Rank domains from the request body or the server-side dataset
async fn predict_handler(
    State(state): State<AppState>,
    params: Result<Query<PredictParams>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let inline = inline_dataset(&body);

    let prediction = run_blocking(move || {
        let dataset = match inline {
            Some(dataset) => dataset,
            None => state.datasets.load()?.ok_or_else(|| {
                ApiError::BadRequest("no dataset present on server".to_string())
            })?,
        };
        Ok(state.engine.predict(&dataset, params.alpha)?)
    })
    .await?;

    let mut body = json!({ "order": prediction.order });
    if params.scores {
        body["scores"] = serde_json::to_value(&prediction.scores)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        body["model_used"] = json!(prediction.model_used);
    }
    Ok(Json(body))
}

/// Stored settings for a domain, or `{}`
async fn load_settings_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> ApiResult<Json<Value>> {
    let settings = run_blocking(move || Ok(state.settings.get(&domain)?)).await?;

    Ok(Json(match settings {
        Some(settings) => {
            serde_json::to_value(settings).map_err(|e| ApiError::Internal(e.to_string()))?
        }
        None => json!({}),
    }))
}

/// Empty body or JSON `null` means all defaults
fn parse_settings(body: &[u8]) -> ApiResult<DomainSettings> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DomainSettings::default());
    }

    let invalid = |e: serde_json::Error| ApiError::BadRequest(format!("invalid settings: {}", e));
    match serde_json::from_slice::<Value>(body).map_err(invalid)? {
        Value::Null => Ok(DomainSettings::default()),
        value => serde_json::from_value(value).map_err(invalid),
    }
}

/// Upsert settings; missing fields take their defaults
async fn save_settings_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let settings = parse_settings(&body)?;

    run_blocking(move || Ok(state.settings.upsert(&domain, &settings)?)).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Clear all settings and the trained model; the dataset is kept
async fn reset_handler(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let lock = state.train_lock.clone();
    let _guard = lock.lock().await;

    run_blocking(move || {
        let cleared = state.settings.clear()?;
        match state.engine.reset_model() {
            Ok(removed) => debug!("Reset: {} settings cleared, model removed={}", cleared, removed),
            Err(e) => warn!("Reset: failed to remove model: {}", e),
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({
        "status": "reset_ok",
        "note": "settings cleared and model removed (sample preserved)."
    })))
}

/// Health check handler
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model_trained: bool,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_trained = run_blocking(move || Ok(state.engine.has_model()?))
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_trained,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_dataset_detection() {
        assert!(inline_dataset(b"").is_none());
        assert!(inline_dataset(b"{}").is_none());
        assert!(inline_dataset(b"[1, 2]").is_none());
        assert!(inline_dataset(b"not json").is_none());

        let dataset = inline_dataset(br#"{"events": [{"domain": "a"}]}"#).unwrap();
        assert_eq!(dataset.len(), 1);

        let dataset = inline_dataset(br#"{"other": true}"#).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_parse_settings_defaults() {
        assert_eq!(parse_settings(b"").unwrap(), DomainSettings::default());
        assert_eq!(parse_settings(b" null ").unwrap(), DomainSettings::default());
        assert_eq!(parse_settings(b"{}").unwrap(), DomainSettings::default());

        let settings = parse_settings(br#"{"sound": "bell"}"#).unwrap();
        assert_eq!(settings.sound, "bell");
        assert_eq!(settings.volume, 70);

        assert!(matches!(
            parse_settings(b"{not json"),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_default_server_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.addr.port(), 5000);
        assert!(config.static_dir.is_none());
    }
}
