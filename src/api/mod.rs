//! HTTP API for training, prediction and per-domain settings
//!
//! Provides:
//! - `POST /api/train` - fit the model on the server-side dataset
//! - `POST /api/predict` - rank domains (inline dataset or server-side)
//! - `GET|POST /api/settings/:domain` - notification preferences
//! - `POST /api/reset` - clear settings and the model
//! - `GET /health` - health check

pub mod error;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{ApiServer, ApiServerConfig, TrainResponse};
pub use state::AppState;
