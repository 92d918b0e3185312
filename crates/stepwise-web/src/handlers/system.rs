//! Liveness and basic store statistics.

use axum::{extract::State, Json};
use serde::Serialize;
use stepwise_common::{ApiError, StepwiseError};

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub solutions: u64,
}

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Result<Json<HealthStatus>, ApiError> {
    let solutions = state.store.count().await.map_err(StepwiseError::from)?;
    Ok(Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        solutions,
    }))
}
