//! Solve API: submit a problem, list and fetch stored solutions.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use stepwise_common::{ApiError, ProblemType, SolutionRecord, StepwiseError};
use stepwise_solver::RawInputs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::{AppEvent, AppState, SharedState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub problem_type: String,
    #[serde(default)]
    pub inputs: RawInputs,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub solution_html: String,
}

/// Validate, solve, render and persist one submission.
/// Shared by the JSON API and the HTML form.
pub async fn submit(
    state: &AppState,
    problem_type: &str,
    inputs: &RawInputs,
) -> Result<SolutionRecord, StepwiseError> {
    // Reject unknown types before touching the solver.
    let problem_type: ProblemType = problem_type.parse()?;

    let solved = state.solver.solve(problem_type, inputs)?;
    let record = SolutionRecord::new(solved.problem_type, solved.inputs, solved.solution_html);
    let record = state.store.save(record).await?;

    info!("Solved {} = {} (record {})", record.problem_type, solved.answer, record.id);
    state.publish(AppEvent::SolutionCreated {
        id: record.id,
        problem_type: record.problem_type,
        created_at: record.created_at,
    });
    Ok(record)
}

/// POST /api/solve
pub async fn api_solve(
    State(state): State<SharedState>,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Result<Json<SolveResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    match submit(&state, &req.problem_type, &req.inputs).await {
        Ok(record) => Ok(Json(SolveResponse { solution_html: record.solution_html })),
        Err(e) => {
            if e.is_client_error() {
                warn!("Rejected {} submission: {}", req.problem_type, e);
            }
            Err(e.into())
        }
    }
}

/// GET /api/solve/history: every stored solution, newest first
pub async fn api_history(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SolutionRecord>>, ApiError> {
    let records = state.store.list_all().await.map_err(StepwiseError::from)?;
    Ok(Json(records))
}

/// GET /api/solve/{id}
pub async fn api_solution(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SolutionRecord>, ApiError> {
    match state.store.find_by_id(id).await.map_err(StepwiseError::from)? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound(format!("No solution with id {}", id))),
    }
}
