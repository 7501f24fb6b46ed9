//! Rover task endpoints.
//!
//! Field-level request validation lives here, at the boundary; the scheduler
//! assumes it receives well-formed drafts. Validation failures report every
//! failing field at once, as a JSON array of messages.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::scheduler::{ScheduleError, TaskDraft};

use super::routes::AppState;
use super::types::{CreateTaskRequest, TaskResponse, UtilizationResponse};

/// Rejection with a JSON body, either `{"message": ...}` or `{"errors": [...]}`.
type ApiError = (StatusCode, Json<serde_json::Value>);

/// Create rover task routes, nested under `/api/rovers`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:name/tasks", post(create_task).get(list_tasks))
        .route("/:name/utilization", get(get_utilization))
}

#[derive(Debug, Deserialize)]
struct DateQuery {
    date: String,
}

/// POST /api/rovers/:name/tasks - Schedule a new task for a rover.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let errors = validate_create(&req);
    if !errors.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))));
    }

    let draft = TaskDraft {
        task_type: req.task_type,
        latitude: req.latitude,
        longitude: req.longitude,
        starts_at: req.starts_at,
        duration_minutes: req.duration_minutes,
    };

    match state.scheduler.create_task(&name, draft).await {
        Ok(task) => Ok((StatusCode::CREATED, Json(task.into()))),
        Err(e @ ScheduleError::Conflict { .. }) => Err((
            StatusCode::CONFLICT,
            Json(json!({ "message": e.to_string() })),
        )),
        Err(e @ ScheduleError::IdCollision(_)) => {
            tracing::error!("Task creation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "An error occurred while processing your request" })),
            ))
        }
    }
}

/// GET /api/rovers/:name/tasks?date=YYYY-MM-DD - List a rover's tasks for a
/// date, ordered chronologically.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let date = parse_date(&query.date)?;
    let tasks = state.scheduler.tasks_by_date(&name, date).await;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// GET /api/rovers/:name/utilization?date=YYYY-MM-DD - Utilization report for
/// a rover on a date.
async fn get_utilization(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<UtilizationResponse>, ApiError> {
    let date = parse_date(&query.date)?;
    let report = state.scheduler.utilization(&name, date).await;
    Ok(Json(report.into()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid date format. Use YYYY-MM-DD" })),
        )
    })
}

/// Check every field constraint, collecting all failures.
fn validate_create(req: &CreateTaskRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if req.rover_name.trim().is_empty() {
        errors.push("roverName is required".to_string());
    } else if req.rover_name.len() > 100 {
        errors.push("roverName must not exceed 100 characters".to_string());
    }

    if !(-90.0..=90.0).contains(&req.latitude) {
        errors.push("latitude must be between -90 and 90 degrees".to_string());
    }

    if !(-180.0..=180.0).contains(&req.longitude) {
        errors.push("longitude must be between -180 and 180 degrees".to_string());
    }

    if req.starts_at <= Utc::now() {
        errors.push("startsAt must be in the future".to_string());
    }

    if req.duration_minutes == 0 {
        errors.push("durationMinutes must be greater than 0".to_string());
    } else if req.duration_minutes > 1440 {
        errors.push("durationMinutes must not exceed 1440 minutes (24 hours)".to_string());
    }

    errors
}
