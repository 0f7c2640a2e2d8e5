// SPDX-License-Identifier: Apache-2.0

use crate::lifecycle::EngineError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tickd_model::{epoch_ms_to_rfc3339, ElapsedTime, Timer, TimerId};
use tracing::error;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartTimerRequest {
    label: Option<String>,
}

/// The slim view returned by start and reset: the stop-side fields are
/// guaranteed absent, so they are omitted entirely.
fn running_timer_json(timer: &Timer) -> Value {
    json!({
        "id": timer.id,
        "label": timer.label,
        "startTime": epoch_ms_to_rfc3339(timer.start_time),
        "status": timer.status,
    })
}

fn full_timer_json(timer: &Timer, elapsed: Option<&ElapsedTime>) -> Value {
    json!({
        "id": timer.id,
        "label": timer.label,
        "startTime": epoch_ms_to_rfc3339(timer.start_time),
        "endTime": timer.end_time.map(epoch_ms_to_rfc3339),
        "elapsedTime": elapsed,
        "status": timer.status,
    })
}

fn not_found_response(raw_id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Timer not found.",
            "message": format!("No timer found with ID: {raw_id}"),
        })),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, raw_id: &str) -> Response {
    match err {
        EngineError::NotFound { .. } => not_found_response(raw_id),
        EngineError::AlreadyStopped { id, elapsed } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Timer already stopped.",
                "message": format!("Timer {id} was already stopped."),
                "elapsedTime": elapsed,
            })),
        )
            .into_response(),
        EngineError::Persistence(store_err) => {
            error!(error = %store_err, "timer write failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Persistence failure.",
                    "message": store_err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// A non-numeric path id can never match a stored timer, so it resolves to
/// the same not-found outcome as an unknown numeric id.
fn parse_timer_id(raw: &str) -> Option<TimerId> {
    raw.parse::<i64>().ok().map(TimerId)
}

pub(crate) async fn start_timer_handler(
    State(state): State<AppState>,
    body: Option<Json<StartTimerRequest>>,
) -> Response {
    let label = body.and_then(|Json(req)| req.label);
    match state.engine.start(label) {
        Ok(timer) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "timer": running_timer_json(&timer),
                "message": "Timer started successfully.",
            })),
        )
            .into_response(),
        Err(err) => engine_error_response(err, ""),
    }
}

pub(crate) async fn stop_timer_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_timer_id(&raw_id) else {
        return not_found_response(&raw_id);
    };
    match state.engine.stop(id) {
        Ok(timer) => {
            let elapsed = timer.elapsed_time.clone();
            Json(json!({
                "success": true,
                "timer": full_timer_json(&timer, elapsed.as_ref()),
                "message": "Timer stopped successfully.",
            }))
            .into_response()
        }
        Err(err) => engine_error_response(err, &raw_id),
    }
}

pub(crate) async fn get_timer_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_timer_id(&raw_id) else {
        return not_found_response(&raw_id);
    };
    match state.engine.get(id) {
        Ok((timer, elapsed)) => Json(json!({
            "success": true,
            "timer": full_timer_json(&timer, elapsed.as_ref()),
        }))
        .into_response(),
        Err(err) => engine_error_response(err, &raw_id),
    }
}

pub(crate) async fn list_timers_handler(State(state): State<AppState>) -> Response {
    let listed = state.engine.list();
    let timers: Vec<Value> = listed
        .iter()
        .map(|(timer, elapsed)| full_timer_json(timer, elapsed.as_ref()))
        .collect();
    Json(json!({
        "success": true,
        "timers": timers,
        "count": timers.len(),
    }))
    .into_response()
}

pub(crate) async fn delete_timer_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_timer_id(&raw_id) else {
        return not_found_response(&raw_id);
    };
    match state.engine.remove(id) {
        Ok(removed) => Json(json!({
            "success": true,
            "message": "Timer deleted successfully.",
            "deletedTimer": {
                "id": removed.id,
                "label": removed.label,
            },
        }))
        .into_response(),
        Err(err) => engine_error_response(err, &raw_id),
    }
}

pub(crate) async fn reset_timer_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_timer_id(&raw_id) else {
        return not_found_response(&raw_id);
    };
    match state.engine.reset(id) {
        Ok(timer) => Json(json!({
            "success": true,
            "timer": running_timer_json(&timer),
            "message": "Timer reset successfully.",
        }))
        .into_response(),
        Err(err) => engine_error_response(err, &raw_id),
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
