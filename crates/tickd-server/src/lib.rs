#![forbid(unsafe_code)]
//! Tickd: HTTP service for named stopwatch timers.
//!
//! State is a flat JSON file behind [`tickd_store::TimerStore`]; the
//! [`lifecycle::LifecycleEngine`] owns every transition. The HTTP layer is
//! deliberately thin glue over the engine.

pub mod clock;
mod http;
pub mod lifecycle;
mod middleware;

pub use clock::{Clock, ManualClock, SystemClock};
pub use lifecycle::{EngineError, LifecycleEngine};

use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LifecycleEngine>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: Arc<LifecycleEngine>) -> Self {
        Self { engine }
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::healthz_handler))
        .route("/timers/start", post(http::start_timer_handler))
        .route("/timers", get(http::list_timers_handler))
        .route(
            "/timers/:id",
            get(http::get_timer_handler).delete(http::delete_timer_handler),
        )
        .route("/timers/:id/stop", post(http::stop_timer_handler))
        .route("/timers/:id/reset", post(http::reset_timer_handler))
        .layer(from_fn(middleware::cors_middleware))
        .layer(from_fn(middleware::request_tracing_middleware))
        .with_state(state)
}
