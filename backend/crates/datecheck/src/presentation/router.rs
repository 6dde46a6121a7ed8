//! Schedule Router

use crate::application::validator::DateTimeValidator;
use crate::presentation::handlers::{self, ScheduleAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the schedule router
///
/// Errors leave handlers as stashed `AppError`s; mount the router under
/// `kernel::error::mapper::map_exceptions` to render them.
pub fn schedule_router(validator: DateTimeValidator) -> Router {
    let state = ScheduleAppState {
        validator: Arc::new(validator),
    };

    Router::new()
        .route("/schedule", post(handlers::create_schedule))
        .route("/health", get(handlers::health))
        .with_state(state)
}
