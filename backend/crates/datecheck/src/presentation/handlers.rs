//! HTTP Handlers

use axum::extract::FromRef;
use kernel::error::app_error::AppResult;
use kernel::response::envelope::Envelope;
use std::sync::Arc;

use crate::application::validator::DateTimeValidator;
use crate::presentation::dto::ScheduleRequest;
use crate::presentation::extract::DatedJson;

/// Shared state for schedule handlers
#[derive(Clone, FromRef)]
pub struct ScheduleAppState {
    pub validator: Arc<DateTimeValidator>,
}

/// POST /api/schedule
pub async fn create_schedule(
    DatedJson(req): DatedJson<ScheduleRequest>,
) -> AppResult<Envelope<ScheduleRequest>> {
    tracing::info!(
        title = %req.title,
        start_date = ?req.start_date,
        end_date = ?req.end_date,
        "Schedule accepted"
    );
    Ok(Envelope::ok_with("Schedule accepted", req))
}

/// GET /api/health
pub async fn health() -> Envelope<()> {
    Envelope::ok_msg("ok")
}
