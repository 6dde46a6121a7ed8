//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! and the axum response glue for errors and envelopes.

use super::app_error::AppError;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::unclassified("I/O operation failed").with_source(err)
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::unclassified("Formatting error").with_source(err)
    }
}

// ============================================================================
// serde_json / chrono conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::unclassified(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::configuration(format!("Date parse error: {}", err)).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use http::StatusCode;

        use super::mapper::UnmappedError;
        use crate::response::envelope::Envelope;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Placeholder body; `map_exceptions` replaces it with the mapped envelope.
        let body: Envelope<serde_json::Value> = Envelope::error(self.kind().as_str());
        let mut response = (status, Json(body)).into_response();
        response
            .extensions_mut()
            .insert(UnmappedError(std::sync::Arc::new(self)));
        response
    }
}

#[cfg(feature = "axum")]
impl<T: serde::Serialize> axum::response::IntoResponse for crate::response::envelope::Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        use crate::validate::FieldViolation;

        AppError::validation(vec![FieldViolation::object(rejection.body_text())])
            .with_source(rejection)
    }
}
