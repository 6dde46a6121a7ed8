//! Exception Mapper - turns failures into response envelopes
//!
//! The mapper is an ordered chain of [`ExceptionHandler`]s; the first one
//! whose `matches` accepts the error formats it. The default chain is
//! field validation, then null reference, then a catch-all.
//!
//! Every handler logs the request path and the full error. Only field
//! validation puts per-field detail in the client-visible message.

use serde_json::Value;

use super::app_error::AppError;
use super::kind::FailureKind;
use crate::response::envelope::Envelope;
use crate::schema::Schema;
use crate::validate::FieldViolation;

/// Message of the null reference envelope
pub const NULL_REFERENCE_MESSAGE: &str = "Null reference error occurred";
/// Prefix of the field validation envelope
pub const VALIDATION_FAILED_MESSAGE: &str = "Data validation failed";
/// Prefix of the catch-all envelope
pub const UNKNOWN_ERROR_PREFIX: &str = "Unknown error! Cause: ";

/// Request the failure happened in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    method: String,
    path: String,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// One link of the mapper chain
pub trait ExceptionHandler: Send + Sync {
    fn matches(&self, error: &AppError) -> bool;

    fn handle(&self, ctx: &RequestContext, error: &AppError) -> Envelope<Value>;
}

// ============================================================================
// Built-in handlers
// ============================================================================

/// Aggregates every field violation into one message
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidationHandler;

impl ExceptionHandler for FieldValidationHandler {
    fn matches(&self, error: &AppError) -> bool {
        error.kind() == FailureKind::FieldValidation
    }

    fn handle(&self, ctx: &RequestContext, error: &AppError) -> Envelope<Value> {
        let message = validation_message(error);
        tracing::error!(
            method = %ctx.method(),
            path = %ctx.path(),
            error = ?error,
            "{}",
            message
        );
        Envelope::error(message)
    }
}

/// Generic message, detail only in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReferenceHandler;

impl ExceptionHandler for NullReferenceHandler {
    fn matches(&self, error: &AppError) -> bool {
        error.kind() == FailureKind::NullReference
    }

    fn handle(&self, ctx: &RequestContext, error: &AppError) -> Envelope<Value> {
        tracing::error!(
            method = %ctx.method(),
            path = %ctx.path(),
            error = ?error,
            "Null reference error: {}",
            error
        );
        Envelope::error(NULL_REFERENCE_MESSAGE)
    }
}

/// Catch-all; the message embeds the error's display form
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackHandler;

impl ExceptionHandler for FallbackHandler {
    fn matches(&self, _error: &AppError) -> bool {
        true
    }

    fn handle(&self, ctx: &RequestContext, error: &AppError) -> Envelope<Value> {
        tracing::error!(
            method = %ctx.method(),
            path = %ctx.path(),
            error = ?error,
            "Unknown error: {}",
            error
        );
        Envelope::error(format!("{}{}", UNKNOWN_ERROR_PREFIX, error))
    }
}

// ============================================================================
// Mapper
// ============================================================================

/// Ordered handler chain, first match wins
pub struct ExceptionMapper {
    handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl Default for ExceptionMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ExceptionMapper {
    /// Default chain: field validation, null reference, fallback
    pub fn new() -> Self {
        Self {
            handlers: vec![
                Box::new(FieldValidationHandler),
                Box::new(NullReferenceHandler),
                Box::new(FallbackHandler),
            ],
        }
    }

    /// Put `handler` in front of the chain
    pub fn with_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
        self.handlers.insert(0, Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn map(&self, ctx: &RequestContext, error: &AppError) -> Envelope<Value> {
        match self.handlers.iter().find(|h| h.matches(error)) {
            Some(handler) => handler.handle(ctx, error),
            None => FallbackHandler.handle(ctx, error),
        }
    }
}

// ============================================================================
// Message building
// ============================================================================

/// Client-facing description of one violation
///
/// Labels come from `schema`, falling back to the raw field name.
pub fn describe_violation(schema: Option<&Schema>, violation: &FieldViolation) -> String {
    let Some(field) = violation.field.as_deref() else {
        return violation.message.clone();
    };
    let label = schema.map_or(field, |s| s.label_of(field));
    match violation.rejected.as_deref() {
        Some(rejected) if !rejected.trim().is_empty() => {
            format!("{} value '{}': {}", label, rejected, violation.message)
        }
        _ => format!("{}: {}", label, violation.message),
    }
}

/// `"Data validation failed: [a, b]"`, or the bare prefix when nothing was reported
pub fn validation_message(error: &AppError) -> String {
    if error.violations().is_empty() {
        return VALIDATION_FAILED_MESSAGE.to_string();
    }
    let descriptions: Vec<String> = error
        .violations()
        .iter()
        .map(|v| describe_violation(error.schema(), v))
        .collect();
    format!("{}: [{}]", VALIDATION_FAILED_MESSAGE, descriptions.join(", "))
}

// ============================================================================
// Axum integration (feature-gated)
// ============================================================================

/// Error stashed in response extensions by `AppError::into_response`,
/// waiting for [`map_exceptions`] to format it
#[cfg(feature = "axum")]
#[derive(Debug, Clone)]
pub struct UnmappedError(pub std::sync::Arc<AppError>);

/// Middleware rewriting stashed errors into mapped envelopes
///
/// Install with `axum::middleware::from_fn_with_state(mapper, map_exceptions)`.
#[cfg(feature = "axum")]
pub async fn map_exceptions(
    axum::extract::State(mapper): axum::extract::State<std::sync::Arc<ExceptionMapper>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    let path = req
        .extensions()
        .get::<axum::extract::OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let ctx = RequestContext::new(req.method().as_str(), path);

    let mut response = next.run(req).await;
    match response.extensions_mut().remove::<UnmappedError>() {
        Some(UnmappedError(error)) => {
            let status = response.status();
            (status, axum::Json(mapper.map(&ctx, &error))).into_response()
        }
        None => response,
    }
}

/// Renders a caught panic as an unclassified envelope
///
/// Usable as `tower_http::catch_panic::CatchPanicLayer::custom(panic_envelope)`.
#[cfg(feature = "axum")]
pub fn panic_envelope(panic: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    use axum::response::IntoResponse;

    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    let error = AppError::unclassified(format!("panic: {}", detail));
    let envelope: Envelope<Value> =
        Envelope::error(format!("{}{}", UNKNOWN_ERROR_PREFIX, error));
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(envelope),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, LazyLock, Mutex};

    static BOOKING: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new("Booking")
            .field("check_in", "Check-in date")
            .field("check_out", "Check-out date")
            .unlabelled("room")
    });

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, captured.text())
    }

    fn ctx() -> RequestContext {
        RequestContext::new("POST", "/api/bookings")
    }

    #[test]
    fn test_field_validation_aggregates_both_labels() {
        let error = AppError::validation(vec![
            FieldViolation::field("check_in", None, "must not be empty"),
            FieldViolation::field("check_out", Some("2024-13-01".into()), "invalid format"),
        ])
        .with_schema(&BOOKING);

        let (envelope, logs) = with_logs(|| ExceptionMapper::new().map(&ctx(), &error));

        assert!(!envelope.is_success());
        assert_eq!(envelope.code(), "500");
        assert!(envelope.message().contains("Check-in date"));
        assert!(envelope.message().contains("Check-out date"));
        assert_eq!(
            envelope.message(),
            "Data validation failed: [Check-in date: must not be empty, \
             Check-out date value '2024-13-01': invalid format]"
        );
        assert!(logs.contains("/api/bookings"));
    }

    #[test]
    fn test_field_validation_without_label_uses_field_name() {
        let error = AppError::validation(vec![FieldViolation::field(
            "room",
            Some("   ".into()),
            "must not be blank",
        )])
        .with_schema(&BOOKING);

        let envelope = ExceptionMapper::new().map(&ctx(), &error);
        assert_eq!(
            envelope.message(),
            "Data validation failed: [room: must not be blank]"
        );
    }

    #[test]
    fn test_field_validation_without_schema_or_violations() {
        let error = AppError::validation(vec![FieldViolation::field(
            "guest",
            Some("x".into()),
            "unknown guest",
        )]);
        assert_eq!(
            validation_message(&error),
            "Data validation failed: [guest value 'x': unknown guest]"
        );

        let empty = AppError::validation(vec![]);
        assert_eq!(validation_message(&empty), "Data validation failed");
    }

    #[test]
    fn test_object_level_violation_uses_message_as_is() {
        let violation = FieldViolation::object("Check-out date: date order is incorrect");
        assert_eq!(
            describe_violation(Some(&BOOKING), &violation),
            "Check-out date: date order is incorrect"
        );
    }

    #[test]
    fn test_null_reference_hides_detail_but_logs_it() {
        let error = AppError::null_reference("room index 7 had no tariff");

        let (envelope, logs) = with_logs(|| ExceptionMapper::new().map(&ctx(), &error));

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), NULL_REFERENCE_MESSAGE);
        assert!(!envelope.message().contains("tariff"));
        assert!(logs.contains("room index 7 had no tariff"));
        assert!(logs.contains("/api/bookings"));
    }

    #[test]
    fn test_fallback_embeds_error_string_and_logs_it() {
        let io_err = std::io::Error::other("disk quota exceeded");
        let error = AppError::unclassified("Could not persist booking").with_source(io_err);

        let (envelope, logs) = with_logs(|| ExceptionMapper::new().map(&ctx(), &error));

        assert!(!envelope.is_success());
        assert_eq!(envelope.code(), "500");
        assert!(envelope.message().starts_with(UNKNOWN_ERROR_PREFIX));
        assert!(envelope.message().contains(&error.to_string()));
        assert!(logs.contains("disk quota exceeded"));
        assert!(logs.contains("/api/bookings"));
    }

    #[test]
    fn test_configuration_errors_fall_through_to_fallback() {
        let error = AppError::configuration("unknown sibling field `finish`");
        let envelope = ExceptionMapper::new().map(&ctx(), &error);
        assert!(envelope.message().contains("unknown sibling field `finish`"));
    }

    struct ConflictHandler;

    impl ExceptionHandler for ConflictHandler {
        fn matches(&self, error: &AppError) -> bool {
            error.message().contains("conflict")
        }

        fn handle(&self, _ctx: &RequestContext, _error: &AppError) -> Envelope<Value> {
            Envelope::error_code("409", "Booking conflict")
        }
    }

    #[test]
    fn test_custom_handler_takes_priority() {
        let mapper = ExceptionMapper::new().with_handler(ConflictHandler);
        assert_eq!(mapper.len(), 4);

        let envelope = mapper.map(&ctx(), &AppError::unclassified("slot conflict"));
        assert_eq!(envelope.code(), "409");

        let envelope = mapper.map(&ctx(), &AppError::unclassified("timeout"));
        assert_eq!(envelope.code(), "500");
    }
}
