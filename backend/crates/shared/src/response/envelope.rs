//! Response Envelope
//!
//! Every JSON reply, successful or not, is wrapped in an [`Envelope`]:
//!
//! ```json
//! { "success": true, "message": "", "code": "200", "result": {...}, "timestamp": 1704873600000 }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::code::ResultCode;

/// Uniform reply wrapper
///
/// Built fresh for each reply through one of the factories; fields are
/// read-only afterwards.
///
/// ## Examples
/// ```rust
/// use kernel::response::envelope::Envelope;
///
/// let ok = Envelope::ok_data(42);
/// assert!(ok.is_success());
/// assert_eq!(ok.code(), "200");
/// assert_eq!(ok.result(), Some(&42));
///
/// let err: Envelope<()> = Envelope::error("Slot already taken");
/// assert!(!err.is_success());
/// assert_eq!(err.code(), "500");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    success: bool,
    message: String,
    code: String,
    result: Option<T>,
    timestamp: i64,
    #[serde(skip)]
    onl_table: Option<String>,
}

impl Envelope<String> {
    /// Success whose result is the message itself
    pub fn ok_echo(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::build(true, ResultCode::Success.into(), message.clone(), Some(message))
    }
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            success: true,
            message: String::new(),
            code: ResultCode::Uninitialized.into(),
            result: None,
            timestamp: now_ms(),
            onl_table: None,
        }
    }
}

impl<T> Envelope<T> {
    // ========================================================================
    // Success factories
    // ========================================================================

    pub fn ok() -> Self {
        Self::build(true, ResultCode::Success.into(), String::new(), None)
    }

    /// Success with a message and no payload; see [`Envelope::ok_echo`]
    /// for a reply that also returns the message as its result
    pub fn ok_msg(message: impl Into<String>) -> Self {
        Self::build(true, ResultCode::Success.into(), message.into(), None)
    }

    pub fn ok_data(data: T) -> Self {
        Self::build(true, ResultCode::Success.into(), String::new(), Some(data))
    }

    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self::build(true, ResultCode::Success.into(), message.into(), Some(data))
    }

    // ========================================================================
    // Error factories
    // ========================================================================

    pub fn error(message: impl Into<String>) -> Self {
        Self::error_code(ResultCode::Error, message)
    }

    pub fn error_with(message: impl Into<String>, data: T) -> Self {
        Self::build(false, ResultCode::Error.into(), message.into(), Some(data))
    }

    /// Error carrying a caller-chosen code
    pub fn error_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(false, code.into(), message.into(), None)
    }

    fn build(success: bool, code: String, message: String, result: Option<T>) -> Self {
        Self {
            success,
            message,
            code,
            result,
            ..Self::default()
        }
    }

    // ========================================================================
    // Consuming builders
    // ========================================================================

    /// Turn into a success reply, keeping the payload
    pub fn into_success(self, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ResultCode::Success.into(),
            message: message.into(),
            ..self
        }
    }

    /// Turn into an error reply, keeping the payload
    pub fn into_error(self, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: ResultCode::Error.into(),
            message: message.into(),
            ..self
        }
    }

    /// Attach the internal table tag (never serialized)
    pub fn with_onl_table(mut self, table: impl Into<String>) -> Self {
        self.onl_table = Some(table.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<T> {
        self.result
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn onl_table(&self) -> Option<&str> {
        self.onl_table.as_deref()
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
