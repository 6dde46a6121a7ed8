//! Validation Outcome
//!
//! Result of checking one object. Produced once per validation and
//! consumed immediately by the caller.

use serde::Serialize;

use super::constraint::CheckKind;

/// Outcome of a date cross-field validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Field whose rule failed
    pub field: Option<String>,
    /// Check that failed
    #[serde(skip)]
    pub check: Option<CheckKind>,
    /// `"{label}: {message}"`
    pub failure_message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            field: None,
            check: None,
            failure_message: None,
        }
    }

    pub fn invalid(field: impl Into<String>, check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            field: Some(field.into()),
            check: Some(check),
            failure_message: Some(message.into()),
        }
    }
}
