//! Date Check Error Types
//!
//! Configuration errors raised by the validator. These are programmer
//! mistakes (a rule names a field that does not exist, a pattern the
//! validator cannot read, a value that does not fit its pattern) and are
//! never turned into a silent pass or fail.

use kernel::error::app_error::AppError;
use thiserror::Error;

/// Date-check result type alias
pub type DateCheckResult<T> = Result<T, DateCheckError>;

/// Date-check configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateCheckError {
    /// A rule or sibling reference names a field the object does not have
    #[error("Unknown field `{field}` on `{type_name}`")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// Pattern contains letters with no date/time meaning
    #[error("Invalid date pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Value cannot be read under its field's pattern
    #[error("Value `{value}` does not match date pattern `{pattern}`")]
    Unparsable { value: String, pattern: String },
}

impl DateCheckError {
    /// Log the error; all variants are configuration mistakes
    fn log(&self) {
        tracing::error!(error = %self, "Date check configuration error");
    }
}

impl From<DateCheckError> for AppError {
    fn from(err: DateCheckError) -> Self {
        err.log();
        AppError::configuration(err.to_string()).with_source(err)
    }
}
