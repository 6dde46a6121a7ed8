//! Canonical result codes carried in the envelope's `code` field

use serde::{Serialize, Serializer};

/// Result code written into every [`Envelope`](super::envelope::Envelope)
///
/// ## Examples
/// ```rust
/// use kernel::response::code::ResultCode;
///
/// assert_eq!(ResultCode::Success.as_str(), "200");
/// assert_eq!(ResultCode::Error.as_str(), "500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// Envelope built without a factory
    Uninitialized,
    /// Every `ok*` factory
    Success,
    /// Every `error*` factory without an explicit code
    Error,
}

impl ResultCode {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResultCode::Uninitialized => "0",
            ResultCode::Success => "200",
            ResultCode::Error => "500",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<ResultCode> for String {
    fn from(code: ResultCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ResultCode::Uninitialized.as_str(), "0");
        assert_eq!(ResultCode::Success.to_string(), "200");
        assert_eq!(String::from(ResultCode::Error), "500");
    }

    #[test]
    fn test_serializes_as_string() {
        assert_eq!(serde_json::to_string(&ResultCode::Success).unwrap(), r#""200""#);
    }
}
