//! Request validation primitives
//!
//! [`Violations`] collects every rule a request object breaks so they can be
//! reported together; [`Validate`] is implemented by request types and is
//! what extractors call after deserialization.

use serde::Serialize;

use crate::error::app_error::{AppError, AppResult};
use crate::schema::Schema;

/// One broken rule
///
/// `field` is `None` for object-level rules (e.g. cross-field checks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: Option<String>,
    pub rejected: Option<String>,
    pub message: String,
}

impl FieldViolation {
    /// Violation bound to a field, with the value that was rejected
    pub fn field(
        field: impl Into<String>,
        rejected: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            rejected,
            message: message.into(),
        }
    }

    /// Violation of a rule that spans the whole object
    pub fn object(message: impl Into<String>) -> Self {
        Self {
            field: None,
            rejected: None,
            message: message.into(),
        }
    }

    pub fn is_object_level(&self) -> bool {
        self.field.is_none()
    }
}

/// Accumulates violations for one request object
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.items.push(violation);
    }

    pub fn reject(
        &mut self,
        field: impl Into<String>,
        rejected: Option<String>,
        message: impl Into<String>,
    ) {
        self.push(FieldViolation::field(field, rejected, message));
    }

    pub fn object(&mut self, message: impl Into<String>) {
        self.push(FieldViolation::object(message));
    }

    /// Reject `field` when `value` is `None`
    pub fn require<T>(&mut self, field: &str, value: &Option<T>, message: &str) {
        if value.is_none() {
            self.reject(field, None, message);
        }
    }

    /// Reject `field` when `value` is blank
    pub fn require_non_blank(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.reject(field, Some(value.to_string()), message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.items
    }

    /// `Ok(())` when nothing was collected, otherwise a field-validation error
    /// labelled through `schema`
    pub fn into_result(self, schema: &'static Schema) -> AppResult<()> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.items).with_schema(schema))
        }
    }
}

impl Extend<FieldViolation> for Violations {
    fn extend<I: IntoIterator<Item = FieldViolation>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// Implemented by request types checked before business logic runs
pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::FailureKind;
    use std::sync::LazyLock;

    static ORDER: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new("Order")
            .field("customer", "Customer")
            .field("delivery_date", "Delivery date")
    });

    #[test]
    fn test_empty_collector_is_ok() {
        let violations = Violations::new();
        assert!(violations.is_empty());
        assert!(violations.into_result(&ORDER).is_ok());
    }

    #[test]
    fn test_require_and_blank_checks() {
        let mut violations = Violations::new();
        violations.require::<String>("delivery_date", &None, "must not be null");
        violations.require_non_blank("customer", "   ", "must not be blank");
        violations.require_non_blank("customer", "Alice", "must not be blank");

        assert_eq!(violations.len(), 2);
        let items = violations.into_vec();
        assert_eq!(items[0].field.as_deref(), Some("delivery_date"));
        assert_eq!(items[0].rejected, None);
        assert_eq!(items[1].rejected.as_deref(), Some("   "));
    }

    #[test]
    fn test_into_result_builds_field_validation_error() {
        let mut violations = Violations::new();
        violations.object("delivery before order");
        violations.reject("customer", Some("?".into()), "invalid");

        let err = violations.into_result(&ORDER).unwrap_err();
        assert_eq!(err.kind(), FailureKind::FieldValidation);
        assert_eq!(err.violations().len(), 2);
        assert!(err.violations()[0].is_object_level());
        assert_eq!(err.schema().map(Schema::name), Some("Order"));
    }
}
