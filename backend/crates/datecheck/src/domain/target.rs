//! Date Target Capability
//!
//! Types opt into date cross-field validation by exposing their schema,
//! their registered rules and a by-name field accessor.

use kernel::schema::Schema;

use super::constraint::DateRules;
use super::value::FieldValue;
use crate::error::DateCheckResult;

/// An object whose date fields can be cross-checked
///
/// Usage:
/// ```
/// use std::sync::LazyLock;
/// use datecheck::domain::constraint::{DateRules, FieldConstraint};
/// use datecheck::domain::target::DateTarget;
/// use datecheck::domain::value::FieldValue;
/// use datecheck::error::{DateCheckError, DateCheckResult};
/// use kernel::schema::Schema;
///
/// struct Leave {
///     from: Option<String>,
///     until: Option<String>,
/// }
///
/// static SCHEMA: LazyLock<Schema> =
///     LazyLock::new(|| Schema::new("Leave").field("from", "From").field("until", "Until"));
/// static RULES: LazyLock<DateCheckResult<DateRules>> = LazyLock::new(|| {
///     DateRules::for_schema(&SCHEMA, [FieldConstraint::new("until").before("from")])
/// });
///
/// impl DateTarget for Leave {
///     fn schema() -> &'static Schema {
///         &SCHEMA
///     }
///
///     fn rules() -> DateCheckResult<&'static DateRules> {
///         RULES.as_ref().map_err(Clone::clone)
///     }
///
///     fn field_value(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "from" => Some(self.from.clone().into()),
///             "until" => Some(self.until.clone().into()),
///             _ => None,
///         }
///     }
/// }
/// # assert_eq!(Leave::rules().unwrap().len(), 1);
/// ```
pub trait DateTarget {
    /// Field labels of the type
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Rules registered for the type, in evaluation order
    fn rules() -> DateCheckResult<&'static DateRules>
    where
        Self: Sized;

    /// Current value of `name`; `None` when the type has no such field
    fn field_value(&self, name: &str) -> Option<FieldValue>;
}
