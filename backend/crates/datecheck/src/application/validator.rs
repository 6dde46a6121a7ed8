//! Date Cross-Field Validator
//!
//! Walks a type's registered rules in declaration order and stops at the
//! first failure. For each non-empty field:
//! 1. format check (opt-in, text values only)
//! 2. `before` sibling ordering
//! 3. `after` sibling ordering
//! 4. future / future-or-now against the clock
//! 5. past / past-or-now against the clock
//!
//! An empty field fails its null check unless the rule allows null; an empty
//! sibling skips the ordering check that references it. With format checks
//! on, so does a sibling whose text has the wrong shape; its own rule
//! reports it.

use chrono::{FixedOffset, NaiveDateTime};
use kernel::clock::{Clock, SystemClock};
use kernel::error::app_error::AppResult;
use kernel::schema::Schema;
use kernel::validate::{FieldViolation, Violations};
use std::sync::Arc;

use super::config::DateCheckConfig;
use crate::domain::constraint::{CheckKind, FieldConstraint};
use crate::domain::outcome::ValidationOutcome;
use crate::domain::pattern::DatePattern;
use crate::domain::target::DateTarget;
use crate::domain::value::FieldValue;
use crate::error::{DateCheckError, DateCheckResult};

/// `true` when `later` comes after `earlier` at the pattern's precision
///
/// Both sides are truncated through `pattern` first, so with `HH:mm:ss` two
/// timestamps on different days but at the same time of day are equal.
/// Equal values pass only when `allow_equal` is set.
pub fn compare(
    earlier: &NaiveDateTime,
    later: &NaiveDateTime,
    allow_equal: bool,
    pattern: &DatePattern,
) -> DateCheckResult<bool> {
    let earlier = pattern.truncate(earlier)?;
    let later = pattern.truncate(later)?;
    Ok(later > earlier || (allow_equal && later == earlier))
}

/// Stateless validator; holds only the clock and the zone "now" is read in
#[derive(Clone)]
pub struct DateTimeValidator {
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl std::fmt::Debug for DateTimeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimeValidator")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl DateTimeValidator {
    pub fn new(clock: Arc<dyn Clock>, offset: FixedOffset) -> Self {
        Self { clock, offset }
    }

    pub fn from_config(clock: Arc<dyn Clock>, config: &DateCheckConfig) -> AppResult<Self> {
        Ok(Self::new(clock, config.offset()?))
    }

    /// Wall-clock validator
    pub fn system(config: &DateCheckConfig) -> AppResult<Self> {
        Self::from_config(Arc::new(SystemClock), config)
    }

    /// Current time in the configured zone
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now().with_timezone(&self.offset).naive_local()
    }

    /// Check `target` against its registered rules
    ///
    /// Returns `Err` only for configuration mistakes: unknown fields,
    /// unreadable patterns, values that do not fit their pattern.
    pub fn validate<T: DateTarget>(&self, target: &T) -> DateCheckResult<ValidationOutcome> {
        let schema = T::schema();

        for rule in T::rules()?.iter() {
            let c = rule.constraint();
            let pattern = rule.pattern();
            let value = read(target, schema, c.field())?;

            if value.is_empty() {
                if !c.allows_null() {
                    return Ok(failure(schema, c, CheckKind::Null));
                }
                continue;
            }

            if c.checks_format()
                && let Some(text) = value.as_text()
                && !pattern.matches(text)
            {
                return Ok(failure(schema, c, CheckKind::Format));
            }

            let Some(this) = value.resolve(pattern, &self.offset)? else {
                continue;
            };

            if let Some(sibling) = c.before_field()
                && let Some(other) = read_sibling(target, schema, c, pattern, &self.offset, sibling)?
                && !compare(&other, &this, c.allows_equal_before(), pattern)?
            {
                return Ok(failure(schema, c, CheckKind::Before));
            }

            if let Some(sibling) = c.after_field()
                && let Some(other) = read_sibling(target, schema, c, pattern, &self.offset, sibling)?
                && !compare(&this, &other, c.allows_equal_after(), pattern)?
            {
                return Ok(failure(schema, c, CheckKind::After));
            }

            if let Some(check) = c.future_check() {
                let now = self.now();
                if !compare(&now, &this, check == CheckKind::FutureOrNow, pattern)? {
                    return Ok(failure(schema, c, check));
                }
            }

            if let Some(check) = c.past_check() {
                let now = self.now();
                if !compare(&this, &now, check == CheckKind::PastOrNow, pattern)? {
                    return Ok(failure(schema, c, check));
                }
            }
        }

        Ok(ValidationOutcome::valid())
    }

    /// Add an object-level violation to `violations` when `target` fails
    pub fn check_into<T: DateTarget>(
        &self,
        target: &T,
        violations: &mut Violations,
    ) -> DateCheckResult<()> {
        let outcome = self.validate(target)?;
        if let Some(message) = outcome.failure_message {
            violations.push(FieldViolation::object(message));
        }
        Ok(())
    }

    /// `Ok(())` when valid, otherwise a field-validation `AppError`;
    /// configuration mistakes become `AppError`s of kind `Configuration`
    pub fn validate_or_reject<T: DateTarget>(&self, target: &T) -> AppResult<()> {
        let mut violations = Violations::new();
        self.check_into(target, &mut violations)?;
        violations.into_result(T::schema())
    }
}

fn read<T: DateTarget>(target: &T, schema: &Schema, field: &str) -> DateCheckResult<FieldValue> {
    target
        .field_value(field)
        .ok_or_else(|| DateCheckError::UnknownField {
            type_name: schema.name(),
            field: field.to_string(),
        })
}

fn read_sibling<T: DateTarget>(
    target: &T,
    schema: &Schema,
    c: &FieldConstraint,
    pattern: &DatePattern,
    zone: &FixedOffset,
    sibling: &str,
) -> DateCheckResult<Option<NaiveDateTime>> {
    let value = read(target, schema, sibling)?;
    if c.checks_format()
        && let Some(text) = value.as_text()
        && !text.is_empty()
        && !pattern.matches(text)
    {
        return Ok(None);
    }
    value.resolve(pattern, zone)
}

fn failure(schema: &Schema, c: &FieldConstraint, check: CheckKind) -> ValidationOutcome {
    tracing::debug!(
        target_type = schema.name(),
        field = c.field(),
        check = %check,
        "Date check failed"
    );
    let message = format!("{}: {}", schema.label_of(c.field()), c.message_for(check));
    ValidationOutcome::invalid(c.field(), check, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_compare_strict_and_inclusive() {
        let pattern = DatePattern::default();
        let a = at(2024, 1, 5, 0, 0, 0);
        let b = at(2024, 1, 10, 0, 0, 0);

        assert!(compare(&a, &b, false, &pattern).unwrap());
        assert!(!compare(&b, &a, true, &pattern).unwrap());
        assert!(compare(&a, &a, true, &pattern).unwrap());
        assert!(!compare(&a, &a, false, &pattern).unwrap());
    }

    #[test]
    fn test_compare_truncates_to_pattern() {
        let days = DatePattern::default();
        let morning = at(2024, 1, 10, 8, 0, 0);
        let evening = at(2024, 1, 10, 20, 0, 0);
        assert!(!compare(&morning, &evening, false, &days).unwrap());
        assert!(compare(&morning, &evening, true, &days).unwrap());

        let clock = DatePattern::parse("HH:mm:ss").unwrap();
        let monday = at(2024, 1, 8, 9, 0, 0);
        let friday = at(2024, 1, 12, 9, 0, 0);
        assert!(!compare(&monday, &friday, false, &clock).unwrap());
        assert!(compare(&monday, &friday, true, &clock).unwrap());
        // later day, earlier time of day
        assert!(!compare(&at(2024, 1, 8, 10, 0, 0), &friday, true, &clock).unwrap());
    }
}
