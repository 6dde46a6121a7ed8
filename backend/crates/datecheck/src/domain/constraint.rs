//! Date Field Constraints
//!
//! A [`FieldConstraint`] binds one date field to a sibling field, to the
//! current time, or to a nullability requirement. [`DateRules`] is the
//! ordered, compiled list registered once per validated type.

use derive_more::Display;
use kernel::schema::Schema;
use std::borrow::Cow;

use super::pattern::{DEFAULT_PATTERN, DatePattern};
use crate::error::{DateCheckError, DateCheckResult};

/// Which check a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CheckKind {
    #[display("null")]
    Null,
    #[display("format")]
    Format,
    #[display("before")]
    Before,
    #[display("after")]
    After,
    #[display("future")]
    Future,
    #[display("future_or_now")]
    FutureOrNow,
    #[display("past")]
    Past,
    #[display("past_or_now")]
    PastOrNow,
}

// ============================================================================
// Messages
// ============================================================================

/// Failure messages, one per check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMessages {
    null: Cow<'static, str>,
    format: Cow<'static, str>,
    before: Cow<'static, str>,
    after: Cow<'static, str>,
    future: Cow<'static, str>,
    future_or_now: Cow<'static, str>,
    past: Cow<'static, str>,
    past_or_now: Cow<'static, str>,
}

impl Default for ConstraintMessages {
    fn default() -> Self {
        Self {
            null: Cow::Borrowed("must not be empty"),
            format: Cow::Borrowed("invalid date format"),
            before: Cow::Borrowed("date order is incorrect"),
            after: Cow::Borrowed("date order is incorrect"),
            future: Cow::Borrowed("must be later than the current time"),
            future_or_now: Cow::Borrowed("must be later than or equal to the current time"),
            past: Cow::Borrowed("must be earlier than the current time"),
            past_or_now: Cow::Borrowed("must be earlier than or equal to the current time"),
        }
    }
}

impl ConstraintMessages {
    pub fn get(&self, check: CheckKind) -> &str {
        match check {
            CheckKind::Null => &self.null,
            CheckKind::Format => &self.format,
            CheckKind::Before => &self.before,
            CheckKind::After => &self.after,
            CheckKind::Future => &self.future,
            CheckKind::FutureOrNow => &self.future_or_now,
            CheckKind::Past => &self.past,
            CheckKind::PastOrNow => &self.past_or_now,
        }
    }

    pub fn with(mut self, check: CheckKind, message: impl Into<Cow<'static, str>>) -> Self {
        let slot = match check {
            CheckKind::Null => &mut self.null,
            CheckKind::Format => &mut self.format,
            CheckKind::Before => &mut self.before,
            CheckKind::After => &mut self.after,
            CheckKind::Future => &mut self.future,
            CheckKind::FutureOrNow => &mut self.future_or_now,
            CheckKind::Past => &mut self.past,
            CheckKind::PastOrNow => &mut self.past_or_now,
        };
        *slot = message.into();
        self
    }
}

// ============================================================================
// FieldConstraint
// ============================================================================

/// Rules for one date field
///
/// Naming follows the field's point of view: `before(x)` means field `x`
/// comes before this one, `after(x)` means field `x` comes after it.
///
/// ```
/// use datecheck::domain::constraint::FieldConstraint;
///
/// let end_date = FieldConstraint::new("end_date")
///     .before("start_date")
///     .future_or_now();
/// assert_eq!(end_date.before_field(), Some("start_date"));
/// assert!(!end_date.allows_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConstraint {
    field: Cow<'static, str>,
    pattern: Cow<'static, str>,
    before: Option<Cow<'static, str>>,
    after: Option<Cow<'static, str>>,
    allow_null: bool,
    future: bool,
    future_or_now: bool,
    past: bool,
    past_or_now: bool,
    allow_equal_before: bool,
    allow_equal_after: bool,
    check_format: bool,
    messages: ConstraintMessages,
}

impl FieldConstraint {
    pub fn new(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            pattern: Cow::Borrowed(DEFAULT_PATTERN),
            before: None,
            after: None,
            allow_null: false,
            future: false,
            future_or_now: false,
            past: false,
            past_or_now: false,
            allow_equal_before: true,
            allow_equal_after: true,
            check_format: false,
            messages: ConstraintMessages::default(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Pattern values are read and compared with (default `yyyy-MM-dd`)
    pub fn pattern(mut self, pattern: impl Into<Cow<'static, str>>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sibling that must not come after this field
    pub fn before(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.before = Some(field.into());
        self
    }

    /// Sibling that must not come before this field
    pub fn after(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.after = Some(field.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    pub fn future(mut self) -> Self {
        self.future = true;
        self
    }

    pub fn future_or_now(mut self) -> Self {
        self.future_or_now = true;
        self
    }

    pub fn past(mut self) -> Self {
        self.past = true;
        self
    }

    pub fn past_or_now(mut self) -> Self {
        self.past_or_now = true;
        self
    }

    /// Equal to the `before` sibling fails
    pub fn strict_before(mut self) -> Self {
        self.allow_equal_before = false;
        self
    }

    /// Equal to the `after` sibling fails
    pub fn strict_after(mut self) -> Self {
        self.allow_equal_after = false;
        self
    }

    /// Text values must have exactly the pattern's shape
    pub fn check_format(mut self) -> Self {
        self.check_format = true;
        self
    }

    pub fn messages(mut self, messages: ConstraintMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn message(mut self, check: CheckKind, message: impl Into<Cow<'static, str>>) -> Self {
        self.messages = self.messages.with(check, message);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn pattern_str(&self) -> &str {
        &self.pattern
    }

    pub fn before_field(&self) -> Option<&str> {
        self.before.as_deref()
    }

    pub fn after_field(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    pub fn allows_equal_before(&self) -> bool {
        self.allow_equal_before
    }

    pub fn allows_equal_after(&self) -> bool {
        self.allow_equal_after
    }

    pub fn checks_format(&self) -> bool {
        self.check_format
    }

    /// `Some(check)` when a future check is configured; `FutureOrNow` wins
    /// over `Future` when both are set
    pub fn future_check(&self) -> Option<CheckKind> {
        if self.future_or_now {
            Some(CheckKind::FutureOrNow)
        } else if self.future {
            Some(CheckKind::Future)
        } else {
            None
        }
    }

    /// `Some(check)` when a past check is configured; `PastOrNow` wins
    pub fn past_check(&self) -> Option<CheckKind> {
        if self.past_or_now {
            Some(CheckKind::PastOrNow)
        } else if self.past {
            Some(CheckKind::Past)
        } else {
            None
        }
    }

    pub fn message_for(&self, check: CheckKind) -> &str {
        self.messages.get(check)
    }
}

// ============================================================================
// DateRules
// ============================================================================

/// A constraint with its compiled pattern
#[derive(Debug, Clone)]
pub struct DateRule {
    constraint: FieldConstraint,
    pattern: DatePattern,
}

impl DateRule {
    pub fn constraint(&self) -> &FieldConstraint {
        &self.constraint
    }

    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }
}

/// Ordered date rules of one validated type
///
/// Registration compiles every pattern and, with [`DateRules::for_schema`],
/// checks that every referenced field exists.
#[derive(Debug, Clone, Default)]
pub struct DateRules {
    rules: Vec<DateRule>,
}

impl DateRules {
    pub fn new(constraints: impl IntoIterator<Item = FieldConstraint>) -> DateCheckResult<Self> {
        let rules = constraints
            .into_iter()
            .map(|constraint| {
                let pattern = DatePattern::parse(constraint.pattern_str())?;
                Ok(DateRule {
                    constraint,
                    pattern,
                })
            })
            .collect::<DateCheckResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Like [`DateRules::new`], also rejecting names missing from `schema`
    pub fn for_schema(
        schema: &Schema,
        constraints: impl IntoIterator<Item = FieldConstraint>,
    ) -> DateCheckResult<Self> {
        let rules = Self::new(constraints)?;
        for rule in &rules.rules {
            let c = &rule.constraint;
            let names = std::iter::once(c.field())
                .chain(c.before_field())
                .chain(c.after_field());
            for name in names {
                if !schema.has_field(name) {
                    return Err(DateCheckError::UnknownField {
                        type_name: schema.name(),
                        field: name.to_string(),
                    });
                }
            }
        }
        Ok(rules)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
