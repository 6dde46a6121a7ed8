//! API DTOs (Data Transfer Objects)

use kernel::error::app_error::AppResult;
use kernel::schema::Schema;
use kernel::validate::{Validate, Violations};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::domain::constraint::{DateRules, FieldConstraint};
use crate::domain::target::DateTarget;
use crate::domain::value::FieldValue;
use crate::error::DateCheckResult;

const TIME_PATTERN: &str = "HH:mm:ss";
const TITLE_MAX_CHARS: usize = 100;

/// Request for POST /api/schedule
///
/// Dates are `yyyy-MM-dd`, times `HH:mm:ss`. The end must not precede the
/// start and the end date must not lie in the past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub title: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

static SCHEDULE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("ScheduleRequest")
        .field("title", "Title")
        .field("start_date", "Start date")
        .field("start_time", "Start time")
        .field("end_date", "End date")
        .field("end_time", "End time")
});

static SCHEDULE_RULES: LazyLock<DateCheckResult<DateRules>> = LazyLock::new(|| {
    DateRules::for_schema(
        &SCHEDULE_SCHEMA,
        [
            FieldConstraint::new("start_date")
                .after("end_date")
                .check_format(),
            FieldConstraint::new("start_time")
                .after("end_time")
                .pattern(TIME_PATTERN)
                .check_format(),
            FieldConstraint::new("end_date")
                .before("start_date")
                .future_or_now()
                .check_format(),
            FieldConstraint::new("end_time")
                .before("start_time")
                .pattern(TIME_PATTERN)
                .check_format(),
        ],
    )
});

impl DateTarget for ScheduleRequest {
    fn schema() -> &'static Schema {
        &SCHEDULE_SCHEMA
    }

    fn rules() -> DateCheckResult<&'static DateRules> {
        SCHEDULE_RULES.as_ref().map_err(Clone::clone)
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "start_date" => &self.start_date,
            "start_time" => &self.start_time,
            "end_date" => &self.end_date,
            "end_time" => &self.end_time,
            _ => return None,
        };
        Some(value.as_ref().into())
    }
}

impl Validate for ScheduleRequest {
    fn validate(&self) -> AppResult<()> {
        let mut violations = Violations::new();
        violations.require_non_blank("title", &self.title, "must not be blank");
        if self.title.chars().count() > TITLE_MAX_CHARS {
            violations.reject(
                "title",
                None,
                format!("must be at most {} characters", TITLE_MAX_CHARS),
            );
        }
        violations.into_result(&SCHEDULE_SCHEMA)
    }
}
