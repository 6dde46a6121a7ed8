//! Field Values
//!
//! What a validated object hands back for one of its date fields.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use derive_more::Display;

use super::pattern::DatePattern;
use crate::error::DateCheckResult;

/// Current value of a date field
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldValue {
    /// No value (`None`, or an empty string)
    #[display("<empty>")]
    Empty,
    /// Wall-clock timestamp, taken as written in the validator's time zone
    #[display("{_0}")]
    Instant(NaiveDateTime),
    /// Zone-aware instant; read in the validator's time zone
    #[display("{_0}")]
    Aware(DateTime<Utc>),
    /// Raw text, read with the field's pattern
    #[display("{_0}")]
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Instant(_) | FieldValue::Aware(_) => false,
            FieldValue::Text(text) => text.is_empty(),
        }
    }

    /// Resolve to a wall-clock timestamp in `zone`; `None` when empty
    pub fn resolve(
        &self,
        pattern: &DatePattern,
        zone: &FixedOffset,
    ) -> DateCheckResult<Option<NaiveDateTime>> {
        match self {
            FieldValue::Empty => Ok(None),
            FieldValue::Instant(at) => Ok(Some(*at)),
            FieldValue::Aware(at) => Ok(Some(at.with_timezone(zone).naive_local())),
            FieldValue::Text(text) if text.is_empty() => Ok(None),
            FieldValue::Text(text) => pattern.parse_value(text).map(Some),
        }
    }

    /// Text as submitted, for format checks and error reports
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Instant(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Instant(value.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(value: NaiveTime) -> Self {
        FieldValue::Instant(NaiveDate::default().and_time(value))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(value: DateTime<Tz>) -> Self {
        FieldValue::Aware(value.with_timezone(&Utc))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::from(None::<String>).is_empty());
        assert!(!FieldValue::from("2024-01-10").is_empty());
    }

    #[test]
    fn test_conversions() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(
            FieldValue::from(date),
            FieldValue::Instant(date.and_hms_opt(0, 0, 0).unwrap())
        );

        let time = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        assert_eq!(
            FieldValue::from(time),
            FieldValue::Instant(
                NaiveDate::from_ymd_opt(1970, 1, 1)
                    .unwrap()
                    .and_time(time)
            )
        );

        let utc = Utc.with_ymd_and_hms(2024, 1, 10, 0, 30, 0).unwrap();
        let shanghai = utc.with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap());
        assert_eq!(FieldValue::from(shanghai), FieldValue::Aware(utc));
    }

    #[test]
    fn test_resolve() {
        let pattern = DatePattern::default();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(FieldValue::Empty.resolve(&pattern, &utc).unwrap(), None);
        assert_eq!(FieldValue::from("").resolve(&pattern, &utc).unwrap(), None);
        assert_eq!(
            FieldValue::from("2024-01-10").resolve(&pattern, &utc).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
        );
        assert!(FieldValue::from("Jan 10").resolve(&pattern, &utc).is_err());
    }

    #[test]
    fn test_aware_values_resolve_in_requested_zone() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm").unwrap();
        let value = FieldValue::from(Utc.with_ymd_and_hms(2024, 1, 9, 20, 0, 0).unwrap());
        let gmt8 = FixedOffset::east_opt(8 * 3600).unwrap();

        assert_eq!(
            value.resolve(&pattern, &gmt8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(4, 0, 0)
        );
        // naive values are not shifted
        let naive = FieldValue::from(
            NaiveDate::from_ymd_opt(2024, 1, 9)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
        );
        assert_eq!(
            naive.resolve(&pattern, &gmt8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 9)
                .unwrap()
                .and_hms_opt(20, 0, 0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Empty.to_string(), "<empty>");
        assert_eq!(FieldValue::from("2024-01-10").to_string(), "2024-01-10");
    }
}
