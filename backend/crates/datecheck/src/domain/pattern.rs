//! Date Pattern Value Object
//!
//! Reads `SimpleDateFormat`-style patterns (`yyyy-MM-dd`, `HH:mm:ss`, ...)
//! and translates them to chrono strftime items.
//!
//! A pattern also defines the precision values are compared at: formatting
//! a timestamp through the pattern and reading it back drops every
//! component the pattern does not mention. Missing components read back as
//! 1970-01-01 00:00:00.000.

use chrono::NaiveDateTime;
use chrono::format::{self, Item, Parsed, StrftimeItems};
use std::fmt;
use std::str::FromStr;

use crate::error::{DateCheckError, DateCheckResult};

/// Pattern used when a rule does not name one
pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd";

/// Which components a pattern mentions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Components {
    year: bool,
    month: bool,
    day: bool,
    hour: bool,
    twelve_hour: bool,
    am_pm: bool,
    minute: bool,
    second: bool,
}

/// A validated date/time pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
    components: Components,
}

impl DatePattern {
    /// Parse a `SimpleDateFormat`-style pattern
    ///
    /// Supported letters: `y`, `M`, `d`, `H`, `h`, `m`, `s`, `SSS`, `a`.
    /// Text in single quotes is literal, `''` is a quote. Any other
    /// non-letter is literal.
    pub fn parse(pattern: &str) -> DateCheckResult<Self> {
        let invalid = |reason: String| DateCheckError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut components = Components::default();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                // `''` outside a quoted run is a literal quote
                if chars.get(i + 1) == Some(&'\'') {
                    strftime.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err(invalid("unterminated quote".to_string())),
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            strftime.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(&lit) => {
                            push_literal(&mut strftime, lit);
                            i += 1;
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut strftime, c);
                i += 1;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&x| x == c).count();
            let directive = match (c, run) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', 1) => "%-m",
                ('M', 2) => "%m",
                ('M', 3) => "%b",
                ('M', _) => "%B",
                ('d', 1) => "%-d",
                ('d', _) => "%d",
                ('H', 1) => "%-H",
                ('H', _) => "%H",
                ('h', 1) => "%-I",
                ('h', _) => "%I",
                ('m', 1) => "%-M",
                ('m', _) => "%M",
                ('s', 1) => "%-S",
                ('s', _) => "%S",
                ('S', 3) => "%3f",
                ('a', _) => "%p",
                _ => {
                    return Err(invalid(format!(
                        "unsupported letter run `{}`",
                        c.to_string().repeat(run)
                    )));
                }
            };

            match c {
                'y' => components.year = true,
                'M' => components.month = true,
                'd' => components.day = true,
                'H' => components.hour = true,
                'h' => {
                    components.hour = true;
                    components.twelve_hour = true;
                }
                'm' => components.minute = true,
                's' => components.second = true,
                'a' => components.am_pm = true,
                _ => {}
            }

            strftime.push_str(directive);
            i += run;
        }

        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(invalid("cannot be translated".to_string()));
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime,
            components,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The translated chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Render a timestamp through the pattern
    pub fn format(&self, value: &NaiveDateTime) -> String {
        value
            .format_with_items(StrftimeItems::new(&self.strftime))
            .to_string()
    }

    /// Read text written in this pattern
    pub fn parse_value(&self, text: &str) -> DateCheckResult<NaiveDateTime> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.strftime))
            .map_err(|_| self.unparsable(text))?;
        self.fill_missing(&mut parsed)
            .map_err(|_| self.unparsable(text))?;
        parsed
            .to_naive_datetime_with_offset(0)
            .map_err(|_| self.unparsable(text))
    }

    /// Reduce a timestamp to the pattern's precision
    pub fn truncate(&self, value: &NaiveDateTime) -> DateCheckResult<NaiveDateTime> {
        self.parse_value(&self.format(value))
    }

    /// Strict shape check: readable under the pattern and written exactly as
    /// the pattern would render the value (letter case aside)
    pub fn matches(&self, text: &str) -> bool {
        self.parse_value(text)
            .is_ok_and(|value| self.format(&value).eq_ignore_ascii_case(text))
    }

    fn fill_missing(&self, parsed: &mut Parsed) -> format::ParseResult<()> {
        let c = self.components;
        if !c.year {
            parsed.set_year(1970)?;
        }
        if !c.month {
            parsed.set_month(1)?;
        }
        if !c.day {
            parsed.set_day(1)?;
        }
        if !c.hour {
            parsed.set_hour(0)?;
        } else if c.twelve_hour && !c.am_pm {
            parsed.set_ampm(false)?;
        }
        if !c.minute {
            parsed.set_minute(0)?;
        }
        if !c.second {
            parsed.set_second(0)?;
        }
        Ok(())
    }

    fn unparsable(&self, text: &str) -> DateCheckError {
        DateCheckError::Unparsable {
            value: text.to_string(),
            pattern: self.source.clone(),
        }
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_PATTERN.to_string(),
            strftime: "%Y-%m-%d".to_string(),
            components: Components {
                year: true,
                month: true,
                day: true,
                ..Components::default()
            },
        }
    }
}

impl FromStr for DatePattern {
    type Err = DateCheckError;

    fn from_str(s: &str) -> DateCheckResult<Self> {
        DatePattern::parse(s)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
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
    fn test_translation() {
        assert_eq!(DatePattern::parse("yyyy-MM-dd").unwrap().strftime(), "%Y-%m-%d");
        assert_eq!(DatePattern::parse("HH:mm:ss").unwrap().strftime(), "%H:%M:%S");
        assert_eq!(
            DatePattern::parse("yyyy/M/d HH:mm:ss.SSS").unwrap().strftime(),
            "%Y/%-m/%-d %H:%M:%S.%3f"
        );
        assert_eq!(
            DatePattern::parse("yyyy'T'HH 'o''clock' 100%").unwrap().strftime(),
            "%YT%H o'clock 100%%"
        );
    }

    #[test]
    fn test_default_matches_parsed_default_pattern() {
        assert_eq!(DatePattern::default(), DatePattern::parse(DEFAULT_PATTERN).unwrap());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            DatePattern::parse("yyyy-QQ"),
            Err(DateCheckError::InvalidPattern { .. })
        ));
        assert!(DatePattern::parse("yyyy 'open").is_err());
        assert!(DatePattern::parse("ss.S").is_err());
    }

    #[test]
    fn test_time_only_pattern_drops_date() {
        let pattern = DatePattern::parse("HH:mm:ss").unwrap();
        let monday = at(2024, 1, 8, 9, 30, 15);
        let friday = at(2024, 1, 12, 9, 30, 15);

        assert_eq!(pattern.truncate(&monday).unwrap(), at(1970, 1, 1, 9, 30, 15));
        assert_eq!(
            pattern.truncate(&monday).unwrap(),
            pattern.truncate(&friday).unwrap()
        );
    }

    #[test]
    fn test_date_pattern_drops_time() {
        let pattern = DatePattern::default();
        assert_eq!(
            pattern.truncate(&at(2024, 1, 10, 23, 59, 59)).unwrap(),
            at(2024, 1, 10, 0, 0, 0)
        );
    }

    #[test]
    fn test_partial_patterns_fill_missing_components() {
        let month = DatePattern::parse("yyyy-MM").unwrap();
        assert_eq!(month.parse_value("2024-03").unwrap(), at(2024, 3, 1, 0, 0, 0));

        let clock = DatePattern::parse("hh:mm a").unwrap();
        assert_eq!(clock.parse_value("02:30 PM").unwrap(), at(1970, 1, 1, 14, 30, 0));

        let no_marker = DatePattern::parse("hh:mm").unwrap();
        assert_eq!(no_marker.parse_value("02:30").unwrap(), at(1970, 1, 1, 2, 30, 0));
    }

    #[test]
    fn test_millisecond_precision() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss.SSS").unwrap();
        let value = pattern.parse_value("2024-01-10 08:00:00.250").unwrap();
        assert_eq!(value.and_utc().timestamp_subsec_millis(), 250);
        assert_eq!(pattern.format(&value), "2024-01-10 08:00:00.250");
    }

    #[test]
    fn test_unparsable_value() {
        let pattern = DatePattern::default();
        let err = pattern.parse_value("10/01/2024").unwrap_err();
        assert_eq!(
            err,
            DateCheckError::Unparsable {
                value: "10/01/2024".to_string(),
                pattern: "yyyy-MM-dd".to_string(),
            }
        );
    }

    #[test]
    fn test_matches_requires_exact_shape() {
        let pattern = DatePattern::default();
        assert!(pattern.matches("2024-01-10"));
        assert!(!pattern.matches("2024-1-10"));
        assert!(!pattern.matches("2024-01-10 08:00"));
        assert!(!pattern.matches("2024-02-30"));
    }

    #[test]
    fn test_matches_patterns_whose_text_differs_in_length() {
        let clock = DatePattern::parse("hh:mm a").unwrap();
        assert!(clock.matches("02:30 PM"));
        assert!(clock.matches("02:30 pm"));
        assert!(!clock.matches("2:30 PM"));

        let quoted = DatePattern::parse("yyyy-MM-dd'T'HH").unwrap();
        assert!(quoted.matches("2024-01-10T08"));
        assert!(!quoted.matches("2024-01-10T8"));

        let named = DatePattern::parse("d MMMM yyyy").unwrap();
        assert!(named.matches("10 January 2024"));
        assert!(!named.matches("10 Jan 2024"));
    }
}
