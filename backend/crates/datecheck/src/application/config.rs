//! Application Configuration
//!
//! Configuration for the date validator.

use chrono::FixedOffset;
use kernel::error::app_error::{AppError, AppResult};
use std::env;

/// Environment variable holding the UTC offset in seconds
pub const UTC_OFFSET_ENV: &str = "DATECHECK_UTC_OFFSET_SECONDS";

/// Date validator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCheckConfig {
    /// Offset of the zone field values are written in; "now" is read in it too
    pub utc_offset_seconds: i32,
}

impl Default for DateCheckConfig {
    fn default() -> Self {
        Self {
            utc_offset_seconds: 0,
        }
    }
}

impl DateCheckConfig {
    /// Config for a fixed offset, e.g. `with_offset_hours(8)` for GMT+8
    ///
    /// Huge values saturate and are then rejected by [`Self::offset`].
    pub fn with_offset_hours(hours: i32) -> Self {
        Self {
            utc_offset_seconds: hours.saturating_mul(3600),
        }
    }

    /// Load from the environment, falling back to UTC when unset
    pub fn from_env() -> AppResult<Self> {
        let Ok(raw) = env::var(UTC_OFFSET_ENV) else {
            return Ok(Self::default());
        };
        let utc_offset_seconds: i32 = raw.trim().parse().map_err(|e| {
            AppError::configuration(format!("{} must be an integer", UTC_OFFSET_ENV))
                .with_source(e)
        })?;
        let config = Self { utc_offset_seconds };
        config.offset()?;
        Ok(config)
    }

    /// The configured zone
    pub fn offset(&self) -> AppResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            AppError::configuration(format!(
                "UTC offset {}s is out of range",
                self.utc_offset_seconds
            ))
        })
    }
}
