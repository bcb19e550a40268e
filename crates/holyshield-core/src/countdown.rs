//! Event countdown.
//!
//! Wall-clock based, like a timer without a thread: the caller asks for the
//! remaining time whenever it redraws, normally once per [`REFRESH_INTERVAL`],
//! and stops asking when the countdown is no longer displayed.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Redraw period of a displayed countdown.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

const SECS_PER_DAY: u64 = 24 * 3600;

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeParts {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY + self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    pub fn is_elapsed(&self) -> bool {
        self.total_seconds() == 0
    }
}

impl fmt::Display for TimeParts {
    /// `DD:HH:MM:SS`, each unit zero-padded to two digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Countdown to the event start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    label: String,
    target: DateTime<FixedOffset>,
}

impl Countdown {
    pub fn new(label: impl Into<String>, target: DateTime<FixedOffset>) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }

    /// Parse an RFC 3339 target such as `2025-12-20T00:00:00+09:00`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the target does not parse.
    pub fn parse(label: impl Into<String>, target_iso: &str) -> Result<Self, ConfigError> {
        let target = DateTime::parse_from_rfc3339(target_iso.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "countdown.targetISO".to_string(),
                message: format!("'{target_iso}' is not an RFC 3339 timestamp: {e}"),
            }
        })?;
        Ok(Self::new(label, target))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> DateTime<FixedOffset> {
        self.target
    }

    /// Whole seconds left at `now`, clamped at zero once the target passed.
    pub fn remaining_secs_at(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.target.with_timezone(&Utc) - now;
        u64::try_from(remaining.num_seconds()).unwrap_or(0)
    }

    pub fn parts_at(&self, now: DateTime<Utc>) -> TimeParts {
        TimeParts::from_seconds(self.remaining_secs_at(now))
    }

    pub fn parts_now(&self) -> TimeParts {
        self.parts_at(Utc::now())
    }
}
