//! Wall-clock "HH:MM" helpers.
//!
//! Times are same-day only; there is no overnight wrap.

use chrono::{NaiveTime, Timelike};

/// Minutes since midnight for an "HH:MM" string, or `None` if it does not parse.
pub fn parse_clock(value: &str) -> Option<u32> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .ok()
        .map(|t| t.hour() * 60 + t.minute())
}

/// Minutes between two "HH:MM" strings when `end` is strictly after `start`.
pub fn minutes_between(start: &str, end: &str) -> Option<u32> {
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    end.checked_sub(start).filter(|minutes| *minutes > 0)
}
