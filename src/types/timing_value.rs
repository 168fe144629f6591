//! Raw timing values and their conversion to seconds

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A lap or sector time as delivered by the session source, before conversion.
///
/// Sources hand over elapsed times either as plain seconds or as text in one of
/// the clock forms below. Conversion never fails loudly; a value that cannot be
/// read as a non-negative number of seconds converts to `None` and the row is
/// excluded downstream.
///
/// Accepted text forms:
///
/// ```text
/// 92.481                      seconds
/// 1:32.481                    minutes:seconds
/// 0:01:32.481                 hours:minutes:seconds
/// 0 days 00:01:32.481000      timedelta export
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(untagged)]
pub enum TimingValue {
    Seconds(f64),
    Text(String),
}

impl TimingValue {
    /// Convert to seconds, or `None` if the value is not a valid elapsed time.
    pub fn to_seconds(&self) -> Option<f64> {
        let seconds = match self {
            TimingValue::Seconds(value) => *value,
            TimingValue::Text(text) => parse_clock(text)?,
        };

        if seconds.is_finite() && seconds >= 0.0 { Some(seconds) } else { None }
    }
}

impl From<Duration> for TimingValue {
    fn from(duration: Duration) -> Self {
        TimingValue::Seconds(duration.as_secs_f64())
    }
}

impl From<f64> for TimingValue {
    fn from(seconds: f64) -> Self {
        TimingValue::Seconds(seconds)
    }
}

impl From<&str> for TimingValue {
    fn from(text: &str) -> Self {
        TimingValue::Text(text.to_string())
    }
}

/// Convert an optional raw value to seconds.
pub(crate) fn seconds_of(value: Option<&TimingValue>) -> Option<f64> {
    value.and_then(TimingValue::to_seconds)
}

fn parse_clock(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('-') {
        return None;
    }

    let (days, clock) = match text.split_once(" days ").or_else(|| text.split_once(" day ")) {
        Some((days, clock)) => (days.trim().parse::<u64>().ok()?, clock.trim()),
        None => (0, text),
    };

    let mut parts = clock.rsplit(':');
    let seconds = parse_component(parts.next()?)?;
    let minutes = parts.next().map(parse_component).unwrap_or(Some(0.0))?;
    let hours = parts.next().map(parse_component).unwrap_or(Some(0.0))?;
    if parts.next().is_some() {
        return None;
    }

    Some(days as f64 * 86_400.0 + hours * 3_600.0 + minutes * 60.0 + seconds)
}

fn parse_component(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    part.parse::<f64>().ok()
}
