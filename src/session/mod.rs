//! # Session Data
//!
//! Identifies race sessions, parses the lap block a session source delivers,
//! and memoises parsed sessions for reuse.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               Session Pipeline                  │
//! │                                                 │
//! │  SessionKey ──► SessionCache ──hit──► LapTable  │
//! │                      │                   ▲      │
//! │                     miss                 │      │
//! │                      ▼                   │      │
//! │               SessionSource ──► SessionLaps     │
//! │               (YAML columns)    (validate)      │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The cache is owned by the caller and keyed by the full session identity,
//! so two venues or seasons never share an entry.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cache;
pub mod laps;
pub mod source;

pub use cache::{CachedSession, SessionCache};
pub use laps::SessionLaps;
pub use source::{MemorySource, SessionSource};

/// Kind of on-track session within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SessionKind {
    /// Free practice session 1 to 3
    Practice(u8),
    Qualifying,
    Sprint,
    #[default]
    Race,
}

impl SessionKind {
    /// Parse a provider label ("Race", "Practice 2") or short code ("R", "FP2").
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "R" | "RACE" => Some(SessionKind::Race),
            "Q" | "QUALIFYING" => Some(SessionKind::Qualifying),
            "S" | "SPRINT" => Some(SessionKind::Sprint),
            _ => {
                let number = normalized
                    .strip_prefix("FP")
                    .or_else(|| normalized.strip_prefix("PRACTICE"))?
                    .trim()
                    .parse::<u8>()
                    .ok()?;
                (1..=3).contains(&number).then_some(SessionKind::Practice(number))
            }
        }
    }

    /// Short code, e.g. `"R"` or `"FP1"`.
    pub fn code(&self) -> String {
        match self {
            SessionKind::Practice(number) => format!("FP{}", number),
            SessionKind::Qualifying => "Q".to_string(),
            SessionKind::Sprint => "S".to_string(),
            SessionKind::Race => "R".to_string(),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Practice(number) => write!(f, "Practice {}", number),
            SessionKind::Qualifying => f.write_str("Qualifying"),
            SessionKind::Sprint => f.write_str("Sprint"),
            SessionKind::Race => f.write_str("Race"),
        }
    }
}

/// Identity of one session: season, venue and session kind.
///
/// The venue is trimmed and compared case-insensitively, so `"Great Britain"`
/// and `" great britain"` name the same session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionKey {
    pub year: u16,
    venue: String,
    pub kind: SessionKind,
}

impl SessionKey {
    pub fn new(year: u16, venue: impl AsRef<str>, kind: SessionKind) -> Self {
        Self { year, venue: normalize_venue(venue.as_ref()), kind }
    }

    /// The race of a given season and venue.
    pub fn race(year: u16, venue: impl AsRef<str>) -> Self {
        Self::new(year, venue, SessionKind::Race)
    }

    /// Normalised venue name.
    pub fn venue(&self) -> &str {
        &self.venue
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.venue, self.kind)
    }
}

fn normalize_venue(venue: &str) -> String {
    venue.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_kind_labels_and_codes() {
        assert_eq!(SessionKind::from_label("Race"), Some(SessionKind::Race));
        assert_eq!(SessionKind::from_label("r"), Some(SessionKind::Race));
        assert_eq!(SessionKind::from_label("Qualifying"), Some(SessionKind::Qualifying));
        assert_eq!(SessionKind::from_label("Sprint"), Some(SessionKind::Sprint));
        assert_eq!(SessionKind::from_label("Practice 2"), Some(SessionKind::Practice(2)));
        assert_eq!(SessionKind::from_label("fp3"), Some(SessionKind::Practice(3)));
        assert_eq!(SessionKind::from_label("FP4"), None);
        assert_eq!(SessionKind::from_label("Warmup"), None);

        assert_eq!(SessionKind::Practice(1).code(), "FP1");
        assert_eq!(SessionKind::Race.to_string(), "Race");
        assert_eq!(SessionKind::default(), SessionKind::Race);
    }

    #[test]
    fn keys_normalise_venue() {
        let a = SessionKey::race(2023, "Great Britain");
        let b = SessionKey::race(2023, "  great   BRITAIN ");
        assert_eq!(a, b);
        assert_eq!(a.venue(), "great britain");
        assert_eq!(a.to_string(), "2023 great britain Race");
    }

    #[test]
    fn keys_differ_by_year_and_kind() {
        let race = SessionKey::race(2022, "Monaco");
        assert_ne!(race, SessionKey::race(2021, "Monaco"));
        assert_ne!(race, SessionKey::new(2022, "Monaco", SessionKind::Qualifying));
    }
}
