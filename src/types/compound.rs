//! Tyre compound categories

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tyre rubber formulation fitted for a lap.
///
/// Parsing is lenient: labels are matched case-insensitively and anything
/// unrecognised becomes [`Compound::Unknown`] rather than an error, since
/// timing feeds leave the compound blank for some laps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "UPPERCASE")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
    Supersoft,
    Ultrasoft,
    #[default]
    Unknown,
}

impl Compound {
    /// All compounds, in display order.
    pub const ALL: [Compound; 8] = [
        Compound::Soft,
        Compound::Medium,
        Compound::Hard,
        Compound::Intermediate,
        Compound::Wet,
        Compound::Supersoft,
        Compound::Ultrasoft,
        Compound::Unknown,
    ];

    /// Upper-case label as used by timing feeds.
    pub fn as_str(&self) -> &'static str {
        match self {
            Compound::Soft => "SOFT",
            Compound::Medium => "MEDIUM",
            Compound::Hard => "HARD",
            Compound::Intermediate => "INTERMEDIATE",
            Compound::Wet => "WET",
            Compound::Supersoft => "SUPERSOFT",
            Compound::Ultrasoft => "ULTRASOFT",
            Compound::Unknown => "UNKNOWN",
        }
    }

    /// Parse a label, falling back to [`Compound::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "SOFT" => Compound::Soft,
            "MEDIUM" => Compound::Medium,
            "HARD" => Compound::Hard,
            "INTERMEDIATE" => Compound::Intermediate,
            "WET" => Compound::Wet,
            "SUPERSOFT" => Compound::Supersoft,
            "ULTRASOFT" => Compound::Ultrasoft,
            _ => Compound::Unknown,
        }
    }
}

impl FromStr for Compound {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Compound::from_label(s))
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Compound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Null and blank cells both mean "not recorded".
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Compound::from_label).unwrap_or_default())
    }
}
