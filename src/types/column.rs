//! Timing columns subject to cleaning

use serde::{Deserialize, Serialize};
use std::fmt;

/// A timing column that the cleaner converts and trims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum TimingColumn {
    LapTime,
    Sector1,
    Sector2,
    Sector3,
}

impl TimingColumn {
    /// Sector columns in trim order.
    pub const SECTORS: [TimingColumn; 3] =
        [TimingColumn::Sector1, TimingColumn::Sector2, TimingColumn::Sector3];

    /// Column name as exported by session sources.
    pub fn source_name(&self) -> &'static str {
        match self {
            TimingColumn::LapTime => "LapTime",
            TimingColumn::Sector1 => "Sector1Time",
            TimingColumn::Sector2 => "Sector2Time",
            TimingColumn::Sector3 => "Sector3Time",
        }
    }

    /// Index into a `[_; 3]` sector array, `None` for the lap time.
    pub fn sector_index(&self) -> Option<usize> {
        match self {
            TimingColumn::LapTime => None,
            TimingColumn::Sector1 => Some(0),
            TimingColumn::Sector2 => Some(1),
            TimingColumn::Sector3 => Some(2),
        }
    }
}

impl fmt::Display for TimingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}
