//! Output of the timing cleaner

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{LapRecord, TimingColumn};

/// A lap that survived cleaning, with its converted and derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CleanedLap {
    /// The source record, unchanged
    pub record: LapRecord,
    /// Lap time in seconds
    pub lap_time_seconds: f64,
    /// Sector times in seconds, `None` where missing or not converted
    pub sector_seconds: [Option<f64>; 3],
    /// Lap time normalised to an equivalent end-of-race fuel load
    pub lap_time_fuel_corrected: f64,
}

impl CleanedLap {
    pub fn driver(&self) -> &str {
        &self.record.driver
    }

    pub fn lap_number(&self) -> u32 {
        self.record.lap_number
    }

    /// Seconds value of a converted column.
    pub fn seconds(&self, column: TimingColumn) -> Option<f64> {
        match column.sector_index() {
            None => Some(self.lap_time_seconds),
            Some(index) => self.sector_seconds[index],
        }
    }
}

/// Standard deviation could not be used for a trim, so the trim was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DegenerateStatistics {
    pub column: TimingColumn,
    /// 1-based pass number
    pub pass: usize,
    /// Rows available when the statistics were computed
    pub sample_size: usize,
}

/// Summary of what a cleaning run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CleanReport {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Trim passes executed
    pub passes: usize,
    /// A pass completed without removing any row
    pub reached_fixed_point: bool,
    /// Repeated (driver, lap) rows collapsed before trimming
    pub duplicates_dropped: usize,
    /// Rows dropped because the column did not convert to seconds
    pub null_dropped: BTreeMap<TimingColumn, usize>,
    /// Rows dropped as upper outliers
    pub trimmed: BTreeMap<TimingColumn, usize>,
    pub warnings: Vec<DegenerateStatistics>,
    /// Lap count used as the fuel correction reference, `None` when skipped
    pub fuel_reference_lap: Option<u32>,
}

impl CleanReport {
    /// Total rows removed for any reason.
    pub fn rows_removed(&self) -> usize {
        self.input_rows - self.output_rows
    }

    pub(crate) fn record_null_drop(&mut self, column: TimingColumn, count: usize) {
        if count > 0 {
            *self.null_dropped.entry(column).or_default() += count;
        }
    }

    pub(crate) fn record_trim(&mut self, column: TimingColumn, count: usize) {
        if count > 0 {
            *self.trimmed.entry(column).or_default() += count;
        }
    }
}

/// Laps that survived cleaning, in source order, with a report of the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CleanedLapTable {
    laps: Vec<CleanedLap>,
    report: CleanReport,
}

impl CleanedLapTable {
    pub(crate) fn new(laps: Vec<CleanedLap>, report: CleanReport) -> Self {
        Self { laps, report }
    }

    pub fn laps(&self) -> &[CleanedLap] {
        &self.laps
    }

    pub fn report(&self) -> &CleanReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedLap> {
        self.laps.iter()
    }

    pub fn max_lap_number(&self) -> Option<u32> {
        self.laps.iter().map(CleanedLap::lap_number).max()
    }

    /// `(driver, lap_number)` of every surviving lap.
    pub fn keys(&self) -> Vec<(&str, u32)> {
        self.laps.iter().map(|lap| (lap.driver(), lap.lap_number())).collect()
    }
}

impl<'a> IntoIterator for &'a CleanedLapTable {
    type Item = &'a CleanedLap;
    type IntoIter = std::slice::Iter<'a, CleanedLap>;

    fn into_iter(self) -> Self::IntoIter {
        self.laps.iter()
    }
}
