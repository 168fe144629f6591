//! Per-lap timing records

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Compound, TimingColumn, TimingValue};

/// One row of lap timing: a single driver completing a single lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapRecord {
    /// Driver code, e.g. `"VER"`
    pub driver: String,
    /// 1-based lap number
    pub lap_number: u32,
    /// Elapsed lap time, missing for incomplete or deleted laps
    pub lap_time: Option<TimingValue>,
    pub sector1_time: Option<TimingValue>,
    pub sector2_time: Option<TimingValue>,
    pub sector3_time: Option<TimingValue>,
    pub compound: Compound,
    /// Laps completed on this set of tyres
    pub tyre_life: Option<u32>,
    pub is_pit_stop: bool,
    /// Running order at the end of the lap
    pub position: Option<u32>,
}

impl LapRecord {
    /// Create a record with only the identifying fields and lap time set.
    pub fn new(driver: impl Into<String>, lap_number: u32, lap_time: Option<TimingValue>) -> Self {
        Self {
            driver: driver.into(),
            lap_number,
            lap_time,
            sector1_time: None,
            sector2_time: None,
            sector3_time: None,
            compound: Compound::Unknown,
            tyre_life: None,
            is_pit_stop: false,
            position: None,
        }
    }

    /// Set the three sector times.
    pub fn with_sectors(
        mut self,
        s1: Option<TimingValue>,
        s2: Option<TimingValue>,
        s3: Option<TimingValue>,
    ) -> Self {
        self.sector1_time = s1;
        self.sector2_time = s2;
        self.sector3_time = s3;
        self
    }

    /// Set compound and tyre age.
    pub fn with_tyre(mut self, compound: Compound, tyre_life: u32) -> Self {
        self.compound = compound;
        self.tyre_life = Some(tyre_life);
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_pit_stop(mut self, is_pit_stop: bool) -> Self {
        self.is_pit_stop = is_pit_stop;
        self
    }

    /// Raw value of one timing column.
    pub fn timing(&self, column: TimingColumn) -> Option<&TimingValue> {
        match column {
            TimingColumn::LapTime => self.lap_time.as_ref(),
            TimingColumn::Sector1 => self.sector1_time.as_ref(),
            TimingColumn::Sector2 => self.sector2_time.as_ref(),
            TimingColumn::Sector3 => self.sector3_time.as_ref(),
        }
    }
}

/// All lap records of one session, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapTable {
    laps: Vec<LapRecord>,
    has_sector_times: bool,
}

impl LapTable {
    /// Build a table from records; sector columns are considered present.
    pub fn new(laps: Vec<LapRecord>) -> Self {
        Self { laps, has_sector_times: true }
    }

    /// Build a table whose source did not carry sector columns.
    pub fn without_sector_times(laps: Vec<LapRecord>) -> Self {
        Self { laps, has_sector_times: false }
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Whether the source carried sector time columns.
    pub fn has_sector_times(&self) -> bool {
        self.has_sector_times
    }

    /// Distinct driver codes, sorted.
    pub fn drivers(&self) -> BTreeSet<&str> {
        self.laps.iter().map(|lap| lap.driver.as_str()).collect()
    }

    /// Highest lap number in the table.
    pub fn max_lap_number(&self) -> Option<u32> {
        self.laps.iter().map(|lap| lap.lap_number).max()
    }

    /// Laps belonging to one driver, in source order.
    pub fn driver_laps<'a>(&'a self, driver: &'a str) -> impl Iterator<Item = &'a LapRecord> + 'a {
        self.laps.iter().filter(move |lap| lap.driver == driver)
    }
}

impl Default for LapTable {
    fn default() -> Self {
        LapTable::new(Vec::new())
    }
}

impl FromIterator<LapRecord> for LapTable {
    fn from_iter<I: IntoIterator<Item = LapRecord>>(iter: I) -> Self {
        LapTable::new(iter.into_iter().collect())
    }
}
