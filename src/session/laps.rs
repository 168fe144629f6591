//! Column-oriented lap block delivered by session sources
//!
//! Sources export laps as one YAML sequence per column, the way tabular timing
//! exports are laid out:
//!
//! ```yaml
//! Driver: [VER, VER, HAM]
//! LapNumber: [1, 2, 1]
//! LapTime: ['0 days 00:01:35.120000', 94.87, ~]
//! Compound: [MEDIUM, MEDIUM, HARD]
//! TyreLife: [1.0, 2.0, 1.0]
//! Position: [1, 1, 2]
//! ```
//!
//! `Driver`, `LapNumber` and `LapTime` are required. The sector columns are
//! optional as a group; a block with only some of them is rejected. Numeric
//! columns accept floats because tabular exports store them that way.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Compound, LapRecord, LapTable, TimingColumn, TimingValue};
use crate::{Result, TimingError};

type TimingCells = Option<Vec<Option<TimingValue>>>;

/// Raw lap columns as parsed from a session source.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SessionLaps {
    pub driver: Option<Vec<String>>,
    pub lap_number: Option<Vec<f64>>,
    pub lap_time: TimingCells,
    pub sector1_time: TimingCells,
    pub sector2_time: TimingCells,
    pub sector3_time: TimingCells,
    pub compound: Option<Vec<Compound>>,
    pub tyre_life: Option<Vec<Option<f64>>>,
    pub is_pit_stop: Option<Vec<bool>>,
    pub position: Option<Vec<Option<f64>>>,
}

impl SessionLaps {
    /// Parse a lap block from YAML.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            TimingError::parse("Session lap block", format!("YAML parsing failed: {}", e))
        })
    }

    /// Validate the columns and assemble them into rows.
    pub fn into_table(self) -> Result<LapTable> {
        let drivers = self.driver.ok_or_else(|| TimingError::missing_column("Driver"))?;
        let lap_numbers = self.lap_number.ok_or_else(|| TimingError::missing_column("LapNumber"))?;
        let lap_times = self
            .lap_time
            .ok_or_else(|| TimingError::missing_column(TimingColumn::LapTime.source_name()))?;

        let rows = drivers.len();
        check_len("LapNumber", lap_numbers.len(), rows)?;
        check_len(TimingColumn::LapTime.source_name(), lap_times.len(), rows)?;

        let sectors = match (self.sector1_time, self.sector2_time, self.sector3_time) {
            (None, None, None) => None,
            (Some(s1), Some(s2), Some(s3)) => {
                check_len(TimingColumn::Sector1.source_name(), s1.len(), rows)?;
                check_len(TimingColumn::Sector2.source_name(), s2.len(), rows)?;
                check_len(TimingColumn::Sector3.source_name(), s3.len(), rows)?;
                Some((s1, s2, s3))
            }
            (s1, s2, _) => {
                let missing = if s1.is_none() {
                    TimingColumn::Sector1
                } else if s2.is_none() {
                    TimingColumn::Sector2
                } else {
                    TimingColumn::Sector3
                };
                return Err(TimingError::missing_column(missing.source_name()));
            }
        };

        if let Some(compounds) = &self.compound {
            check_len("Compound", compounds.len(), rows)?;
        }
        if let Some(tyre_life) = &self.tyre_life {
            check_len("TyreLife", tyre_life.len(), rows)?;
        }
        if let Some(pit_flags) = &self.is_pit_stop {
            check_len("IsPitStop", pit_flags.len(), rows)?;
        }
        if let Some(positions) = &self.position {
            check_len("Position", positions.len(), rows)?;
        }

        let has_sector_times = sectors.is_some();
        let mut sector_iter = sectors.map(|(s1, s2, s3)| {
            s1.into_iter().zip(s2).zip(s3).map(|((a, b), c)| (a, b, c))
        });

        let mut records = Vec::with_capacity(rows);
        for (row, ((driver, lap_number), lap_time)) in
            drivers.into_iter().zip(lap_numbers).zip(lap_times).enumerate()
        {
            let lap_number = whole_lap_number(lap_number).ok_or_else(|| {
                TimingError::parse(
                    "Session lap block",
                    format!(
                        "LapNumber at row {} is not a positive whole number: {}",
                        row, lap_number
                    ),
                )
            })?;

            let mut record = LapRecord::new(driver, lap_number, lap_time);
            if let Some((s1, s2, s3)) = sector_iter.as_mut().and_then(|iter| iter.next()) {
                record = record.with_sectors(s1, s2, s3);
            }
            record.compound = self.compound.as_ref().map(|c| c[row]).unwrap_or_default();
            record.tyre_life = cell_count(self.tyre_life.as_deref(), row);
            record.position = cell_count(self.position.as_deref(), row);
            record.is_pit_stop = self.is_pit_stop.as_ref().is_some_and(|flags| flags[row]);
            records.push(record);
        }

        debug!(rows, has_sector_times, "Assembled session lap table");

        Ok(if has_sector_times {
            LapTable::new(records)
        } else {
            LapTable::without_sector_times(records)
        })
    }
}

impl TryFrom<SessionLaps> for LapTable {
    type Error = TimingError;

    fn try_from(laps: SessionLaps) -> Result<Self> {
        laps.into_table()
    }
}

fn check_len(column: &str, len: usize, expected: usize) -> Result<()> {
    if len == expected {
        Ok(())
    } else {
        Err(TimingError::parse(
            "Session lap block",
            format!("column {} has {} entries, expected {}", column, len, expected),
        ))
    }
}

fn whole_lap_number(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Non-negative whole count from an optional float cell; anything else is missing.
fn cell_count(column: Option<&[Option<f64>]>, row: usize) -> Option<u32> {
    let value = column?.get(row).copied().flatten()?;
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value.round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BLOCK: &str = r#"
Driver: [VER, VER, HAM]
LapNumber: [1.0, 2.0, 1.0]
LapTime: ['0 days 00:01:35.120000', 94.87, ~]
Sector1Time: [30.1, 29.8, ~]
Sector2Time: [35.0, 34.9, 35.2]
Sector3Time: [30.02, 30.17, 30.3]
Compound: [MEDIUM, MEDIUM, ~]
TyreLife: [1.0, 2.0, .nan]
IsPitStop: [false, false, true]
Position: [1, 1, 2]
"#;

    #[test]
    fn full_block_assembles_rows() {
        let table = SessionLaps::parse(FULL_BLOCK).unwrap().into_table().unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.has_sector_times());

        let ham = &table.laps()[2];
        assert_eq!(ham.driver, "HAM");
        assert_eq!(ham.lap_number, 1);
        assert_eq!(ham.lap_time, None);
        assert_eq!(ham.compound, Compound::Unknown);
        assert_eq!(ham.tyre_life, None);
        assert!(ham.is_pit_stop);
        assert_eq!(ham.position, Some(2));

        let ver = &table.laps()[0];
        assert_eq!(ver.tyre_life, Some(1));
        let ver_seconds = ver.lap_time.as_ref().and_then(TimingValue::to_seconds).unwrap();
        assert!((ver_seconds - 95.12).abs() < 1e-9);
        assert_eq!(ver.sector1_time, Some(TimingValue::Seconds(30.1)));
    }

    #[test]
    fn optional_columns_default() {
        let yaml = "Driver: [LEC]\nLapNumber: [3]\nLapTime: [91.0]\n";
        let table: LapTable = SessionLaps::parse(yaml).unwrap().try_into().unwrap();

        assert!(!table.has_sector_times());
        let lap = &table.laps()[0];
        assert_eq!(lap.compound, Compound::Unknown);
        assert_eq!(lap.tyre_life, None);
        assert_eq!(lap.position, None);
        assert!(!lap.is_pit_stop);
    }

    #[test]
    fn missing_required_columns_are_reported() {
        let err = SessionLaps::parse("Driver: [LEC]\nLapNumber: [3]\n")
            .unwrap()
            .into_table()
            .unwrap_err();
        assert!(matches!(err, TimingError::MissingColumn { ref column } if column == "LapTime"));

        let err = SessionLaps::parse("LapNumber: [3]\nLapTime: [91.0]\n")
            .unwrap()
            .into_table()
            .unwrap_err();
        assert!(matches!(err, TimingError::MissingColumn { ref column } if column == "Driver"));
    }

    #[test]
    fn partial_sector_columns_are_rejected() {
        let yaml = "Driver: [LEC]\nLapNumber: [3]\nLapTime: [91.0]\n\
                    Sector1Time: [30.0]\nSector3Time: [30.0]\n";
        match SessionLaps::parse(yaml).unwrap().into_table().unwrap_err() {
            TimingError::MissingColumn { column } => assert_eq!(column, "Sector2Time"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn unequal_columns_are_a_parse_error() {
        let yaml = "Driver: [LEC, SAI]\nLapNumber: [3]\nLapTime: [91.0, 91.2]\n";
        let err = SessionLaps::parse(yaml).unwrap().into_table().unwrap_err();
        assert!(matches!(err, TimingError::Parse { .. }));
        assert!(err.to_string().contains("LapNumber"));
    }

    #[test]
    fn fractional_lap_numbers_are_rejected() {
        let yaml = "Driver: [LEC]\nLapNumber: [2.5]\nLapTime: [91.0]\n";
        let err = SessionLaps::parse(yaml).unwrap().into_table().unwrap_err();
        assert!(matches!(err, TimingError::Parse { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = SessionLaps::parse("Driver: [LEC\n").unwrap_err();
        assert!(matches!(err, TimingError::Parse { .. }));
    }
}
