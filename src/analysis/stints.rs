//! Tyre stints for strategy timelines

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Compound, LapRecord, LapTable};

/// A run of consecutive laps on one set of tyres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Stint {
    pub driver: String,
    /// 1-based stint number for this driver
    pub number: u32,
    pub compound: Compound,
    pub start_lap: u32,
    pub end_lap: u32,
}

impl Stint {
    /// Laps covered, inclusive of both ends.
    pub fn laps(&self) -> u32 {
        self.end_lap - self.start_lap + 1
    }
}

/// Split every driver's race into stints.
///
/// A stint ends when the compound changes or after a lap flagged as a pit
/// stop. Laps are taken in lap order regardless of table order. Result is
/// ordered by driver, then stint number.
pub fn stints(table: &LapTable) -> Vec<Stint> {
    let mut by_driver: BTreeMap<&str, Vec<&LapRecord>> = BTreeMap::new();
    for lap in table.laps() {
        by_driver.entry(lap.driver.as_str()).or_default().push(lap);
    }

    let mut result = Vec::new();
    for (driver, mut laps) in by_driver {
        laps.sort_by_key(|lap| lap.lap_number);

        let mut current: Option<Stint> = None;
        let mut pitted = false;
        for lap in laps {
            let continues = current
                .as_ref()
                .is_some_and(|stint| !pitted && stint.compound == lap.compound);

            if continues {
                if let Some(stint) = current.as_mut() {
                    stint.end_lap = lap.lap_number;
                }
            } else {
                let number = current.as_ref().map_or(1, |stint| stint.number + 1);
                if let Some(done) = current.take() {
                    result.push(done);
                }
                current = Some(Stint {
                    driver: driver.to_string(),
                    number,
                    compound: lap.compound,
                    start_lap: lap.lap_number,
                    end_lap: lap.lap_number,
                });
            }
            pitted = lap.is_pit_stop;
        }

        if let Some(done) = current {
            result.push(done);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SyntheticRace;

    fn lap(driver: &str, number: u32, compound: Compound) -> LapRecord {
        LapRecord::new(driver, number, Some(90.0.into())).with_tyre(compound, number)
    }

    #[test]
    fn compound_change_starts_a_stint() {
        let table = LapTable::new(vec![
            lap("ALB", 1, Compound::Soft),
            lap("ALB", 2, Compound::Soft),
            lap("ALB", 3, Compound::Hard),
            lap("ALB", 4, Compound::Hard),
        ]);
        let stints = stints(&table);

        assert_eq!(stints.len(), 2);
        assert_eq!((stints[0].start_lap, stints[0].end_lap), (1, 2));
        assert_eq!(stints[1].compound, Compound::Hard);
        assert_eq!(stints[1].number, 2);
        assert_eq!(stints[1].laps(), 2);
    }

    #[test]
    fn pit_stop_on_same_compound_starts_a_stint() {
        let table = LapTable::new(vec![
            lap("STR", 1, Compound::Medium),
            lap("STR", 2, Compound::Medium).with_pit_stop(true),
            lap("STR", 3, Compound::Medium),
        ]);
        let stints = stints(&table);

        assert_eq!(stints.len(), 2);
        assert_eq!(stints[0].end_lap, 2);
        assert_eq!(stints[1].start_lap, 3);
    }

    #[test]
    fn laps_are_ordered_before_grouping() {
        let table = LapTable::new(vec![
            lap("MAG", 3, Compound::Hard),
            lap("MAG", 1, Compound::Soft),
            lap("MAG", 2, Compound::Soft),
            lap("HUL", 1, Compound::Wet),
        ]);
        let stints = stints(&table);

        let drivers: Vec<&str> = stints.iter().map(|s| s.driver.as_str()).collect();
        assert_eq!(drivers, vec!["HUL", "MAG", "MAG"]);
        assert_eq!(stints[1].compound, Compound::Soft);
        assert_eq!(stints[2].start_lap, 3);
    }

    #[test]
    fn synthetic_race_stints_follow_pit_stops() {
        // Pit stops on laps 18 and 36 give three stints per driver.
        let table = SyntheticRace::new(2, 40).build();
        let stints = stints(&table);

        assert_eq!(stints.len(), 6);
        assert_eq!(stints[0].end_lap, 18);
        assert_eq!(stints[1].start_lap, 19);
        assert_eq!(stints[2].laps(), 4);
    }

    #[test]
    fn empty_table_has_no_stints() {
        assert!(stints(&LapTable::default()).is_empty());
    }
}
