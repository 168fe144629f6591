//! Chart inputs derived from lap tables.
//!
//! Each function groups rows into the series one chart needs. Nothing here
//! draws; renderers read the returned maps directly.
//!
//! | chart                           | input                          | source table |
//! |---------------------------------|--------------------------------|--------------|
//! | position over laps              | [`position_trace`]             | raw          |
//! | lap time by tyre age            | [`tyre_degradation`]           | cleaned      |
//! | fuel-corrected density          | [`fuel_corrected_by_compound`] | cleaned      |
//! | tyre strategy timeline          | [`stints`]                     | raw          |

mod stints;

pub use stints::{Stint, stints};

use std::collections::BTreeMap;

use crate::types::{CleanedLapTable, Compound, LapTable};

/// Running position per driver as `(lap_number, position)`, sorted by lap.
///
/// Laps without a recorded position are skipped.
pub fn position_trace(table: &LapTable) -> BTreeMap<String, Vec<(u32, u32)>> {
    let mut traces: BTreeMap<String, Vec<(u32, u32)>> = BTreeMap::new();
    for lap in table.laps() {
        if let Some(position) = lap.position {
            traces.entry(lap.driver.clone()).or_default().push((lap.lap_number, position));
        }
    }
    for trace in traces.values_mut() {
        trace.sort_by_key(|&(lap, _)| lap);
    }
    traces
}

/// Lap time against tyre age per compound as `(tyre_life, seconds)`.
///
/// Points are sorted by tyre age; laps without a tyre age are skipped.
pub fn tyre_degradation(table: &CleanedLapTable) -> BTreeMap<Compound, Vec<(u32, f64)>> {
    let mut series: BTreeMap<Compound, Vec<(u32, f64)>> = BTreeMap::new();
    for lap in table {
        if let Some(tyre_life) = lap.record.tyre_life {
            series.entry(lap.record.compound).or_default().push((tyre_life, lap.lap_time_seconds));
        }
    }
    for points in series.values_mut() {
        points.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    }
    series
}

/// Fuel-corrected lap times per compound, in table order.
pub fn fuel_corrected_by_compound(table: &CleanedLapTable) -> BTreeMap<Compound, Vec<f64>> {
    let mut samples: BTreeMap<Compound, Vec<f64>> = BTreeMap::new();
    for lap in table {
        samples.entry(lap.record.compound).or_default().push(lap.lap_time_fuel_corrected);
    }
    samples
}
