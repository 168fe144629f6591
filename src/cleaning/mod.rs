//! # Lap Timing Cleaning
//!
//! Removes outlier laps from a session and adds a fuel-corrected lap time.
//!
//! ## Pipeline
//!
//! ```text
//! LapTable ──► de-duplicate (driver, lap) ──► convert times to seconds
//!                                                  │
//!        ┌─────────────── pass 1..=max_iterations ─┘
//!        │   LapTime  : drop nulls, trim >= mean + σ·sd
//!        │   Sector1  : drop nulls, trim            (include_sectors)
//!        │   Sector2  : drop nulls, trim            (include_sectors)
//!        │   Sector3  : drop nulls, trim            (include_sectors)
//!        └── stop early when a pass removes nothing
//!                                                  │
//!                       fuel correction ◄──────────┘
//!                              │
//!                              ▼
//!                       CleanedLapTable
//! ```
//!
//! Every statistic is recomputed from the rows that survived the previous
//! step, so the threshold tightens as outliers leave. The trim is one-sided:
//! a fast lap is never removed. Rows only ever leave the working set.
//!
//! A trim whose standard deviation is undefined (fewer than two rows) or zero
//! is skipped and recorded as a [`DegenerateStatistics`] warning.

mod config;
mod fuel;
mod stats;

pub use config::CleanerConfig;
pub use fuel::FuelModel;
pub use stats::ColumnStats;

use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

use crate::types::{
    CleanReport, CleanedLap, CleanedLapTable, DegenerateStatistics, LapTable, TimingColumn,
    seconds_of,
};
use crate::{Result, TimingError};

/// Clean lap times only, with up to `iterations` trim passes and the default
/// fuel model.
///
/// ```rust
/// use racepace::{LapRecord, LapTable, clean};
///
/// let mut laps: Vec<LapRecord> = (1..=20)
///     .map(|lap| LapRecord::new("ALO", lap, Some((90.0 + f64::from(lap % 3) * 0.1).into())))
///     .collect();
/// laps.push(LapRecord::new("ALO", 21, Some(140.0.into()))); // safety car lap
///
/// let cleaned = clean(&LapTable::new(laps), 5)?;
/// assert_eq!(cleaned.len(), 20);
/// assert!(cleaned.iter().all(|lap| lap.lap_time_seconds < 100.0));
/// # Ok::<(), racepace::TimingError>(())
/// ```
pub fn clean(table: &LapTable, iterations: usize) -> Result<CleanedLapTable> {
    TimingCleaner::new(CleanerConfig::with_iterations(iterations))?.clean(table)
}

/// Stateless, configurable lap timing cleaner.
#[derive(Debug, Clone)]
pub struct TimingCleaner {
    config: CleanerConfig,
}

impl Default for TimingCleaner {
    fn default() -> Self {
        Self { config: CleanerConfig::default() }
    }
}

impl TimingCleaner {
    /// Create a cleaner after validating its configuration.
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Columns trimmed in each pass, in order.
    pub fn columns(&self) -> Vec<TimingColumn> {
        let mut columns = vec![TimingColumn::LapTime];
        if self.config.include_sectors {
            columns.extend(TimingColumn::SECTORS);
        }
        columns
    }

    /// Clean a lap table, returning the surviving laps as a new table.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::MissingColumn`] when sector cleaning is enabled
    /// and a non-empty table's source carried no sector times. Row-level
    /// problems never fail the call, and an empty table always cleans to an
    /// empty table.
    pub fn clean(&self, table: &LapTable) -> Result<CleanedLapTable> {
        if self.config.include_sectors && !table.has_sector_times() && !table.is_empty() {
            return Err(TimingError::missing_column(TimingColumn::Sector1.source_name()));
        }

        let mut report = CleanReport { input_rows: table.len(), ..CleanReport::default() };
        let mut working = self.deduplicate(table, &mut report);
        let columns = self.columns();

        for pass in 1..=self.config.max_iterations {
            let before = working.len();
            for &column in &columns {
                working = self.trim_column(working, column, pass, &mut report);
            }
            report.passes = pass;

            let removed = before - working.len();
            debug!(pass, removed, remaining = working.len(), "Trim pass complete");

            if removed == 0 {
                report.reached_fixed_point = true;
                if self.config.stop_on_fixed_point {
                    break;
                }
            }
        }

        // Lap time nulls are already gone after any pass; this covers zero passes.
        let before = working.len();
        working.retain(|candidate| candidate.value(TimingColumn::LapTime).is_some());
        report.record_null_drop(TimingColumn::LapTime, before - working.len());

        let max_lap_number = working.iter().map(|c| table.laps()[c.row].lap_number).max();
        let fuel_model = FuelModel::for_max_lap(self.config.fuel_effect_seconds, max_lap_number);
        report.fuel_reference_lap = fuel_model.map(|model| model.reference_lap);
        if fuel_model.is_none() && !working.is_empty() {
            debug!("No fuel reference lap, leaving lap times uncorrected");
        }

        let laps: Vec<CleanedLap> = working
            .into_iter()
            .filter_map(|candidate| {
                let record = &table.laps()[candidate.row];
                let lap_time_seconds = candidate.value(TimingColumn::LapTime)?;
                Some(CleanedLap {
                    record: record.clone(),
                    lap_time_seconds,
                    sector_seconds: [
                        candidate.value(TimingColumn::Sector1),
                        candidate.value(TimingColumn::Sector2),
                        candidate.value(TimingColumn::Sector3),
                    ],
                    lap_time_fuel_corrected: fuel::corrected_time(
                        fuel_model.as_ref(),
                        lap_time_seconds,
                        record.lap_number,
                    ),
                })
            })
            .collect();

        report.output_rows = laps.len();
        info!(
            input = report.input_rows,
            output = report.output_rows,
            passes = report.passes,
            fixed_point = report.reached_fixed_point,
            "Lap timing cleaned"
        );

        Ok(CleanedLapTable::new(laps, report))
    }

    /// Keep the first occurrence of each (driver, lap) and convert its times.
    fn deduplicate(&self, table: &LapTable, report: &mut CleanReport) -> Vec<Candidate> {
        let mut seen = HashSet::with_capacity(table.len());
        let mut working = Vec::with_capacity(table.len());

        for (row, lap) in table.laps().iter().enumerate() {
            if !seen.insert((lap.driver.as_str(), lap.lap_number)) {
                report.duplicates_dropped += 1;
                continue;
            }
            working.push(Candidate {
                row,
                seconds: [
                    seconds_of(lap.timing(TimingColumn::LapTime)),
                    seconds_of(lap.timing(TimingColumn::Sector1)),
                    seconds_of(lap.timing(TimingColumn::Sector2)),
                    seconds_of(lap.timing(TimingColumn::Sector3)),
                ],
            });
        }

        if report.duplicates_dropped > 0 {
            debug!(duplicates = report.duplicates_dropped, "Dropped repeated driver laps");
        }
        working
    }

    /// Drop rows with no value in `column`, then trim its upper outliers.
    fn trim_column(
        &self,
        working: Vec<Candidate>,
        column: TimingColumn,
        pass: usize,
        report: &mut CleanReport,
    ) -> Vec<Candidate> {
        let before = working.len();
        let mut present: Vec<Candidate> =
            working.into_iter().filter(|candidate| candidate.value(column).is_some()).collect();
        report.record_null_drop(column, before - present.len());

        let values: Vec<f64> = present.iter().filter_map(|c| c.value(column)).collect();
        match ColumnStats::compute(&values) {
            Some(stats) if !stats.is_degenerate() => {
                let bound = stats.upper_bound(self.config.sigma);
                trace!(
                    %column,
                    pass,
                    mean = stats.mean,
                    std_dev = stats.std_dev,
                    bound,
                    "Column statistics"
                );

                let count = present.len();
                present.retain(|candidate| candidate.value(column).is_some_and(|v| v < bound));
                let trimmed = count - present.len();
                report.record_trim(column, trimmed);
                if trimmed > 0 {
                    debug!(%column, pass, trimmed, bound, "Trimmed slow outliers");
                }
            }
            _ => {
                warn!(
                    %column,
                    pass,
                    sample_size = values.len(),
                    "Standard deviation unusable, skipping trim"
                );
                report.warnings.push(DegenerateStatistics {
                    column,
                    pass,
                    sample_size: values.len(),
                });
            }
        }

        present
    }
}

/// A row still in the working set, with its times in seconds.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    row: usize,
    seconds: [Option<f64>; 4],
}

impl Candidate {
    fn value(&self, column: TimingColumn) -> Option<f64> {
        let index = column.sector_index().map_or(0, |sector| sector + 1);
        self.seconds[index]
    }
}
