//! Core types for lap timing data.
//!
//! ## Architecture
//!
//! - [`LapRecord`] is one driver completing one lap, with raw timing values
//! - [`LapTable`] is every record of a session, in source order
//! - [`TimingValue`] holds a raw time until it is converted to seconds
//! - [`TimingColumn`] names the columns the cleaner converts and trims
//! - [`CleanedLapTable`] is the cleaner's output: surviving laps with seconds
//!   and fuel-corrected times, plus a [`CleanReport`]
//!
//! ## Usage Example
//!
//! ```rust
//! use racepace::types::{Compound, LapRecord, LapTable, TimingValue};
//! use std::time::Duration;
//!
//! let table = LapTable::new(vec![
//!     LapRecord::new("VER", 1, Some(Duration::from_millis(95_120).into()))
//!         .with_tyre(Compound::Medium, 1),
//!     LapRecord::new("VER", 2, Some(TimingValue::from("1:34.870")))
//!         .with_tyre(Compound::Medium, 2),
//! ]);
//!
//! assert_eq!(table.max_lap_number(), Some(2));
//! let seconds = table.laps()[1].lap_time.as_ref().and_then(TimingValue::to_seconds);
//! assert!((seconds.unwrap() - 94.87).abs() < 1e-9);
//! ```

mod cleaned;
mod column;
mod compound;
mod lap;
mod timing_value;

pub use cleaned::{CleanReport, CleanedLap, CleanedLapTable, DegenerateStatistics};
pub use column::TimingColumn;
pub use compound::Compound;
pub use lap::{LapRecord, LapTable};
pub use timing_value::TimingValue;

pub(crate) use timing_value::seconds_of;

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_non_negative_seconds_round_trip(seconds in 0.0f64..100_000.0) {
            let value = TimingValue::Seconds(seconds);
            prop_assert_eq!(value.to_seconds(), Some(seconds));
        }

        #[test]
        fn prop_negative_seconds_never_convert(seconds in -100_000.0f64..-0.000_001) {
            prop_assert_eq!(TimingValue::Seconds(seconds).to_seconds(), None);
        }

        #[test]
        fn prop_clock_text_matches_components(
            hours in 0u32..3,
            minutes in 0u32..60,
            millis in 0u32..60_000
        ) {
            let (seconds, fraction) = (millis / 1000, millis % 1000);
            let text = format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, fraction);
            let expected = hours as f64 * 3600.0 + minutes as f64 * 60.0 + millis as f64 / 1000.0;
            let parsed = TimingValue::Text(text.clone()).to_seconds();
            prop_assert!(parsed.is_some(), "{} did not parse", text);
            prop_assert!((parsed.unwrap() - expected).abs() < 1e-6);
        }

        #[test]
        fn prop_compound_parsing_never_panics(label in ".*") {
            let compound = Compound::from_label(&label);
            prop_assert!(Compound::ALL.contains(&compound));
        }
    }

    #[test]
    fn table_from_iterator_keeps_order() {
        let table: LapTable = (1..=3).map(|lap| LapRecord::new("NOR", lap, None)).collect();
        let numbers: Vec<u32> = table.laps().iter().map(|lap| lap.lap_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(table.has_sector_times());
    }
}
