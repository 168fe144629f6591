//! Lap timing cleaning and fuel correction for race sessions.
//!
//! racepace turns the raw lap table of a race into data fit for pace
//! analysis: slow outlier laps (pit stops, safety car periods, incidents) are
//! trimmed with an iterated one-sided sigma rule, and every surviving lap gets
//! a fuel-corrected time so laps from different stages of the race compare
//! directly.
//!
//! # Features
//!
//! - **Cleaning**: convergent outlier trimming on lap and sector times
//! - **Fuel Correction**: linear burn-off model referenced to the final lap
//! - **Session Cache**: caller-owned, keyed by season, venue and session
//! - **Chart Inputs**: position traces, tyre degradation series, stints
//!
//! ## Example
//!
//! ```rust
//! use racepace::{CleanerConfig, SessionLaps, TimingCleaner};
//!
//! let yaml = r#"
//! Driver: [VER, VER, VER, VER]
//! LapNumber: [1, 2, 3, 4]
//! LapTime: [92.1, 91.8, '0 days 00:01:31.900000', 121.4]
//! "#;
//!
//! let table = SessionLaps::parse(yaml)?.into_table()?;
//! let cleaner = TimingCleaner::new(CleanerConfig::default())?;
//! let cleaned = cleaner.clean(&table)?;
//!
//! for lap in &cleaned {
//!     println!("lap {}: {:.3}s", lap.lap_number(), lap.lap_time_fuel_corrected);
//! }
//! # Ok::<(), racepace::TimingError>(())
//! ```

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Processing
pub mod analysis;
pub mod cleaning;
pub mod session;

// Core exports
pub use error::*;
pub use types::*;

pub use cleaning::{CleanerConfig, TimingCleaner, clean};
pub use session::{
    MemorySource, SessionCache, SessionKey, SessionKind, SessionLaps, SessionSource,
};
