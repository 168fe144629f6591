//! Test utilities for building lap tables
//!
//! Generates deterministic synthetic races so unit tests and benchmarks can
//! exercise the cleaner on realistic data without recorded sessions.

#![cfg(any(test, feature = "benchmark"))]

use crate::types::{Compound, LapRecord, LapTable, TimingValue};

/// Laps for one driver at a near-constant pace.
///
/// Times cycle through `base`, `base + 0.1` and `base + 0.2` seconds.
pub fn steady_laps(driver: &str, count: u32, base: f64) -> Vec<LapRecord> {
    (1..=count)
        .map(|lap| {
            let seconds = base + f64::from(lap % 3) * 0.1;
            LapRecord::new(driver, lap, Some(TimingValue::Seconds(seconds)))
        })
        .collect()
}

/// Builder for a deterministic multi-driver race.
///
/// Each lap time is a base pace plus a per-driver offset, fuel load, tyre wear
/// and bounded noise. Lap 1 carries a standing-start penalty, pit laps carry
/// a pit-lane penalty and change compound, and every `null_every`-th lap has
/// its time removed.
#[derive(Debug, Clone)]
pub struct SyntheticRace {
    drivers: usize,
    laps: u32,
    seed: u64,
    base_seconds: f64,
    pit_every: u32,
    null_every: u32,
}

impl SyntheticRace {
    pub fn new(drivers: usize, laps: u32) -> Self {
        Self { drivers, laps, seed: 1, base_seconds: 90.0, pit_every: 18, null_every: 0 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Remove the lap time of every n-th lap (0 disables).
    pub fn with_missing_times(mut self, null_every: u32) -> Self {
        self.null_every = null_every;
        self
    }

    pub fn build(&self) -> LapTable {
        const STRATEGY: [Compound; 3] = [Compound::Medium, Compound::Hard, Compound::Soft];

        let mut rng = Lcg::new(self.seed);
        let mut records = Vec::with_capacity(self.drivers * self.laps as usize);

        for driver_index in 0..self.drivers {
            let driver = format!("D{:02}", driver_index + 1);
            let offset = driver_index as f64 * 0.15;
            let mut stint = 0usize;
            let mut tyre_life = 0u32;

            for lap in 1..=self.laps {
                tyre_life += 1;
                let is_pit_stop = self.pit_every > 0 && lap % self.pit_every == 0;

                let fuel = 3.3 * f64::from(self.laps - lap) / f64::from(self.laps);
                let mut seconds = self.base_seconds
                    + offset
                    + fuel
                    + 0.05 * f64::from(tyre_life)
                    + rng.next_unit() * 0.5;
                if lap == 1 {
                    seconds += 6.0;
                }
                if is_pit_stop {
                    seconds += 21.0;
                }

                let missing = self.null_every > 0 && lap % self.null_every == 0;
                let sector = |share: f64| Some(TimingValue::Seconds(seconds * share));
                let record = LapRecord::new(
                    driver.clone(),
                    lap,
                    if missing { None } else { Some(TimingValue::Seconds(seconds)) },
                )
                .with_sectors(sector(0.31), sector(0.37), sector(0.32))
                .with_tyre(STRATEGY[stint % STRATEGY.len()], tyre_life)
                .with_position(driver_index as u32 + 1)
                .with_pit_stop(is_pit_stop);
                records.push(record);

                if is_pit_stop {
                    stint += 1;
                    tyre_life = 0;
                }
            }
        }

        LapTable::new(records)
    }
}

/// Small linear congruential generator; good enough for test noise.
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0x5DEE_CE66_D)
    }

    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        self.0 =
            self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}
