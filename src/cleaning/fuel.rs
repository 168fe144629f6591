//! Fuel load correction
//!
//! Cars get lighter as fuel burns, so raw lap times fall over a stint even on
//! worn tyres. The correction subtracts a linear share of the full-tank
//! penalty from each lap so that every lap reads as if run on the final
//! lap's fuel load:
//!
//! ```text
//! corrected = lap_time - effect * (max_lap - lap) / max_lap
//! ```

/// Linear fuel burn model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelModel {
    /// Seconds gained between a full tank and an empty one
    pub effect_seconds: f64,
    /// Lap count of the session, the zero-penalty reference
    pub reference_lap: u32,
}

impl FuelModel {
    /// Build a model referenced to the highest lap in the data.
    ///
    /// Returns `None` when there is no usable reference (no laps, or a maximum
    /// lap number of zero), in which case no correction applies.
    pub fn for_max_lap(effect_seconds: f64, max_lap_number: Option<u32>) -> Option<Self> {
        match max_lap_number {
            Some(reference_lap) if reference_lap > 0 => {
                Some(Self { effect_seconds, reference_lap })
            }
            _ => None,
        }
    }

    /// Penalty carried on `lap_number` relative to the reference lap.
    pub fn penalty(&self, lap_number: u32) -> f64 {
        let max = f64::from(self.reference_lap);
        self.effect_seconds * (max - f64::from(lap_number)) / max
    }

    pub fn correct(&self, lap_time_seconds: f64, lap_number: u32) -> f64 {
        lap_time_seconds - self.penalty(lap_number)
    }
}

/// Apply an optional model; without one the time is returned unchanged.
pub fn corrected_time(model: Option<&FuelModel>, lap_time_seconds: f64, lap_number: u32) -> f64 {
    match model {
        Some(model) => model.correct(lap_time_seconds, lap_number),
        None => lap_time_seconds,
    }
}
