//! Summary statistics for outlier trimming

/// Mean and sample standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl ColumnStats {
    /// Compute statistics for a slice of values.
    ///
    /// Returns `None` when fewer than two values are given, since the sample
    /// standard deviation is undefined there.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let m2: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        let std_dev = (m2 / (n - 1.0)).sqrt();

        Some(Self { count: values.len(), mean, std_dev })
    }

    /// Upper retention bound: values strictly below it are kept.
    pub fn upper_bound(&self, sigma: f64) -> f64 {
        self.mean + sigma * self.std_dev
    }

    /// A spread of zero cannot separate outliers from the rest.
    pub fn is_degenerate(&self) -> bool {
        !(self.std_dev.is_finite() && self.std_dev > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_standard_deviation() {
        let stats = ColumnStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // population std is 2.0; sample std is sqrt(32 / 7)
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_values_is_undefined() {
        assert_eq!(ColumnStats::compute(&[]), None);
        assert_eq!(ColumnStats::compute(&[91.2]), None);
    }

    #[test]
    fn identical_values_are_degenerate() {
        let stats = ColumnStats::compute(&[90.0, 90.0, 90.0]).unwrap();
        assert!(stats.is_degenerate());
        assert_eq!(stats.upper_bound(3.0), 90.0);
    }

    #[test]
    fn upper_bound_scales_with_sigma() {
        let stats = ColumnStats { count: 10, mean: 90.0, std_dev: 1.5 };
        assert!((stats.upper_bound(3.0) - 94.5).abs() < 1e-12);
        assert!((stats.upper_bound(2.0) - 93.0).abs() < 1e-12);
        assert!(!stats.is_degenerate());
    }
}
