//! Error types for lap timing processing.
//!
//! Only structural problems surface as errors. Row-level problems (a lap time
//! that cannot be converted, a statistic that cannot be computed) are resolved
//! by excluding the row or skipping the trim, and are reported through
//! [`CleanReport`](crate::CleanReport) instead.
//!
//! ## Error Categories
//!
//! - **Schema Errors**: a required column is missing from the lap data
//! - **Parse Errors**: malformed session YAML or inconsistent columns
//! - **Configuration Errors**: cleaner settings outside their valid range
//! - **Source Errors**: the session source failed or has no such session
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use racepace::TimingError;
//!
//! let error = TimingError::source_failed("provider unreachable");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use thiserror::Error;

use crate::session::SessionKey;

/// Result type alias for timing operations.
pub type Result<T, E = TimingError> = std::result::Result<T, E>;

/// Main error type for timing operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TimingError {
    #[error("Required column '{column}' is missing from lap data")]
    MissingColumn { column: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Invalid cleaner configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Session {key} is not available from the source")]
    SessionNotFound { key: SessionKey },

    #[error("Session source failed: {reason}")]
    Source {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TimingError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TimingError::Source { .. } => true,
            TimingError::MissingColumn { .. } => false,
            TimingError::Parse { .. } => false,
            TimingError::InvalidConfig { .. } => false,
            TimingError::SessionNotFound { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TimingError::MissingColumn { .. } => vec![
                "Check that the session source exports lap timing columns",
                "Disable sector cleaning when sector times are unavailable",
            ],
            TimingError::Parse { .. } => vec![
                "Verify the session data is well-formed YAML",
                "Check that every column has one entry per lap",
            ],
            TimingError::InvalidConfig { .. } => vec![
                "Use a positive, finite sigma multiplier",
                "Use a non-negative, finite fuel effect",
            ],
            TimingError::SessionNotFound { .. } => vec![
                "Check the season year and venue spelling",
                "Verify the session kind took place at this event",
            ],
            TimingError::Source { .. } => vec![
                "Retry the request",
                "Check connectivity to the timing data provider",
            ],
        }
    }

    /// Helper constructor for missing column errors.
    pub fn missing_column(column: impl Into<String>) -> Self {
        TimingError::MissingColumn { column: column.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse(context: impl Into<String>, details: impl Into<String>) -> Self {
        TimingError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        TimingError::InvalidConfig { reason: reason.into() }
    }

    /// Helper constructor for source failures.
    pub fn source_failed(reason: impl Into<String>) -> Self {
        TimingError::Source { reason: reason.into(), source: None }
    }

    /// Helper constructor for source failures with an underlying cause.
    pub fn source_failed_with(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TimingError::Source { reason: reason.into(), source: Some(source) }
    }
}

impl From<serde_yaml_ng::Error> for TimingError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        TimingError::Parse { context: "YAML deserialization".to_string(), details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionKind;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_carry_their_context(
            column in "[A-Za-z0-9]+",
            reason in ".*",
            details in ".*"
          ) {
            let missing = TimingError::missing_column(column.clone());
            let config = TimingError::invalid_config(reason.clone());
            let parse = TimingError::parse("lap block", details.clone());

            prop_assert!(missing.to_string().contains(&column));
            prop_assert!(config.to_string().contains(&reason));
            prop_assert!(parse.to_string().contains(&details));
            prop_assert!(parse.to_string().contains("lap block"));
          }
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TimingError>();

        let error = TimingError::source_failed("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn only_source_failures_are_retryable() {
        let key = SessionKey::new(2023, "Monza", SessionKind::Race);
        assert!(TimingError::source_failed("timeout").is_retryable());
        assert!(!TimingError::missing_column("LapTime").is_retryable());
        assert!(!TimingError::invalid_config("sigma").is_retryable());
        assert!(!TimingError::SessionNotFound { key }.is_retryable());
    }

    #[test]
    fn every_variant_has_suggestions() {
        let errors = [
            TimingError::missing_column("LapTime"),
            TimingError::parse("ctx", "details"),
            TimingError::invalid_config("sigma"),
            TimingError::SessionNotFound { key: SessionKey::new(2019, "Spa", SessionKind::Race) },
            TimingError::source_failed("down"),
        ];
        for error in &errors {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            assert!(suggestions.iter().all(|s| s.len() > 5));
        }
    }

    #[test]
    fn source_chain_is_preserved() {
        let cause = std::io::Error::other("socket closed");
        let error = TimingError::source_failed_with("fetch failed", Box::new(cause));
        let source = std::error::Error::source(&error).expect("source should be attached");
        assert_eq!(source.to_string(), "socket closed");
    }

    #[test]
    fn yaml_errors_convert_to_parse() {
        let err = serde_yaml_ng::from_str::<Vec<u32>>("[1, two").unwrap_err();
        let converted: TimingError = err.into();
        assert!(matches!(converted, TimingError::Parse { .. }));
    }
}
