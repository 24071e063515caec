//! Typed error definitions for AdNet Priorities.
//!
//! Errors are serializable so the HTTP layer can return them verbatim,
//! and matchable so callers can tell client mistakes from infrastructure
//! failures.

mod config;
mod priority;

pub use config::ConfigError;
pub use priority::{BatchFailure, PriorityError};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = PriorityError::InvalidCountryCode { code: "usa".to_string() };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("InvalidCountryCode"));
        assert!(json.contains("usa"));

        let deserialized: PriorityError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_partial_batch_display() {
        let err = PriorityError::PartialBatchFailure {
            attempted: 3,
            failures: vec![BatchFailure {
                country: "AA".to_string(),
                message: "connection reset".to_string(),
            }],
        };

        let msg = err.to_string();
        assert!(msg.contains("1 of 3"));
        assert_eq!(err.failed_countries(), vec!["AA"]);
    }
}
