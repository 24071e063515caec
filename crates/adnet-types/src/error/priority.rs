//! Errors raised by priority resolution and batch updates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single country whose write failed during a batch update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchFailure {
    /// Country code of the failed entry
    pub country: String,
    /// Cause reported by the store
    pub message: String,
}

/// Errors that can occur while resolving or updating priorities.
///
/// A missing record is not an error: readers fall back to defaults.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum PriorityError {
    /// Country code does not match `^[A-Z]{2}$`
    #[error("Invalid country code: {code:?}")]
    InvalidCountryCode {
        /// The rejected input
        code: String,
    },

    /// The key-value backend failed or timed out
    #[error("Priority store unavailable: {message}")]
    StoreUnavailable {
        /// Description of the infrastructure failure
        message: String,
    },

    /// Some writes of a batch update failed, others went through
    #[error("Batch update failed for {} of {attempted} countries", failures.len())]
    PartialBatchFailure {
        /// Number of entries the batch tried to write
        attempted: usize,
        /// Entries that were not persisted
        failures: Vec<BatchFailure>,
    },
}

impl PriorityError {
    /// Whether the caller sent bad input (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCountryCode { .. })
    }

    /// Country codes that failed in a partial batch, empty otherwise.
    pub fn failed_countries(&self) -> Vec<&str> {
        match self {
            Self::PartialBatchFailure { failures, .. } => {
                failures.iter().map(|f| f.country.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}
