//! # AdNet Types
//!
//! Core types, models, and error definitions for AdNet Priorities.
//!
//! - **`error`** - Typed errors for priority resolution and configuration
//! - **`models`** - Domain models (country codes, ad types, priority records, config)
//!
//! ## Architecture Role
//!
//! `adnet-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!      adnet-types (this crate)
//!              │
//!              ▼
//!         adnet-core
//!              │
//!              ▼
//!        adnet-server
//! ```

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{BatchFailure, ConfigError, PriorityError};

// Re-export core model types
pub use models::{
    AdType, AppConfig, AuthConfig, CountryCode, NetworkList, Platform, PriorityRecord,
    ServerConfig, StoreBackend, StoreConfig,
};
