//! Domain models for AdNet Priorities.

mod ad_type;
mod config;
mod country;
mod priorities;

pub use ad_type::{AdType, Platform};
pub use config::{AppConfig, AuthConfig, ServerConfig, StoreBackend, StoreConfig};
pub use country::CountryCode;
pub use priorities::{NetworkList, PriorityRecord};
