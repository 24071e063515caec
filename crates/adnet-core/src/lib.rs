//! # AdNet Core
//!
//! Priority resolution engine for AdNet Priorities.
//!
//! ## Architecture
//!
//! ```text
//! adnet-core/src/
//! ├── store/        # PriorityStore over a KeyValueBackend (memory, postgres)
//! ├── fallback.rs   # Default record for countries without data
//! ├── filter.rs     # Platform / country filter pipeline
//! ├── resolver.rs   # store + fallback + filters
//! ├── cache.rs      # ResolutionCache, flushed on every write
//! ├── batch.rs      # BatchUpdater (validate, write, invalidate)
//! ├── service.rs    # PriorityService facade used by the server
//! ├── config.rs     # AppConfig loading (file + env)
//! └── metrics.rs    # Prometheus counters
//! ```
//!
//! Read path: `ResolutionCache` → (miss) `PriorityResolver` → `PriorityStore`
//! (or `FallbackTable`) → filter pipeline.
//! Write path: `BatchUpdater` → `PriorityStore` → `ResolutionCache::invalidate_all`.

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

pub mod batch;
pub mod cache;
pub mod config;
pub mod fallback;
pub mod filter;
pub mod metrics;
pub mod resolver;
pub mod service;
pub mod store;

pub use batch::BatchUpdater;
pub use cache::{CacheStats, ResolutionCache, ResolutionKey};
pub use fallback::FallbackTable;
pub use resolver::PriorityResolver;
pub use service::PriorityService;
pub use store::{KeyValueBackend, MemoryBackend, PostgresBackend, PriorityStore, StoreError};
