//! taskgate-store - Durable per-server state with a concurrent cache
//!
//! This crate owns the gateway's server-side state:
//! - `ServerState` model (configuration items + known container resources)
//! - File-backed repository with atomic temp→rename snapshot writes
//! - `StateCache`: lazily-populated, never-evicted, write-through cache
//!   with at-most-one materialization per server id
//!
//! Durability is deliberately best-effort on the write path: a failed
//! snapshot write is logged and swallowed, because the in-memory cache is
//! the operational source of truth for the life of the process.

pub mod atomic;
pub mod cache;
pub mod errors;
pub mod file_repo;
pub mod state;

// Re-export commonly used types
pub use cache::StateCache;
pub use errors::{Result, StoreError};
pub use file_repo::{FileStateRepository, StateRepository};
pub use state::{
    ConfigItem, ContainerResource, ContainerStatus, ServerConfig, ServerState, CONFIG_ENV_PREFIX,
};
