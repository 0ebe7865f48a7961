//! taskgate-core - Command dispatch for a remote task-engine gateway
//!
//! This crate translates loosely-typed inbound requests (operation name +
//! string-keyed parameter bag) into typed engine commands:
//! - Closed `TaskCommand` inventory with per-operation payloads
//! - Static operation registry with trim/case-insensitive name resolution
//! - Typed parameter extraction with explicit required/optional semantics
//! - A stateless dispatcher that validates before it ever touches the engine
//!
//! The HTTP transport, identity resolution, and the engine itself live
//! outside this crate; the engine is reached through the [`TaskEngine`]
//! seam.

pub mod command;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod params;
pub mod registry;

// Re-export commonly used types
pub use command::{OrgEntity, ParamValue, TaskCommand};
pub use dispatch::Dispatcher;
pub use engine::{EngineError, EngineOutcome, TaskEngine};
pub use errors::{GateError, Result};
pub use params::ParamBag;
pub use registry::{Operation, OperationSpec, ParamShape, ParamSpec};
