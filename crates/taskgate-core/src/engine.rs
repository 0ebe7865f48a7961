//! Engine adapter seam
//!
//! The gateway never talks to the task engine directly; it hands each built
//! command to a [`TaskEngine`] implementation exactly once and treats the
//! call as opaque and synchronous. Production wires a remote engine client
//! in here; tests use recording doubles.

use crate::command::TaskCommand;
use thiserror::Error;

/// Failure classes an engine execution can surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The referenced task/content does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// The operation is not legal for the task's current state
    #[error("{message}")]
    Conflict { message: String },

    /// Opaque engine-side failure
    #[error("{message}")]
    Internal { message: String },
}

/// Success payload returned by the engine for marshalling
///
/// Most task operations only acknowledge; some return a serialized domain
/// object that the transport layer marshals as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// Operation acknowledged, nothing to marshal beyond a generic response
    Ack,
    /// Serialized domain object for the transport layer to marshal
    Detail(String),
}

/// Synchronous adapter to the task engine
///
/// Implementations must be shareable across request workers.
pub trait TaskEngine: Send + Sync {
    /// Execute one command against the engine
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] classifying the failure; the dispatcher
    /// maps it into the gateway taxonomy for the transport layer.
    fn execute(&self, cmd: TaskCommand) -> Result<EngineOutcome, EngineError>;
}
