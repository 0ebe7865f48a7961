//! Error taxonomy for the gateway core.
//!
//! Validation errors (unsupported operation, missing/invalid parameter) are
//! raised before any engine call is made. Engine-side failures are mapped
//! into the `NotFound`/`Conflict`/`Engine` classes so the transport layer
//! can distinguish them from bad requests when choosing a status code.

use crate::engine::EngineError;
use thiserror::Error;

/// Result type alias using GateError
pub type Result<T> = std::result::Result<T, GateError>;

/// Canonical gateway error taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Operation name is not in the registry
    #[error("Operation '{operation}' is not supported on tasks")]
    UnsupportedOperation { operation: String },

    /// Required parameter absent from the request
    #[error("Operation '{operation}' requires parameter '{param}'")]
    MissingParameter { operation: String, param: String },

    /// Parameter present but malformed for its declared shape
    #[error("Invalid value for parameter '{param}' of operation '{operation}': {reason}")]
    InvalidParameter {
        operation: String,
        param: String,
        reason: String,
    },

    /// The referenced task/content does not exist in the engine
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Engine rejected the operation in its current state
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Opaque engine execution failure
    #[error("Engine execution failed: {message}")]
    Engine { message: String },
}

impl GateError {
    /// Get the stable error code for this error
    ///
    /// Codes are stable across releases and are what the transport layer
    /// keys its status mapping on.
    pub fn code(&self) -> &'static str {
        match self {
            GateError::UnsupportedOperation { .. } => "ERR_UNSUPPORTED_OP",
            GateError::MissingParameter { .. } => "ERR_MISSING_PARAM",
            GateError::InvalidParameter { .. } => "ERR_INVALID_PARAM",
            GateError::NotFound { .. } => "ERR_NOT_FOUND",
            GateError::Conflict { .. } => "ERR_CONFLICT",
            GateError::Engine { .. } => "ERR_ENGINE",
        }
    }

    /// True for errors the client caused and should not retry
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            GateError::UnsupportedOperation { .. }
                | GateError::MissingParameter { .. }
                | GateError::InvalidParameter { .. }
        )
    }
}

impl From<EngineError> for GateError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { message } => GateError::NotFound { message },
            EngineError::Conflict { message } => GateError::Conflict { message },
            EngineError::Internal { message } => GateError::Engine { message },
        }
    }
}
