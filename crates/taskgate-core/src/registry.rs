//! Operation registry
//!
//! Static, closed table of supported task operations. The set is a fixed
//! product surface, not a plugin point, so there is no dynamic registration:
//! adding an operation is a source change checked by the compiler (the
//! `Operation` enum, its registry entry, and its dispatch arm must all
//! agree).
//!
//! Name matching trims surrounding whitespace and is case-insensitive; the
//! canonical form is lower-case. Unknown names fail before any parameter
//! extraction happens.

use crate::errors::{GateError, Result};

/// Declared shape of a request parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Single string value (first value wins on repeats)
    Str,
    /// Single integer value
    Int,
    /// Multi-valued string list
    StrList,
    /// Value map assembled from `map_`-prefixed parameters
    ValueMap,
}

/// Static descriptor of one parameter an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub required: bool,
    pub shape: ParamShape,
}

/// Static descriptor of one registered operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// Canonical lower-case operation name
    pub name: &'static str,
    /// Parameters the operation accepts
    pub params: &'static [ParamSpec],
}

/// The closed set of supported task operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Activate,
    Claim,
    ClaimNextAvailable,
    Complete,
    Delegate,
    Exit,
    Fail,
    Forward,
    Release,
    Resume,
    Skip,
    Start,
    Stop,
    Suspend,
    Nominate,
}

const TARGET_ENTITY_ID: ParamSpec = ParamSpec {
    name: "targetEntityId",
    required: true,
    shape: ParamShape::Str,
};

const DATA_MAP: ParamSpec = ParamSpec {
    name: "map_<key>",
    required: false,
    shape: ParamShape::ValueMap,
};

const OWNER_USERS: ParamSpec = ParamSpec {
    name: "user",
    required: false,
    shape: ParamShape::StrList,
};

const OWNER_GROUPS: ParamSpec = ParamSpec {
    name: "group",
    required: false,
    shape: ParamShape::StrList,
};

impl Operation {
    /// Every registered operation, in canonical-name order
    pub const ALL: [Operation; 15] = [
        Operation::Activate,
        Operation::Claim,
        Operation::ClaimNextAvailable,
        Operation::Complete,
        Operation::Delegate,
        Operation::Exit,
        Operation::Fail,
        Operation::Forward,
        Operation::Nominate,
        Operation::Release,
        Operation::Resume,
        Operation::Skip,
        Operation::Start,
        Operation::Stop,
        Operation::Suspend,
    ];

    /// Canonical lower-case name of this operation
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Static parameter spec for this operation
    pub fn spec(self) -> &'static OperationSpec {
        match self {
            Operation::Activate => &OperationSpec {
                name: "activate",
                params: &[],
            },
            Operation::Claim => &OperationSpec {
                name: "claim",
                params: &[],
            },
            Operation::ClaimNextAvailable => &OperationSpec {
                name: "claimnextavailable",
                params: &[],
            },
            Operation::Complete => &OperationSpec {
                name: "complete",
                params: &[DATA_MAP],
            },
            Operation::Delegate => &OperationSpec {
                name: "delegate",
                params: &[TARGET_ENTITY_ID],
            },
            Operation::Exit => &OperationSpec {
                name: "exit",
                params: &[],
            },
            Operation::Fail => &OperationSpec {
                name: "fail",
                params: &[DATA_MAP],
            },
            Operation::Forward => &OperationSpec {
                name: "forward",
                params: &[TARGET_ENTITY_ID],
            },
            Operation::Nominate => &OperationSpec {
                name: "nominate",
                params: &[OWNER_USERS, OWNER_GROUPS],
            },
            Operation::Release => &OperationSpec {
                name: "release",
                params: &[],
            },
            Operation::Resume => &OperationSpec {
                name: "resume",
                params: &[],
            },
            Operation::Skip => &OperationSpec {
                name: "skip",
                params: &[],
            },
            Operation::Start => &OperationSpec {
                name: "start",
                params: &[],
            },
            Operation::Stop => &OperationSpec {
                name: "stop",
                params: &[],
            },
            Operation::Suspend => &OperationSpec {
                name: "suspend",
                params: &[],
            },
        }
    }

    /// Resolve a raw operation name to a registered operation
    ///
    /// Surrounding whitespace is trimmed and matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` carrying the name as the caller sent
    /// it when no registered operation matches.
    pub fn resolve(raw: &str) -> Result<Operation> {
        let canonical = raw.trim().to_lowercase();
        for op in Operation::ALL {
            if op.name() == canonical {
                return Ok(op);
            }
        }
        Err(GateError::UnsupportedOperation {
            operation: raw.to_string(),
        })
    }
}
