//! Command types representing all supported task operations
//!
//! This module defines the closed command inventory the dispatcher builds
//! from inbound requests. Each variant carries the acting user and, where
//! the operation targets a task, the task id; payload fields are
//! variant-specific. A command is immutable once built and is consumed
//! exactly once by the engine adapter.

use std::collections::BTreeMap;

/// A typed scalar decoded from a string request parameter
///
/// Decoding tries integer, then float, then boolean, and falls back to the
/// raw string. This matches the type-guessing the wire format has always
/// used for free-form task data.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl ParamValue {
    /// Decode a raw string value into its best-fitting scalar type
    pub fn decode(raw: &str) -> ParamValue {
        if let Ok(i) = raw.parse::<i64>() {
            return ParamValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return ParamValue::Float(f);
        }
        if let Ok(b) = raw.parse::<bool>() {
            return ParamValue::Bool(b);
        }
        ParamValue::Str(raw.to_string())
    }
}

/// An organizational-entity reference, as supplied via the multi-valued
/// `user` and `group` request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgEntity {
    User(String),
    Group(String),
}

/// Command enum representing all supported task operations
///
/// Commands are produced by `dispatch()`, which validates the raw request
/// against the operation registry before construction. The enum is a closed
/// product surface: adding an operation means adding a variant, a registry
/// entry, and a dispatch arm, all checked at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCommand {
    /// Activate a task that is in the Created state
    Activate { task_id: i64, user_id: String },

    /// Claim a specific task for the acting user
    Claim { task_id: i64, user_id: String },

    /// Claim the next task available to the acting user (no task id; the
    /// engine picks from the user's queue)
    ClaimNextAvailable { user_id: String },

    /// Complete a task, passing free-form output data
    Complete {
        task_id: i64,
        user_id: String,
        data: BTreeMap<String, ParamValue>,
    },

    /// Delegate a task to another entity
    Delegate {
        task_id: i64,
        user_id: String,
        target_entity_id: String,
    },

    /// Exit a task (administrative abort)
    Exit { task_id: i64, user_id: String },

    /// Fail a task, passing free-form fault data
    Fail {
        task_id: i64,
        user_id: String,
        data: BTreeMap<String, ParamValue>,
    },

    /// Forward a task to another entity
    Forward {
        task_id: i64,
        user_id: String,
        target_entity_id: String,
    },

    /// Release a claimed task back to its potential owners
    Release { task_id: i64, user_id: String },

    /// Resume a suspended task
    Resume { task_id: i64, user_id: String },

    /// Skip a skippable task
    Skip { task_id: i64, user_id: String },

    /// Start a claimed task
    Start { task_id: i64, user_id: String },

    /// Stop an in-progress task
    Stop { task_id: i64, user_id: String },

    /// Suspend a task
    Suspend { task_id: i64, user_id: String },

    /// Nominate potential owners for a task
    Nominate {
        task_id: i64,
        user_id: String,
        potential_owners: Vec<OrgEntity>,
    },
}

impl TaskCommand {
    /// The task this command targets, if the operation is task-scoped
    pub fn task_id(&self) -> Option<i64> {
        match self {
            TaskCommand::ClaimNextAvailable { .. } => None,
            TaskCommand::Activate { task_id, .. }
            | TaskCommand::Claim { task_id, .. }
            | TaskCommand::Complete { task_id, .. }
            | TaskCommand::Delegate { task_id, .. }
            | TaskCommand::Exit { task_id, .. }
            | TaskCommand::Fail { task_id, .. }
            | TaskCommand::Forward { task_id, .. }
            | TaskCommand::Release { task_id, .. }
            | TaskCommand::Resume { task_id, .. }
            | TaskCommand::Skip { task_id, .. }
            | TaskCommand::Start { task_id, .. }
            | TaskCommand::Stop { task_id, .. }
            | TaskCommand::Suspend { task_id, .. }
            | TaskCommand::Nominate { task_id, .. } => Some(*task_id),
        }
    }

    /// The user this command acts on behalf of
    pub fn user_id(&self) -> &str {
        match self {
            TaskCommand::Activate { user_id, .. }
            | TaskCommand::Claim { user_id, .. }
            | TaskCommand::ClaimNextAvailable { user_id }
            | TaskCommand::Complete { user_id, .. }
            | TaskCommand::Delegate { user_id, .. }
            | TaskCommand::Exit { user_id, .. }
            | TaskCommand::Fail { user_id, .. }
            | TaskCommand::Forward { user_id, .. }
            | TaskCommand::Release { user_id, .. }
            | TaskCommand::Resume { user_id, .. }
            | TaskCommand::Skip { user_id, .. }
            | TaskCommand::Start { user_id, .. }
            | TaskCommand::Stop { user_id, .. }
            | TaskCommand::Suspend { user_id, .. }
            | TaskCommand::Nominate { user_id, .. } => user_id,
        }
    }
}
