//! Command dispatcher
//!
//! Translates one inbound request (task id, raw operation name, parameter
//! bag, acting user) into a typed [`TaskCommand`] and executes it against
//! the engine adapter. Validation is strictly front-loaded: the operation
//! name is resolved before any parameter is extracted, and every extraction
//! failure aborts before the engine is touched.

use crate::command::TaskCommand;
use crate::engine::{EngineOutcome, TaskEngine};
use crate::errors::Result;
use crate::params::{self, ParamBag};
use crate::registry::Operation;
use std::sync::Arc;

/// Stateless dispatcher over an engine adapter
///
/// Holds nothing but the engine handle; a single instance is safe to share
/// across any number of concurrent request workers.
#[derive(Clone)]
pub struct Dispatcher {
    engine: Arc<dyn TaskEngine>,
}

impl Dispatcher {
    /// Create a dispatcher over the given engine adapter
    pub fn new(engine: Arc<dyn TaskEngine>) -> Self {
        Self { engine }
    }

    /// Dispatch one task operation
    ///
    /// Resolves the operation name, extracts the declared parameters, builds
    /// the command, and executes it on the engine exactly once.
    ///
    /// # Errors
    ///
    /// * `UnsupportedOperation` — unknown operation name (no extraction or
    ///   engine call happens)
    /// * `MissingParameter` / `InvalidParameter` — declared parameter absent
    ///   or malformed (engine never invoked)
    /// * `NotFound` / `Conflict` / `Engine` — mapped engine failures
    pub fn dispatch(
        &self,
        task_id: i64,
        raw_operation: &str,
        bag: &ParamBag,
        user_id: &str,
    ) -> Result<EngineOutcome> {
        let operation = Operation::resolve(raw_operation)?;
        tracing::debug!(
            operation = operation.name(),
            task_id,
            user = user_id,
            "executing task operation"
        );

        let cmd = build_command(operation, task_id, user_id, bag)?;
        self.engine.execute(cmd).map_err(Into::into)
    }
}

/// Build the typed command for a resolved operation
///
/// One arm per registered operation; the match is exhaustive, so a registry
/// entry without a factory arm is a compile error rather than a default
/// branch at runtime.
fn build_command(
    operation: Operation,
    task_id: i64,
    user_id: &str,
    bag: &ParamBag,
) -> Result<TaskCommand> {
    let user_id = user_id.to_string();
    let op_name = operation.name();

    let cmd = match operation {
        Operation::Activate => TaskCommand::Activate { task_id, user_id },
        Operation::Claim => TaskCommand::Claim { task_id, user_id },
        Operation::ClaimNextAvailable => TaskCommand::ClaimNextAvailable { user_id },
        Operation::Complete => TaskCommand::Complete {
            task_id,
            user_id,
            data: params::data_map(bag, op_name),
        },
        Operation::Delegate => TaskCommand::Delegate {
            task_id,
            user_id,
            target_entity_id: params::required_string(bag, op_name, "targetEntityId")?,
        },
        Operation::Exit => TaskCommand::Exit { task_id, user_id },
        Operation::Fail => TaskCommand::Fail {
            task_id,
            user_id,
            data: params::data_map(bag, op_name),
        },
        Operation::Forward => TaskCommand::Forward {
            task_id,
            user_id,
            target_entity_id: params::required_string(bag, op_name, "targetEntityId")?,
        },
        Operation::Nominate => TaskCommand::Nominate {
            task_id,
            user_id,
            potential_owners: params::org_entity_list(bag, op_name, true)?,
        },
        Operation::Release => TaskCommand::Release { task_id, user_id },
        Operation::Resume => TaskCommand::Resume { task_id, user_id },
        Operation::Skip => TaskCommand::Skip { task_id, user_id },
        Operation::Start => TaskCommand::Start { task_id, user_id },
        Operation::Stop => TaskCommand::Stop { task_id, user_id },
        Operation::Suspend => TaskCommand::Suspend { task_id, user_id },
    };
    Ok(cmd)
}
