use std::sync::{Arc, Mutex};
use taskgate_core::{EngineError, EngineOutcome, TaskCommand, TaskEngine};

/// Engine double that records every command it receives
///
/// Returns `Ack` unless constructed with a canned failure. Tests keep a
/// second `Arc` to inspect the recorded calls afterwards.
pub struct RecordingEngine {
    commands: Mutex<Vec<TaskCommand>>,
    failure: Option<EngineError>,
}

impl RecordingEngine {
    #[allow(dead_code)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            commands: Mutex::new(Vec::new()),
            failure: None,
        })
    }

    /// Engine that fails every execution with the given error
    #[allow(dead_code)]
    pub fn failing_with(failure: EngineError) -> Arc<Self> {
        Arc::new(Self {
            commands: Mutex::new(Vec::new()),
            failure: Some(failure),
        })
    }

    /// Number of executions the engine has seen
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.commands.lock().unwrap().len()
    }

    /// Snapshot of every command received, in order
    #[allow(dead_code)]
    pub fn commands(&self) -> Vec<TaskCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl TaskEngine for RecordingEngine {
    fn execute(&self, cmd: TaskCommand) -> Result<EngineOutcome, EngineError> {
        self.commands.lock().unwrap().push(cmd);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(EngineOutcome::Ack),
        }
    }
}
