use super::memory::errors::SlotError;
use serde::{Deserialize, Serialize};

/// States of a worker's assembly cycle. The machine never terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerState {
    /// Both hands empty, waiting for a component
    Ready,
    /// Left hand holds a component, waiting for a different one
    LeftFull,
    /// Both hands hold different components; assembly starts on this tick
    StartAssembling,
    /// Assembly in progress
    Assembling,
    /// Product deposited; hands are cleared on this tick
    Assembled,
    /// Right hand holds a finished product that could not be deposited
    LeftEmptyRightFinished,
    /// Left hand holds a component, right hand a finished product
    LeftFullRightFinished,
    /// Both hands hold the same component after a swap
    LeftFullRightFullSame,
}

impl Default for WorkerState {
    fn default() -> Self {
        WorkerState::Ready
    }
}

/// Errors that abort a simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Invalid access to belt memory
    Slot(SlotError),
    /// Rejected configuration
    InvalidConfig(String),
    /// A worker reached a state its transition rules do not allow
    InvariantViolation {
        worker: String,
        state: WorkerState,
        reason: String,
    },
    /// Free transitions did not settle within one call to `work`
    TransitionLimit { worker: String, state: WorkerState },
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::Slot(err) => write!(f, "Slot error: {}", err),
            SimulationError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SimulationError::InvariantViolation { worker, state, reason } => write!(
                f,
                "Invariant violated by worker ({}) in state {:?}: {}",
                worker, state, reason
            ),
            SimulationError::TransitionLimit { worker, state } => write!(
                f,
                "Worker ({}) did not settle within one tick, last state {:?}",
                worker, state
            ),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Slot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SlotError> for SimulationError {
    fn from(err: SlotError) -> Self {
        SimulationError::Slot(err)
    }
}
