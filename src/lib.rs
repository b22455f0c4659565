pub mod core;

// Re-export commonly used types
pub use crate::core::components::{Worker, WorkerPair, WorkerSnapshot};
pub use crate::core::execution::{
    Belt, BeltConfig, BeltView, SimulationEngine, SimulationReport, SymbolCounts, TickObserver,
    TickOutcome, WorkSummary,
};
pub use crate::core::memory::{SlotError, SlotMemory, SlotProxy};
pub use crate::core::state::{SimulationError, WorkerState};
pub use crate::core::types::{Side, Symbol, ASSEMBLY_DURATION};
