pub mod belt;
pub mod config;
pub mod simulation_engine;

// Re-export commonly used types
pub use belt::{Belt, BeltView, SymbolCounts, TickOutcome, WorkSummary};
pub use config::BeltConfig;
pub use simulation_engine::{SimulationEngine, SimulationReport, TickObserver};
