pub mod worker;
pub mod worker_pair;

// Re-export commonly used types
pub use worker::{Worker, WorkerSnapshot, MAX_TRANSITIONS_PER_WORK};
pub use worker_pair::WorkerPair;
