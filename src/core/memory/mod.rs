pub mod errors;
pub mod proxy;
pub mod slots;

// Re-export commonly used types
pub use errors::SlotError;
pub use proxy::SlotProxy;
pub use slots::SlotMemory;
