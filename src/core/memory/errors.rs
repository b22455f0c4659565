/// Errors raised when a worker asks for access to belt memory it does not own
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// The requested index is outside the slot array
    IndexOutOfBounds { index: usize, len: usize },
    /// A worker was handed a proxy for a slot other than its own
    ForeignSlot { worker_index: usize, slot_index: usize },
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotError::IndexOutOfBounds { index, len } => {
                write!(f, "Slot index {} out of bounds for belt of size {}", index, len)
            }
            SlotError::ForeignSlot { worker_index, slot_index } => write!(
                f,
                "Worker at index {} cannot access slot {}",
                worker_index, slot_index
            ),
        }
    }
}

impl std::error::Error for SlotError {}
