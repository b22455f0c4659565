use super::errors::SlotError;
use super::proxy::SlotProxy;
use crate::core::types::Symbol;

/// Backing storage for the belt: slot contents plus the parallel touched flags.
///
/// Only the belt owns this. Workers reach a single slot through a [`SlotProxy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMemory {
    slots: Vec<Symbol>,
    touched: Vec<bool>,
}

impl SlotMemory {
    /// Create memory of `size` empty, untouched slots
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![Symbol::Empty; size],
            touched: vec![false; size],
        }
    }

    /// Create memory with the given contents, all untouched
    pub fn from_symbols(slots: Vec<Symbol>) -> Self {
        let touched = vec![false; slots.len()];
        Self { slots, touched }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Symbol] {
        &self.slots
    }

    pub fn touched(&self) -> &[bool] {
        &self.touched
    }

    /// Grant read/write access to exactly one slot
    pub fn proxy(&mut self, index: usize) -> Result<SlotProxy<'_>, SlotError> {
        let len = self.slots.len();
        match (self.slots.get_mut(index), self.touched.get_mut(index)) {
            (Some(symbol), Some(touched)) => Ok(SlotProxy::new(index, symbol, touched)),
            _ => Err(SlotError::IndexOutOfBounds { index, len }),
        }
    }

    /// Move every slot one position toward the output end and place `incoming`
    /// untouched at the input end.
    ///
    /// Returns the symbol pushed off the end together with its touched flag, or
    /// `None` for a zero-sized memory.
    pub fn shift(&mut self, incoming: Symbol) -> Option<(Symbol, bool)> {
        let ejected = self.slots.pop()?;
        let ejected_touched = self.touched.pop().unwrap_or(false);
        self.slots.insert(0, incoming);
        self.touched.insert(0, false);
        Some((ejected, ejected_touched))
    }
}
