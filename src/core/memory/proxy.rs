use crate::core::types::Symbol;

/// Access to a single belt slot, handed to the worker pair standing at `index`.
///
/// Borrows one symbol and its touched flag out of [`SlotMemory`](super::SlotMemory);
/// no other slot is reachable through it.
#[derive(Debug)]
pub struct SlotProxy<'a> {
    index: usize,
    symbol: &'a mut Symbol,
    touched: &'a mut bool,
}

impl<'a> SlotProxy<'a> {
    pub(crate) fn new(index: usize, symbol: &'a mut Symbol, touched: &'a mut bool) -> Self {
        Self {
            index,
            symbol,
            touched,
        }
    }

    /// Index of the slot this proxy grants access to
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current content of the slot
    pub fn read(&self) -> Symbol {
        *self.symbol
    }

    pub fn is_touched(&self) -> bool {
        *self.touched
    }

    /// Take the content out of the slot, leaving it empty and touched
    pub fn take(&mut self) -> Symbol {
        *self.touched = true;
        std::mem::take(self.symbol)
    }

    /// Put `symbol` into the slot and return what was there, marking it touched
    pub fn replace(&mut self, symbol: Symbol) -> Symbol {
        *self.touched = true;
        std::mem::replace(self.symbol, symbol)
    }

    pub fn mark_touched(&mut self) {
        *self.touched = true;
    }
}

#[cfg(test)]
mod tests {
    use crate::core::memory::SlotMemory;
    use crate::core::types::Symbol;

    #[test]
    fn test_take_empties_and_touches() {
        let mut memory = SlotMemory::from_symbols(vec![Symbol::Empty, Symbol::ComponentA]);
        let mut proxy = memory.proxy(1).unwrap();
        assert_eq!(proxy.index(), 1);
        assert!(!proxy.is_touched());

        assert_eq!(proxy.take(), Symbol::ComponentA);
        assert_eq!(proxy.read(), Symbol::Empty);
        assert!(proxy.is_touched());

        assert_eq!(memory.slots(), &[Symbol::Empty, Symbol::Empty]);
        assert_eq!(memory.touched(), &[false, true]);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut memory = SlotMemory::from_symbols(vec![Symbol::ComponentB]);
        let mut proxy = memory.proxy(0).unwrap();
        assert_eq!(proxy.replace(Symbol::Finished), Symbol::ComponentB);
        assert_eq!(proxy.read(), Symbol::Finished);
        assert!(proxy.is_touched());
    }
}
