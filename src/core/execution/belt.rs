use super::config::BeltConfig;
use crate::core::components::WorkerPair;
use crate::core::memory::{SlotError, SlotMemory};
use crate::core::state::SimulationError;
use crate::core::types::Symbol;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Per-symbol tallies, keyed by raw component kind and `Finished`
pub type SymbolCounts = BTreeMap<Symbol, u64>;

/// Tally with a zero entry for every raw component kind and for `Finished`
pub fn empty_counts() -> SymbolCounts {
    Symbol::COMPONENTS
        .iter()
        .copied()
        .chain(std::iter::once(Symbol::Finished))
        .map(|symbol| (symbol, 0))
        .collect()
}

/// Whether a symbol counts towards output: finished products always do, raw
/// components only when no worker ever picked them up
pub fn counts_as_output(symbol: Symbol, touched: bool) -> bool {
    symbol.is_finished() || (symbol.is_component() && !touched)
}

/// What happened at the belt ends during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickOutcome {
    /// Symbol injected into the first slot
    pub injected: Symbol,
    /// Whether any worker changed anything
    pub changed: bool,
    /// Symbol pushed off the last slot
    pub ejected: Symbol,
    /// Touched flag of the ejected symbol
    pub ejected_touched: bool,
}

/// Result of running the belt for a number of ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkSummary {
    /// Ejected symbols that were finished or never picked up
    pub counts: SymbolCounts,
    /// Number of ticks in which at least one worker changed something
    pub changes: u64,
}

impl WorkSummary {
    pub fn new() -> Self {
        Self {
            counts: empty_counts(),
            changes: 0,
        }
    }

    /// Fold one tick into the tally
    pub fn record(&mut self, outcome: &TickOutcome) {
        if counts_as_output(outcome.ejected, outcome.ejected_touched) {
            *self.counts.entry(outcome.ejected).or_insert(0) += 1;
        }
        if outcome.changed {
            self.changes += 1;
        }
    }
}

impl Default for WorkSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the belt handed to observers and renderers
#[derive(Debug, Clone, Copy)]
pub struct BeltView<'a> {
    pub tick: u64,
    pub slots: &'a [Symbol],
    pub touched: &'a [bool],
    pub pairs: &'a [WorkerPair],
}

/// A conveyor belt of slots with a pair of workers at every position.
///
/// Owns the slot memory; each worker pair only ever sees its own slot through
/// a proxy. Generic over the random source so runs can be scripted.
#[derive(Debug)]
pub struct Belt<R = StdRng> {
    memory: SlotMemory,
    pairs: Vec<WorkerPair>,
    rng: R,
    current_tick: u64,
    injected: SymbolCounts,
}

impl Belt<StdRng> {
    /// Create a belt of `size` empty slots, seeded when `seed` is given
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self, SimulationError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(size, rng)
    }

    pub fn from_config(config: &BeltConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Self::new(config.size, config.seed)
    }
}

impl<R: Rng> Belt<R> {
    /// Create a belt of `size` empty slots drawing from `rng`
    pub fn with_rng(size: usize, rng: R) -> Result<Self, SimulationError> {
        Self::from_memory(SlotMemory::new(size), rng)
    }

    /// Create a belt with preset slot contents (untouched, not counted as injected)
    pub fn from_symbols(slots: Vec<Symbol>, rng: R) -> Result<Self, SimulationError> {
        Self::from_memory(SlotMemory::from_symbols(slots), rng)
    }

    fn from_memory(memory: SlotMemory, rng: R) -> Result<Self, SimulationError> {
        if memory.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "belt size must be at least 1".to_string(),
            ));
        }
        let pairs = (0..memory.len()).map(WorkerPair::new).collect();
        Ok(Self {
            memory,
            pairs,
            rng,
            current_tick: 0,
            injected: Symbol::COMPONENTS.iter().map(|&symbol| (symbol, 0)).collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.memory.len()
    }

    pub fn slots(&self) -> &[Symbol] {
        self.memory.slots()
    }

    pub fn touched(&self) -> &[bool] {
        self.memory.touched()
    }

    pub fn pairs(&self) -> &[WorkerPair] {
        &self.pairs
    }

    pub fn pair(&self, index: usize) -> Option<&WorkerPair> {
        self.pairs.get(index)
    }

    /// Put a worker pair in place of the one at its index
    pub fn set_pair(&mut self, pair: WorkerPair) -> Result<(), SimulationError> {
        let len = self.pairs.len();
        let index = pair.index();
        let slot = self
            .pairs
            .get_mut(index)
            .ok_or(SlotError::IndexOutOfBounds { index, len })?;
        *slot = pair;
        Ok(())
    }

    /// Number of ticks run so far (pre-filling does not count)
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Raw components injected so far, including during pre-fill
    pub fn injected_totals(&self) -> &SymbolCounts {
        &self.injected
    }

    pub fn view(&self) -> BeltView<'_> {
        BeltView {
            tick: self.current_tick,
            slots: self.memory.slots(),
            touched: self.memory.touched(),
            pairs: &self.pairs,
        }
    }

    /// Advance the simulation by one tick: shift and inject, then let every
    /// pair work on its slot
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        self.current_tick += 1;
        debug!("=== Belt tick {} ===", self.current_tick);

        let (injected, ejected, ejected_touched) = self.shift();
        let changed = self.work_pairs()?;

        Ok(TickOutcome {
            injected,
            changed,
            ejected,
            ejected_touched,
        })
    }

    /// Run `ticks` ticks and tally what left the belt
    pub fn work(&mut self, ticks: u64) -> Result<WorkSummary, SimulationError> {
        let mut summary = WorkSummary::new();
        for _ in 0..ticks {
            let outcome = self.tick()?;
            summary.record(&outcome);
        }
        Ok(summary)
    }

    /// Tally of symbols still on the belt, by the same rule as [`Belt::work`]
    pub fn get_in_progress(&self) -> SymbolCounts {
        let mut counts = empty_counts();
        for (&symbol, &touched) in self.memory.slots().iter().zip(self.memory.touched()) {
            if counts_as_output(symbol, touched) {
                *counts.entry(symbol).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Fill every slot with random content without letting workers react
    pub fn pre_fill(&mut self) {
        for _ in 0..self.size() {
            self.shift();
        }
    }

    /// Move the belt one slot towards its output end, injecting a random symbol.
    /// Returns the injected symbol, the ejected one and the ejected symbol's
    /// touched flag.
    fn shift(&mut self) -> (Symbol, Symbol, bool) {
        let incoming = Symbol::CHOICES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Symbol::Empty);
        if incoming.is_component() {
            *self.injected.entry(incoming).or_insert(0) += 1;
        }
        let (ejected, ejected_touched) = self
            .memory
            .shift(incoming)
            .unwrap_or((Symbol::Empty, false));
        (incoming, ejected, ejected_touched)
    }

    /// Visit all pairs in random order, stably sorted by descending priority
    fn work_pairs(&mut self) -> Result<bool, SimulationError> {
        let mut order: Vec<usize> = (0..self.pairs.len()).collect();
        order.shuffle(&mut self.rng);
        let priorities: Vec<u64> = self.pairs.iter().map(WorkerPair::priority).collect();
        order.sort_by_key(|&i| Reverse(priorities.get(i).copied().unwrap_or(0)));

        let len = self.pairs.len();
        let mut changed = false;
        for index in order {
            let pair = self
                .pairs
                .get_mut(index)
                .ok_or(SlotError::IndexOutOfBounds { index, len })?;
            let mut slot = self.memory.proxy(pair.index())?;
            if pair.work(&mut slot, &mut self.rng)? {
                changed = true;
            }
        }
        Ok(changed)
    }
}
