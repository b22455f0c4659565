use crate::core::memory::{SlotError, SlotProxy};
use crate::core::state::{SimulationError, WorkerState};
use crate::core::types::{Side, Symbol, ASSEMBLY_DURATION};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Upper bound on state visits within a single call to [`Worker::work`].
///
/// The longest chain of free transitions is two steps (for example
/// `LeftFullRightFinished -> StartAssembling -> Assembling`).
pub const MAX_TRANSITIONS_PER_WORK: usize = 4;

/// Plain copy of a worker's state, for renderers, diagnostics and restoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    pub index: usize,
    pub side: Side,
    pub state: WorkerState,
    pub left_hand: Symbol,
    pub right_hand: Symbol,
    pub assembly_remaining: u32,
    pub total_assembled: u64,
    pub slot_actions: u64,
}

impl WorkerSnapshot {
    /// Snapshot of a fresh worker: ready, hands empty
    pub fn new(index: usize, side: Side) -> Self {
        Self {
            index,
            side,
            state: WorkerState::Ready,
            left_hand: Symbol::Empty,
            right_hand: Symbol::Empty,
            assembly_remaining: 0,
            total_assembled: 0,
            slot_actions: 0,
        }
    }

    pub fn with_state(mut self, state: WorkerState) -> Self {
        self.state = state;
        self
    }

    pub fn with_hands(mut self, left_hand: Symbol, right_hand: Symbol) -> Self {
        self.left_hand = left_hand;
        self.right_hand = right_hand;
        self
    }

    pub fn with_assembly_remaining(mut self, remaining: u32) -> Self {
        self.assembly_remaining = remaining;
        self
    }
}

/// Result of visiting one state
enum Step {
    /// Free transition, keep going within this tick
    Continue,
    /// Done for this tick; the flag tells whether the worker changed anything
    Stop(bool),
}

/// A worker standing at one belt position, on one side.
///
/// Picks two different components off its slot, assembles them over
/// [`ASSEMBLY_DURATION`] ticks and puts the finished product back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    index: usize,
    side: Side,
    state: WorkerState,
    left_hand: Symbol,
    right_hand: Symbol,
    assembly_remaining: u32,
    total_assembled: u64,
    slot_actions: u64,
}

impl Worker {
    pub fn new(index: usize, side: Side) -> Self {
        Self::from_snapshot(WorkerSnapshot::new(index, side))
    }

    /// Rebuild a worker from a snapshot
    pub fn from_snapshot(snapshot: WorkerSnapshot) -> Self {
        Self {
            index: snapshot.index,
            side: snapshot.side,
            state: snapshot.state,
            left_hand: snapshot.left_hand,
            right_hand: snapshot.right_hand,
            assembly_remaining: snapshot.assembly_remaining,
            total_assembled: snapshot.total_assembled,
            slot_actions: snapshot.slot_actions,
        }
    }

    pub fn snapshot(&self) -> WorkerSnapshot {
        WorkerSnapshot {
            index: self.index,
            side: self.side,
            state: self.state,
            left_hand: self.left_hand,
            right_hand: self.right_hand,
            assembly_remaining: self.assembly_remaining,
            total_assembled: self.total_assembled,
            slot_actions: self.slot_actions,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn left_hand(&self) -> Symbol {
        self.left_hand
    }

    pub fn right_hand(&self) -> Symbol {
        self.right_hand
    }

    pub fn assembly_remaining(&self) -> u32 {
        self.assembly_remaining
    }

    /// Number of products this worker has finished assembling
    pub fn total_assembled(&self) -> u64 {
        self.total_assembled
    }

    /// Number of successful pick-ups, deposits and swaps
    pub fn slot_actions(&self) -> u64 {
        self.slot_actions
    }

    /// Arbitration score; the higher, the sooner this worker is served.
    ///
    /// Workers stuck with a finished product rank highest, then those with two
    /// identical components, then assemblers by how close they are to done.
    pub fn priority(&self) -> u32 {
        let mut priority = 1;
        if !self.left_hand.is_empty() {
            priority += 1;
        }
        if !self.right_hand.is_empty() {
            priority += 1;
        }
        priority
            + match self.state {
                WorkerState::Assembling => {
                    (1 + ASSEMBLY_DURATION).saturating_sub(self.assembly_remaining)
                }
                WorkerState::LeftFullRightFullSame => 1 + ASSEMBLY_DURATION + 1,
                WorkerState::LeftEmptyRightFinished => 1 + ASSEMBLY_DURATION + 2,
                WorkerState::LeftFullRightFinished => 1 + ASSEMBLY_DURATION + 3,
                _ => 0,
            }
    }

    /// Perform one tick's worth of work on this worker's slot.
    ///
    /// Returns `Ok(true)` if the worker changed anything, `Ok(false)` if it was
    /// blocked or only counting down. At most one slot-touching action happens
    /// per call.
    pub fn work(&mut self, slot: &mut SlotProxy<'_>) -> Result<bool, SimulationError> {
        if slot.index() != self.index {
            return Err(SlotError::ForeignSlot {
                worker_index: self.index,
                slot_index: slot.index(),
            }
            .into());
        }

        for _ in 0..MAX_TRANSITIONS_PER_WORK {
            trace!("Worker ({}) visiting state {:?}", self, self.state);
            match self.step(slot)? {
                Step::Continue => continue,
                Step::Stop(changed) => return Ok(changed),
            }
        }

        Err(SimulationError::TransitionLimit {
            worker: self.to_string(),
            state: self.state,
        })
    }

    fn step(&mut self, slot: &mut SlotProxy<'_>) -> Result<Step, SimulationError> {
        match self.state {
            WorkerState::Ready => {
                if self.pick_left(slot) {
                    debug!("Worker ({}) picked up with left hand", self);
                    self.state = WorkerState::LeftFull;
                    return Ok(Step::Stop(true));
                }
                Ok(Step::Stop(false))
            }
            WorkerState::LeftFull => {
                if self.pick_right(slot) {
                    debug!("Worker ({}) picked up with right hand", self);
                    self.state = WorkerState::StartAssembling;
                    return Ok(Step::Continue);
                }
                Ok(Step::Stop(false))
            }
            WorkerState::StartAssembling => {
                if !(self.left_hand.is_component()
                    && self.right_hand.is_component()
                    && self.left_hand != self.right_hand)
                {
                    return Err(self.violation("assembly needs two different components"));
                }
                self.assembly_remaining = ASSEMBLY_DURATION;
                self.state = WorkerState::Assembling;
                debug!("Worker ({}) starts assembling", self);
                Ok(Step::Stop(true))
            }
            WorkerState::Assembling => {
                self.assembly_remaining = self.assembly_remaining.saturating_sub(1);
                if self.assembly_remaining > 0 {
                    return Ok(Step::Stop(false));
                }
                self.total_assembled += 1;
                if self.set_finished(slot, false)? {
                    debug!("Worker ({}) put the finished product on the belt", self);
                    self.state = WorkerState::Assembled;
                    return Ok(Step::Continue);
                }
                debug!("Worker ({}) holds the finished product, slot is occupied", self);
                self.left_hand = Symbol::Empty;
                self.right_hand = Symbol::Finished;
                self.state = WorkerState::LeftEmptyRightFinished;
                Ok(Step::Stop(false))
            }
            WorkerState::Assembled => {
                self.left_hand = Symbol::Empty;
                self.right_hand = Symbol::Empty;
                self.state = WorkerState::Ready;
                Ok(Step::Stop(true))
            }
            WorkerState::LeftEmptyRightFinished => {
                if self.set_finished(slot, true)? {
                    debug!("Worker ({}) put the finished product on the belt", self);
                    self.state = WorkerState::Ready;
                } else if self.can_swap(slot) {
                    self.swap(slot)?;
                    debug!("Worker ({}) swapped the finished product", self);
                    self.state = WorkerState::LeftFull;
                } else if self.pick_left(slot) {
                    debug!("Worker ({}) picked up with left hand", self);
                    self.state = WorkerState::LeftFullRightFinished;
                } else {
                    return Ok(Step::Stop(false));
                }
                Ok(Step::Stop(true))
            }
            WorkerState::LeftFullRightFinished => {
                if self.set_finished(slot, true)? {
                    debug!("Worker ({}) put the finished product on the belt", self);
                    self.state = WorkerState::LeftFull;
                    return Ok(Step::Stop(true));
                }
                if !self.can_swap(slot) {
                    return Ok(Step::Stop(false));
                }
                self.swap(slot)?;
                debug!("Worker ({}) swapped the finished product", self);
                if self.left_hand == self.right_hand {
                    self.state = WorkerState::LeftFullRightFullSame;
                    return Ok(Step::Stop(true));
                }
                self.state = WorkerState::StartAssembling;
                Ok(Step::Continue)
            }
            WorkerState::LeftFullRightFullSame => {
                if !self.can_swap(slot) {
                    return Ok(Step::Stop(false));
                }
                self.swap(slot)?;
                debug!("Worker ({}) swapped a duplicate component", self);
                self.state = WorkerState::StartAssembling;
                Ok(Step::Continue)
            }
        }
    }

    fn pick_left(&mut self, slot: &mut SlotProxy<'_>) -> bool {
        if self.left_hand.is_empty() && slot.read().is_component() {
            self.left_hand = slot.take();
            self.slot_actions += 1;
            return true;
        }
        false
    }

    fn pick_right(&mut self, slot: &mut SlotProxy<'_>) -> bool {
        let content = slot.read();
        if self.right_hand.is_empty() && content.is_component() && content != self.left_hand {
            self.right_hand = slot.take();
            self.slot_actions += 1;
            return true;
        }
        false
    }

    /// Deposit a finished product into an empty slot.
    ///
    /// Always clears the right hand; clears the left one unless `hold_left`.
    fn set_finished(
        &mut self,
        slot: &mut SlotProxy<'_>,
        hold_left: bool,
    ) -> Result<bool, SimulationError> {
        if !slot.read().is_empty() {
            return Ok(false);
        }
        if hold_left && !self.right_hand.is_finished() {
            return Err(self.violation("keeping the left hand requires a finished product in the right"));
        }
        slot.replace(Symbol::Finished);
        self.right_hand = Symbol::Empty;
        if !hold_left {
            self.left_hand = Symbol::Empty;
        }
        self.slot_actions += 1;
        Ok(true)
    }

    fn can_swap(&self, slot: &SlotProxy<'_>) -> bool {
        let content = slot.read();
        if !content.is_component() {
            return false;
        }
        let holds_finished = self.right_hand.is_finished();
        let holds_duplicates = self.left_hand.is_component()
            && self.left_hand == self.right_hand
            && content != self.left_hand;
        holds_finished || holds_duplicates
    }

    /// Exchange a held symbol with the slot content when a plain deposit is
    /// impossible. The right hand is traded first.
    fn swap(&mut self, slot: &mut SlotProxy<'_>) -> Result<(), SimulationError> {
        if !self.can_swap(slot) {
            return Err(self.violation("swap attempted without a finished product or duplicate to trade"));
        }
        let content = slot.read();
        if self.right_hand != content {
            self.right_hand = slot.replace(self.right_hand);
        } else {
            self.left_hand = slot.replace(self.left_hand);
        }
        if self.left_hand.is_empty() && !self.right_hand.is_empty() {
            self.left_hand = self.right_hand;
            self.right_hand = Symbol::Empty;
        }
        self.slot_actions += 1;
        Ok(())
    }

    fn violation(&self, reason: &str) -> SimulationError {
        SimulationError::InvariantViolation {
            worker: self.to_string(),
            state: self.state,
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.side, self.index)?;
        if !self.left_hand.is_empty() || !self.right_hand.is_empty() {
            write!(f, "|{},{}", self.left_hand, self.right_hand)?;
        }
        if self.state == WorkerState::Assembling {
            write!(f, "|{}", self.assembly_remaining)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let worker = Worker::new(1, Side::Up);
        assert_eq!(worker.state(), WorkerState::Ready);
        assert_eq!(worker.left_hand(), Symbol::Empty);
        assert_eq!(worker.right_hand(), Symbol::Empty);
        assert_eq!(worker.assembly_remaining(), 0);
        assert_eq!(worker.priority(), 1);
    }

    #[test]
    fn test_priority_by_state() {
        let assembling = Worker::from_snapshot(
            WorkerSnapshot::new(0, Side::Up)
                .with_state(WorkerState::Assembling)
                .with_hands(Symbol::ComponentA, Symbol::ComponentB)
                .with_assembly_remaining(ASSEMBLY_DURATION),
        );
        assert_eq!(assembling.priority(), 3 + 1);

        let almost_done = Worker::from_snapshot(
            WorkerSnapshot::new(0, Side::Up)
                .with_state(WorkerState::Assembling)
                .with_hands(Symbol::ComponentA, Symbol::ComponentB)
                .with_assembly_remaining(1),
        );
        assert_eq!(almost_done.priority(), 3 + ASSEMBLY_DURATION);

        let same = Worker::from_snapshot(
            WorkerSnapshot::new(0, Side::Up)
                .with_state(WorkerState::LeftFullRightFullSame)
                .with_hands(Symbol::ComponentA, Symbol::ComponentA),
        );
        assert_eq!(same.priority(), 3 + ASSEMBLY_DURATION + 2);

        let left_empty = Worker::from_snapshot(
            WorkerSnapshot::new(0, Side::Up)
                .with_state(WorkerState::LeftEmptyRightFinished)
                .with_hands(Symbol::Empty, Symbol::Finished),
        );
        assert_eq!(left_empty.priority(), 2 + ASSEMBLY_DURATION + 3);

        let left_full = Worker::from_snapshot(
            WorkerSnapshot::new(0, Side::Up)
                .with_state(WorkerState::LeftFullRightFinished)
                .with_hands(Symbol::ComponentB, Symbol::Finished),
        );
        assert_eq!(left_full.priority(), 3 + ASSEMBLY_DURATION + 4);
        assert!(left_full.priority() > left_empty.priority());
        assert!(same.priority() > almost_done.priority());
    }

    #[test]
    fn test_display() {
        let worker = Worker::from_snapshot(
            WorkerSnapshot::new(1, Side::Up)
                .with_state(WorkerState::Assembling)
                .with_hands(Symbol::ComponentA, Symbol::ComponentB)
                .with_assembly_remaining(3),
        );
        assert_eq!(worker.to_string(), "^|1|A,B|3");
        assert_eq!(Worker::new(2, Side::Down).to_string(), "v|2");
    }

    #[test]
    fn test_snapshot_restores_worker() {
        let snapshot = WorkerSnapshot::new(4, Side::Down)
            .with_state(WorkerState::LeftFull)
            .with_hands(Symbol::ComponentB, Symbol::Empty);
        let worker = Worker::from_snapshot(snapshot.clone());
        assert_eq!(worker.snapshot(), snapshot);
    }
}
