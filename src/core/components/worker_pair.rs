use super::worker::Worker;
use crate::core::memory::SlotProxy;
use crate::core::state::SimulationError;
use crate::core::types::Side;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

/// The two workers standing on either side of one belt slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPair {
    index: usize,
    up: Worker,
    down: Worker,
}

impl WorkerPair {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            up: Worker::new(index, Side::Up),
            down: Worker::new(index, Side::Down),
        }
    }

    /// Build a pair from existing workers, which must share `index` and stand
    /// on their expected sides
    pub fn from_workers(up: Worker, down: Worker) -> Result<Self, SimulationError> {
        if up.side() != Side::Up || down.side() != Side::Down {
            return Err(SimulationError::InvalidConfig(format!(
                "Worker pair needs an up and a down worker, got ({}) and ({})",
                up, down
            )));
        }
        if up.index() != down.index() {
            return Err(SimulationError::InvalidConfig(format!(
                "Workers ({}) and ({}) do not share a slot",
                up, down
            )));
        }
        Ok(Self {
            index: up.index(),
            up,
            down,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&self) -> &Worker {
        &self.up
    }

    pub fn down(&self) -> &Worker {
        &self.down
    }

    pub fn worker(&self, side: Side) -> &Worker {
        match side {
            Side::Up => &self.up,
            Side::Down => &self.down,
        }
    }

    fn worker_mut(&mut self, side: Side) -> &mut Worker {
        match side {
            Side::Up => &mut self.up,
            Side::Down => &mut self.down,
        }
    }

    /// Ordering key among pairs: product of both workers' priorities
    pub fn priority(&self) -> u64 {
        u64::from(self.up.priority()) * u64::from(self.down.priority())
    }

    /// Let at most one of the two workers act on the shared slot.
    ///
    /// Workers are shuffled, then stably sorted by descending priority so ties
    /// keep the random order. The first worker that reports a change ends the
    /// turn; the other one is not invoked.
    pub fn work<R: Rng + ?Sized>(
        &mut self,
        slot: &mut SlotProxy<'_>,
        rng: &mut R,
    ) -> Result<bool, SimulationError> {
        let mut order = [Side::Up, Side::Down];
        order.shuffle(rng);
        order.sort_by_key(|side| Reverse(self.worker(*side).priority()));

        for side in order {
            let worker = self.worker_mut(side);
            if worker.work(slot)? {
                trace!("Worker ({}) acted on slot {}", worker, slot.index());
                return Ok(true);
            }
        }
        Ok(false)
    }
}
