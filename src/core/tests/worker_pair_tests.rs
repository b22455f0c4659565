// Tests for arbitration between the two workers sharing a slot
#[cfg(test)]
mod tests {
    use crate::core::components::worker::{Worker, WorkerSnapshot};
    use crate::core::components::worker_pair::WorkerPair;
    use crate::core::memory::SlotMemory;
    use crate::core::state::WorkerState;
    use crate::core::types::{Side, Symbol};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A: Symbol = Symbol::ComponentA;
    const B: Symbol = Symbol::ComponentB;
    const C: Symbol = Symbol::Finished;
    const E: Symbol = Symbol::Empty;

    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn left_full_holding(pair: &WorkerPair, symbol: Symbol) -> usize {
        [pair.up(), pair.down()]
            .iter()
            .filter(|w| w.state() == WorkerState::LeftFull && w.left_hand() == symbol)
            .count()
    }

    #[test]
    fn test_worker_pair_work_once() {
        let mut memory = SlotMemory::from_symbols(vec![E, A, B, E]);
        let mut pair = WorkerPair::new(1);
        let mut rng = zero_rng();

        assert!(pair.work(&mut memory.proxy(1).unwrap(), &mut rng).unwrap());
        assert_eq!(left_full_holding(&pair, A), 1);
        assert_eq!(pair.up().slot_actions() + pair.down().slot_actions(), 1);
        assert_eq!(memory.slots(), &[E, E, B, E]);
    }

    #[test]
    fn test_worker_pair_work_twice() {
        let mut memory = SlotMemory::from_symbols(vec![E, A, B, E]);
        let mut pair = WorkerPair::new(1);
        let mut rng = zero_rng();

        assert!(pair.work(&mut memory.proxy(1).unwrap(), &mut rng).unwrap());
        assert!(!pair.work(&mut memory.proxy(1).unwrap(), &mut rng).unwrap());
        assert_eq!(left_full_holding(&pair, A), 1);
        let ready = [pair.up(), pair.down()]
            .iter()
            .filter(|w| w.state() == WorkerState::Ready)
            .count();
        assert_eq!(ready, 1);
        assert_eq!(memory.slots()[1], E);
    }

    #[test]
    fn test_worker_pair_no_change() {
        let mut memory = SlotMemory::from_symbols(vec![E, A, B, E]);
        let assembling = |side| {
            Worker::from_snapshot(
                WorkerSnapshot::new(1, side)
                    .with_state(WorkerState::Assembling)
                    .with_hands(A, B)
                    .with_assembly_remaining(1),
            )
        };
        let mut pair =
            WorkerPair::from_workers(assembling(Side::Up), assembling(Side::Down)).unwrap();

        assert!(!pair.work(&mut memory.proxy(1).unwrap(), &mut zero_rng()).unwrap());
        // Neither produced a change, so both were given their turn
        assert_eq!(pair.up().state(), WorkerState::LeftEmptyRightFinished);
        assert_eq!(pair.down().state(), WorkerState::LeftEmptyRightFinished);
        assert_eq!(memory.slots()[1], A);
    }

    #[test]
    fn test_blocked_finished_product_served_first() {
        let mut memory = SlotMemory::from_symbols(vec![A]);
        let down = Worker::from_snapshot(
            WorkerSnapshot::new(0, Side::Down)
                .with_state(WorkerState::LeftFullRightFinished)
                .with_hands(B, C),
        );
        let mut pair = WorkerPair::from_workers(Worker::new(0, Side::Up), down).unwrap();

        for seed in 0..8 {
            let mut memory = memory.clone();
            let mut pair = pair.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(pair.work(&mut memory.proxy(0).unwrap(), &mut rng).unwrap());
            assert_eq!(pair.up().state(), WorkerState::Ready);
            assert_eq!(pair.down().state(), WorkerState::Assembling);
            assert_eq!(memory.slots(), &[C]);
        }

        assert!(pair.work(&mut memory.proxy(0).unwrap(), &mut zero_rng()).unwrap());
        assert_eq!(pair.up().slot_actions(), 0);
        assert_eq!(pair.down().right_hand(), A);
    }

    #[test]
    fn test_ties_broken_randomly() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut up_wins = 0;
        let mut down_wins = 0;

        for _ in 0..64 {
            let mut memory = SlotMemory::from_symbols(vec![A]);
            let mut pair = WorkerPair::new(0);
            assert!(pair.work(&mut memory.proxy(0).unwrap(), &mut rng).unwrap());
            match (pair.up().state(), pair.down().state()) {
                (WorkerState::LeftFull, WorkerState::Ready) => up_wins += 1,
                (WorkerState::Ready, WorkerState::LeftFull) => down_wins += 1,
                states => panic!("unexpected states {:?}", states),
            }
        }

        assert!(up_wins > 0);
        assert!(down_wins > 0);
    }

    #[test]
    fn test_only_one_worker_touches_slot_per_turn() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pair = WorkerPair::new(0);
        let contents = [A, B, A, A, E, B, C, A, B, B, E, A];

        for content in contents.iter().cycle().take(200) {
            let mut memory = SlotMemory::from_symbols(vec![*content]);
            let before = (pair.up().slot_actions(), pair.down().slot_actions());
            pair.work(&mut memory.proxy(0).unwrap(), &mut rng).unwrap();
            let after = (pair.up().slot_actions(), pair.down().slot_actions());
            let acted = (after.0 - before.0) + (after.1 - before.1);
            assert!(acted <= 1, "both workers touched the slot in one turn");
        }
    }
}
