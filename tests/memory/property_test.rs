/*!
 * Pool Invariant Property Tests
 * Random operation sequences must keep the pool well-formed
 */

use memsim::memory::{coalesce, validate_layout, Block, MemoryManager};
use proptest::prelude::*;

const CAPACITY: usize = 256;

#[derive(Debug, Clone)]
enum Op {
    Allocate(u32, usize),
    Deallocate(u32),
    Resize(u32, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..6, 1usize..80).prop_map(|(pid, size)| Op::Allocate(pid, size)),
        (0u32..6).prop_map(Op::Deallocate),
        (0u32..6, 1usize..120).prop_map(|(pid, size)| Op::Resize(pid, size)),
    ]
}

fn apply(manager: &mut MemoryManager, op: &Op) {
    match *op {
        Op::Allocate(pid, size) => {
            let _ = manager.allocate(pid, size);
        }
        Op::Deallocate(pid) => {
            manager.deallocate(pid);
        }
        Op::Resize(pid, size) => {
            let _ = manager.resize(pid, size);
        }
    }
}

fn assert_well_formed(manager: &MemoryManager) -> Result<(), TestCaseError> {
    let blocks = manager.blocks();
    prop_assert!(validate_layout(blocks).is_ok(), "bad layout: {:?}", blocks);
    prop_assert_eq!(blocks.iter().map(|b| b.size).sum::<usize>(), CAPACITY);
    prop_assert_eq!(blocks[0].start, 0);
    for block in blocks {
        prop_assert!(block.size > 0);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_operations_preserve_invariants(ops in prop::collection::vec(op(), 1..60)) {
        let mut manager = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut manager, op);
            assert_well_formed(&manager)?;
        }
    }

    #[test]
    fn prop_failed_operations_leave_pool_unchanged(
        ops in prop::collection::vec(op(), 1..40),
        probe in op(),
    ) {
        let mut manager = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut manager, op);
        }

        let before = manager.blocks().to_vec();
        let failed = match probe {
            Op::Allocate(pid, size) => manager.allocate(pid, size).is_err(),
            Op::Resize(pid, size) => manager.resize(pid, size).is_err(),
            Op::Deallocate(_) => false,
        };
        if failed {
            prop_assert_eq!(manager.blocks(), before.as_slice());
        }
    }

    #[test]
    fn prop_allocate_then_deallocate_round_trips(
        ops in prop::collection::vec(op(), 0..40),
        size in 1usize..64,
    ) {
        let mut manager = MemoryManager::with_capacity(CAPACITY).unwrap();
        for op in &ops {
            apply(&mut manager, op);
        }

        let fresh_pid = 1000;
        let before = manager.blocks().to_vec();
        if manager.allocate(fresh_pid, size).is_ok() {
            prop_assert_eq!(manager.deallocate(fresh_pid), size);
            prop_assert_eq!(manager.blocks(), before.as_slice());
        }
    }

    #[test]
    fn prop_coalesce_normalizes_and_is_idempotent(
        cells in prop::collection::vec((1usize..20, any::<bool>()), 1..30),
    ) {
        let mut start = 0;
        let mut pool: Vec<Block> = cells
            .iter()
            .map(|&(size, occupied)| {
                let block = if occupied {
                    Block::occupied(start, size, 1)
                } else {
                    Block::free(start, size)
                };
                start += size;
                block
            })
            .collect();

        coalesce(&mut pool);
        prop_assert!(validate_layout(&pool).is_ok());
        prop_assert_eq!(pool.iter().map(|b| b.size).sum::<usize>(), start);

        let once = pool.clone();
        prop_assert_eq!(coalesce(&mut pool), 0);
        prop_assert_eq!(pool, once);
    }
}
