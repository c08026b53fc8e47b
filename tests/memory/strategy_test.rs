/*!
 * Allocation Strategy Tests
 * Next-fit ordering and plugging alternative placement policies
 */

use memsim::memory::{
    AllocationStrategy, Block, InvariantError, MemoryError, MemoryManager, NextFit, ResizeOutcome,
};
use pretty_assertions::assert_eq;

/// Best-fit placement defined outside the crate: the manager only sees the trait
#[derive(Debug, Default)]
struct BestFit {
    scans: usize,
}

impl AllocationStrategy for BestFit {
    fn find(&mut self, pool: &[Block], size: usize) -> Option<usize> {
        self.scans += 1;
        pool.iter()
            .enumerate()
            .filter(|(_, b)| b.is_free() && b.size >= size)
            .min_by_key(|(_, b)| b.size)
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "best-fit"
    }
}

/// Broken placement that always answers with the first block
#[derive(Debug, Default)]
struct AlwaysFirst;

impl AllocationStrategy for AlwaysFirst {
    fn find(&mut self, _pool: &[Block], _size: usize) -> Option<usize> {
        Some(0)
    }

    fn name(&self) -> &'static str {
        "always-first"
    }
}

fn holes() -> Vec<Block> {
    vec![
        Block::free(0, 30),
        Block::occupied(30, 10, 1),
        Block::free(40, 10),
        Block::occupied(50, 10, 2),
        Block::free(60, 20),
        Block::occupied(80, 20, 3),
    ]
}

#[test]
fn test_next_fit_does_not_revisit_skipped_blocks() {
    let mut manager = MemoryManager::from_blocks(holes(), NextFit::new()).unwrap();

    // Exact fit: no split, cursor moves past the first hole
    assert_eq!(manager.allocate(10, 30), Ok(0));
    assert_eq!(manager.allocate(11, 5), Ok(40));
    // The split remainder sits right at the cursor
    assert_eq!(manager.allocate(12, 5), Ok(45));
    assert_eq!(manager.allocate(13, 5), Ok(60));
    assert_eq!(manager.allocate(14, 5), Ok(65));

    // Space freed behind the cursor is only reached after wrapping
    manager.deallocate(10);
    assert_eq!(manager.allocate(15, 20), Ok(0));
}

#[test]
fn test_next_fit_skips_small_holes_in_order() {
    let mut manager = MemoryManager::from_blocks(holes(), NextFit::new()).unwrap();

    assert_eq!(manager.allocate(10, 30), Ok(0));
    // The 10-byte hole at 40 is passed over, the 20-byte hole at 60 is next
    assert_eq!(manager.allocate(11, 15), Ok(60));
    assert_eq!(manager.allocate(12, 10), Ok(40));
}

#[test]
fn test_cursor_survives_pool_shrinking() {
    let mut manager = MemoryManager::with_capacity(100).unwrap();
    for pid in 1..=4 {
        manager.allocate(pid, 10).unwrap();
    }
    // Pool: 4 occupied + tail. Freeing everything collapses it to one block.
    for pid in 1..=4 {
        manager.deallocate(pid);
    }
    assert_eq!(manager.blocks().len(), 1);
    assert_eq!(manager.allocate(5, 10), Ok(0));
}

#[test]
fn test_alternative_strategy_plugs_in() {
    let mut manager = MemoryManager::from_blocks(holes(), BestFit::default()).unwrap();

    // Best fit picks the tightest hole, not the first or the next one
    assert_eq!(manager.allocate(10, 10), Ok(40));
    assert_eq!(manager.allocate(11, 15), Ok(60));
    assert_eq!(manager.strategy().scans, 2);

    // Relocation goes through the same strategy
    assert_eq!(
        manager.resize(11, 25),
        Ok(ResizeOutcome::Relocated { from: 60, to: 0 })
    );
    assert_eq!(manager.strategy().scans, 3);
}

#[test]
fn test_boxed_strategy() {
    let strategy: Box<dyn AllocationStrategy> = Box::new(NextFit::new());
    let mut manager = MemoryManager::with_strategy(50, strategy).unwrap();
    assert_eq!(manager.allocate(1, 50), Ok(0));
    assert_eq!(manager.strategy().name(), "next-fit");
}

#[test]
fn test_occupied_index_from_strategy_is_rejected() {
    let exact = vec![Block::occupied(0, 10, 1), Block::free(10, 90)];
    let mut manager = MemoryManager::from_blocks(exact.clone(), AlwaysFirst).unwrap();

    let err = manager.allocate(2, 10).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(manager.blocks(), exact.as_slice());
    assert_eq!(manager.process_memory(2), 0);

    let larger = vec![Block::occupied(0, 50, 1), Block::free(50, 50)];
    let mut manager = MemoryManager::from_blocks(larger.clone(), AlwaysFirst).unwrap();

    assert_eq!(
        manager.allocate(2, 20),
        Err(MemoryError::Invariant(InvariantError::StrategyContract {
            index: 0,
            requested: 20
        }))
    );
    assert_eq!(manager.blocks(), larger.as_slice());
    assert_eq!(manager.process_memory(1), 50);
}

#[test]
fn test_relocation_keeps_block_when_strategy_misbehaves() {
    let pool = vec![
        Block::occupied(0, 10, 1),
        Block::occupied(10, 10, 2),
        Block::free(20, 80),
    ];
    let mut manager = MemoryManager::from_blocks(pool.clone(), AlwaysFirst).unwrap();

    let err = manager.resize(1, 30).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(manager.blocks(), pool.as_slice());
    assert_eq!(manager.process_memory(1), 10);
    assert_eq!(manager.process_memory_details(1).resize_count, 0);
}
