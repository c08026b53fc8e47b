/*!
 * Memory Management
 *
 * Contiguous memory manager over a single simulated address space.
 *
 * ## Pool
 *
 * The pool is one ordered `Vec<Block>` covering the whole capacity with no
 * gaps. After every public operation:
 * - each block ends where the next one starts
 * - block sizes sum to the capacity fixed at construction
 * - no two neighbouring blocks are both free
 * - every block has a positive size
 *
 * ## Operations
 *
 * - **allocate**: the strategy picks a free block, which is occupied in place
 *   on an exact fit or split otherwise
 * - **deallocate**: releases every block a process owns, then coalesces
 * - **resize**: shrink, extend right, extend left or relocate, then coalesces
 * - **snapshot**: read-only descriptors for display
 *
 * The manager is single-threaded (`&mut self`). Use [`SharedMemoryManager`]
 * when several callers need the same pool.
 */

mod allocator;
mod process_ops;
mod shared;
mod tracking;

pub use shared::SharedMemoryManager;

use super::block::Block;
use super::coalesce::coalesce;
use super::config::ManagerConfig;
use super::pool::{capacity, validate_layout};
use super::strategy::{AllocationStrategy, NextFit};
use super::traits::MemoryInfo;
use super::types::{BlockDescriptor, MemoryResult, MemoryStats};
use crate::core::types::{Pid, Size};
use ahash::RandomState;
use log::info;
use std::collections::HashMap;
use tracking::ProcessMemoryTracking;

/// Memory manager
pub struct MemoryManager<S: AllocationStrategy = NextFit> {
    pool: Vec<Block>,
    strategy: S,
    config: ManagerConfig,
    // Per-process memory tracking (for peak_bytes and allocation_count)
    process_tracking: HashMap<Pid, ProcessMemoryTracking, RandomState>,
}

impl MemoryManager<NextFit> {
    pub fn new() -> Self {
        Self::seeded(ManagerConfig::default(), NextFit::new())
    }

    /// Create a next-fit manager with custom capacity (useful for testing)
    pub fn with_capacity(total: Size) -> MemoryResult<Self> {
        Self::with_config(ManagerConfig::with_capacity(total), NextFit::new())
    }
}

impl<S: AllocationStrategy> MemoryManager<S> {
    /// Create a manager seeded with one free block spanning `config.capacity`
    pub fn with_config(config: ManagerConfig, strategy: S) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::seeded(config, strategy))
    }

    pub fn with_strategy(total: Size, strategy: S) -> MemoryResult<Self> {
        Self::with_config(ManagerConfig::with_capacity(total), strategy)
    }

    /// Create a manager over an explicit, already ordered block list.
    ///
    /// The list must be contiguous, hold no empty blocks and be coalesced.
    /// Capacity becomes the sum of the block sizes.
    pub fn from_blocks(blocks: Vec<Block>, strategy: S) -> MemoryResult<Self> {
        validate_layout(&blocks)?;

        let config = ManagerConfig::with_capacity(capacity(&blocks));
        let mut process_tracking = HashMap::with_hasher(RandomState::new());
        for block in &blocks {
            if let Some(pid) = block.occupant {
                process_tracking
                    .entry(pid)
                    .or_insert_with(ProcessMemoryTracking::new)
                    .record_allocation(block.size);
            }
        }

        info!(
            "Memory manager initialized from {} blocks ({} bytes) with {} strategy",
            blocks.len(),
            config.capacity,
            strategy.name()
        );
        Ok(Self {
            pool: blocks,
            strategy,
            config,
            process_tracking,
        })
    }

    fn seeded(config: ManagerConfig, strategy: S) -> Self {
        info!(
            "Memory manager initialized with {} bytes and {} strategy",
            config.capacity,
            strategy.name()
        );
        Self {
            pool: vec![Block::free(0, config.capacity)],
            strategy,
            config,
            process_tracking: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Total pool size, fixed at construction
    pub fn capacity(&self) -> Size {
        self.config.capacity
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Current pool, ordered by start address
    pub fn blocks(&self) -> &[Block] {
        &self.pool
    }

    /// Merge adjacent free blocks. Returns the number of merges.
    pub fn coalesce(&mut self) -> usize {
        coalesce(&mut self.pool)
    }

    /// Descriptors for every block, ordered by start address
    pub fn snapshot(&self) -> Vec<BlockDescriptor> {
        self.pool.iter().map(Block::descriptor).collect()
    }

    /// One printable line per block
    pub fn memory_map(&self) -> Vec<String> {
        self.pool.iter().map(|b| b.descriptor().to_string()).collect()
    }

    fn debug_check_layout(&self) {
        debug_assert!(
            validate_layout(&self.pool).is_ok(),
            "pool layout broken: {:?}",
            validate_layout(&self.pool)
        );
        debug_assert_eq!(capacity(&self.pool), self.config.capacity);
    }
}

impl<S: AllocationStrategy> MemoryInfo for MemoryManager<S> {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }

    fn process_memory(&self, pid: Pid) -> Size {
        MemoryManager::process_memory(self, pid)
    }
}

impl Default for MemoryManager<NextFit> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AllocationStrategy> std::fmt::Debug for MemoryManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("capacity", &self.config.capacity)
            .field("strategy", &self.strategy)
            .field("blocks", &self.pool.len())
            .finish()
    }
}
