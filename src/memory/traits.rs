/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::block::Block;
use super::types::*;
use crate::core::types::{Pid, Size};
use std::fmt::Debug;

/// Placement policy over the ordered pool
///
/// Implementations see the pool read-only and may keep their own state
/// (a scan cursor, statistics) between calls. The manager owns exactly one
/// strategy and never inspects it beyond this interface.
pub trait AllocationStrategy: Debug + Send {
    /// Index of a free block with `size >= size`, or `None`
    fn find(&mut self, pool: &[Block], size: Size) -> Option<usize>;

    /// Short policy name for logs
    fn name(&self) -> &'static str;
}

impl<S: AllocationStrategy + ?Sized> AllocationStrategy for Box<S> {
    fn find(&mut self, pool: &[Block], size: Size) -> Option<usize> {
        (**self).find(pool, size)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get memory usage for a specific process
    fn process_memory(&self, pid: Pid) -> Size;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
