/*!
 * Process Memory Operations
 * Process-specific memory queries and statistics
 */

use super::super::block::Block;
use super::super::pool::free_summary;
use super::super::strategy::AllocationStrategy;
use super::super::types::{MemoryStats, ProcessMemoryStats};
use super::MemoryManager;
use crate::core::types::{Pid, Size};

impl<S: AllocationStrategy> MemoryManager<S> {
    /// Bytes currently held by a process
    pub fn process_memory(&self, pid: Pid) -> Size {
        self.pool
            .iter()
            .filter(|b| b.is_owned_by(pid))
            .map(|b| b.size)
            .sum()
    }

    /// Get detailed process memory stats including peak and allocation count
    pub fn process_memory_details(&self, pid: Pid) -> ProcessMemoryStats {
        match self.process_tracking.get(&pid) {
            Some(track) => ProcessMemoryStats {
                pid,
                allocated_bytes: track.current_bytes,
                peak_bytes: track.peak_bytes,
                allocation_count: track.allocation_count,
                resize_count: track.resize_count,
                relocation_count: track.relocation_count,
            },
            None => ProcessMemoryStats {
                pid,
                allocated_bytes: 0,
                peak_bytes: 0,
                allocation_count: 0,
                resize_count: 0,
                relocation_count: 0,
            },
        }
    }

    /// Get all memory blocks allocated to a process
    pub fn process_allocations(&self, pid: Pid) -> Vec<Block> {
        self.pool
            .iter()
            .filter(|b| b.is_owned_by(pid))
            .copied()
            .collect()
    }

    /// Get overall memory info: (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        let (_, available) = free_summary(&self.pool);
        let total = self.config.capacity;
        (total, total - available, available)
    }

    /// Get detailed memory statistics
    pub fn stats(&self) -> MemoryStats {
        let (largest_free, available) = free_summary(&self.pool);
        let total = self.config.capacity;
        let used = total - available;

        let free_blocks = self.pool.iter().filter(|b| b.is_free()).count();
        let fragmentation = if available == 0 {
            0.0
        } else {
            1.0 - largest_free as f64 / available as f64
        };

        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: available,
            usage_percentage: (used as f64 / total as f64) * 100.0,
            allocated_blocks: self.pool.len() - free_blocks,
            free_blocks,
            largest_free_block: largest_free,
            fragmentation,
        }
    }
}
