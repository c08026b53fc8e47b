/*!
 * Memory Allocator Implementation
 * Allocation, deallocation and resize orchestration
 */

use super::super::pool::{find_owned, out_of_memory, place};
use super::super::resize;
use super::super::strategy::AllocationStrategy;
use super::super::types::{InvariantError, MemoryPressure, MemoryResult, ResizeOutcome};
use super::tracking::ProcessMemoryTracking;
use super::MemoryManager;
use crate::core::types::{Address, Pid, Size};
use log::{debug, error, info, warn};

impl<S: AllocationStrategy> MemoryManager<S> {
    /// Allocate `size` bytes for `pid` at the block chosen by the strategy.
    ///
    /// Fails with `OutOfMemory` without touching the pool when no free block
    /// is large enough. A zero size is a contract violation.
    pub fn allocate(&mut self, pid: Pid, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            error!("Contract violation: PID {} requested a zero byte allocation", pid);
            return Err(InvariantError::ZeroSize.into());
        }

        let index = match self.strategy.find(&self.pool, size) {
            Some(index) => index,
            None => {
                let err = out_of_memory(&self.pool, size);
                warn!("OOM: PID {} requested {} bytes: {}", pid, size, err);
                return Err(err);
            }
        };

        let block_size = self.pool.get(index).map_or(0, |b| b.size);
        let address = match place(&mut self.pool, index, size, pid) {
            Ok(address) => address,
            Err(err) => {
                error!(
                    "Contract violation allocating {} bytes for PID {} via {}: {}",
                    size,
                    pid,
                    self.strategy.name(),
                    err
                );
                return Err(err);
            }
        };
        if block_size > size {
            info!(
                "Split block at 0x{:x}: keeping {} bytes, {} bytes remain free",
                address,
                size,
                block_size - size
            );
        }

        self.process_tracking
            .entry(pid)
            .or_insert_with(ProcessMemoryTracking::new)
            .record_allocation(size);

        self.log_with_pressure(&format!(
            "Allocated {} bytes at 0x{:x} for PID {}",
            size, address, pid
        ));
        self.debug_check_layout();
        Ok(address)
    }

    /// Release every block owned by `pid` and coalesce.
    ///
    /// Returns the number of bytes freed; 0 if the process owned nothing.
    pub fn deallocate(&mut self, pid: Pid) -> Size {
        let mut freed_bytes = 0;
        let mut freed_count = 0;

        for block in self.pool.iter_mut().filter(|b| b.is_owned_by(pid)) {
            let size = block.size;
            if block.release() {
                freed_bytes += size;
                freed_count += 1;
            }
        }

        if freed_count == 0 {
            debug!("Deallocate for PID {} ignored: no blocks owned", pid);
            return 0;
        }

        self.process_tracking.remove(&pid);
        self.coalesce();

        let (_, used, available) = self.info();
        info!(
            "Deallocated {} bytes ({} blocks) from PID {} ({} bytes used, {} bytes now available)",
            freed_bytes, freed_count, pid, used, available
        );
        self.debug_check_layout();
        freed_bytes
    }

    /// Resize the allocation owned by `pid` and coalesce on success.
    ///
    /// On failure the pool is left exactly as it was.
    pub fn resize(&mut self, pid: Pid, new_size: Size) -> MemoryResult<ResizeOutcome> {
        let old_size = find_owned(&self.pool, pid).map(|i| self.pool[i].size);

        let outcome = match resize::resize(&mut self.pool, &mut self.strategy, pid, new_size) {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.is_contract_violation() {
                    error!("Contract violation resizing PID {}: {}", pid, err);
                }
                return Err(err);
            }
        };
        self.coalesce();

        if let (Some(old_size), Some(track)) = (old_size, self.process_tracking.get_mut(&pid)) {
            track.record_resize(old_size, new_size, outcome);
        }

        if outcome != ResizeOutcome::Unchanged {
            self.log_with_pressure(&format!(
                "Resized PID {} to {} bytes ({:?})",
                pid, new_size, outcome
            ));
        }
        self.debug_check_layout();
        Ok(outcome)
    }

    /// Check memory pressure level
    pub(super) fn check_memory_pressure(&self, used: Size) -> Option<MemoryPressure> {
        let usage_ratio = used as f64 / self.config.capacity as f64;

        if usage_ratio >= self.config.critical_threshold {
            Some(MemoryPressure::Critical)
        } else if usage_ratio >= self.config.warning_threshold {
            Some(MemoryPressure::High)
        } else {
            None
        }
    }

    fn log_with_pressure(&self, message: &str) {
        let (total, used, _) = self.info();
        match self.check_memory_pressure(used) {
            Some(level) => warn!(
                "Memory pressure {}: {} ({:.1}% used: {} / {})",
                level,
                message,
                (used as f64 / total as f64) * 100.0,
                used,
                total
            ),
            None => info!("{}", message),
        }
    }
}
