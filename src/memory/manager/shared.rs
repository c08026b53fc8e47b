/*!
 * Shared Memory Manager
 *
 * Cloneable handle serialising every operation behind one lock
 */

use super::super::strategy::{AllocationStrategy, NextFit};
use super::super::traits::MemoryInfo;
use super::super::types::{BlockDescriptor, MemoryResult, MemoryStats, ResizeOutcome};
use super::MemoryManager;
use crate::core::types::{Address, Pid, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe memory manager handle
///
/// The pool and the strategy (including the next-fit cursor) live behind
/// the same mutex, so a scan can never observe a pool another caller is
/// halfway through editing.
pub struct SharedMemoryManager<S: AllocationStrategy = NextFit> {
    inner: Arc<Mutex<MemoryManager<S>>>,
}

impl<S: AllocationStrategy> SharedMemoryManager<S> {
    pub fn new(manager: MemoryManager<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn allocate(&self, pid: Pid, size: Size) -> MemoryResult<Address> {
        self.inner.lock().allocate(pid, size)
    }

    pub fn deallocate(&self, pid: Pid) -> Size {
        self.inner.lock().deallocate(pid)
    }

    pub fn resize(&self, pid: Pid, new_size: Size) -> MemoryResult<ResizeOutcome> {
        self.inner.lock().resize(pid, new_size)
    }

    pub fn snapshot(&self) -> Vec<BlockDescriptor> {
        self.inner.lock().snapshot()
    }

    /// Run several operations as one transaction
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut MemoryManager<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<S: AllocationStrategy> MemoryInfo for SharedMemoryManager<S> {
    fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    fn info(&self) -> (Size, Size, Size) {
        self.inner.lock().info()
    }

    fn process_memory(&self, pid: Pid) -> Size {
        self.inner.lock().process_memory(pid)
    }
}

impl<S: AllocationStrategy> Clone for SharedMemoryManager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: AllocationStrategy> From<MemoryManager<S>> for SharedMemoryManager<S> {
    fn from(manager: MemoryManager<S>) -> Self {
        Self::new(manager)
    }
}
