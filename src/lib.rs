/*!
 * Memory Simulator Library
 * Contiguous memory allocation over a single simulated address space
 */

pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::types::{Address, Pid, Size};
pub use memory::{
    AllocationStrategy, Block, BlockDescriptor, BlockStatus, InvariantError, ManagerConfig,
    MemoryError, MemoryInfo, MemoryManager, MemoryPressure, MemoryResult, MemoryStats, NextFit,
    ResizeOutcome, SharedMemoryManager,
};
pub use monitoring::init_tracing;
