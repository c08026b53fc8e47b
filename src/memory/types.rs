/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::types::{Address, Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Programmer contract violations
///
/// These never come from pool state alone: they mean a caller asked for
/// something the engine forbids outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("requested size must be strictly positive")]
    ZeroSize,

    #[error("cannot split a {block_size} byte block for a {requested} byte request: block must be strictly larger")]
    SplitTooSmall { block_size: Size, requested: Size },

    #[error("strategy chose index {index} for a {requested} byte request, which is not a free block large enough")]
    StrategyContract { index: usize, requested: Size },
}

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum MemoryError {
    #[error("Out of memory: requested {requested} bytes, largest free block {largest_free} bytes ({available} free / {total} total)")]
    #[diagnostic(
        code(memory::out_of_memory),
        help("Free space may be fragmented. Deallocate neighbouring blocks or request less.")
    )]
    OutOfMemory {
        requested: Size,
        largest_free: Size,
        available: Size,
        total: Size,
    },

    #[error("Process {0} owns no memory")]
    #[diagnostic(code(memory::not_found))]
    NotFound(Pid),

    #[error("Contract violation: {0}")]
    #[diagnostic(
        code(memory::contract_violation),
        help("This is a caller bug, not a runtime condition.")
    )]
    Invariant(#[from] InvariantError),

    #[error("Invalid block layout: {0}")]
    #[diagnostic(code(memory::invalid_layout))]
    InvalidLayout(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(memory::invalid_config))]
    InvalidConfig(String),
}

impl MemoryError {
    /// True for programmer errors, false for expected operational failures
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, MemoryError::Invariant(_))
    }
}

/// Allocation status of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Occupied,
    Free,
}

/// Read-only view of one block, as exposed by `snapshot()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub start: Address,
    /// Last address covered by the block (inclusive)
    pub end: Address,
    pub size: Size,
    pub status: BlockStatus,
    pub occupant: Option<Pid>,
}

impl BlockDescriptor {
    pub fn is_occupied(&self) -> bool {
        self.status == BlockStatus::Occupied
    }
}

impl fmt::Display for BlockDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}:{}] Size: {}, Status: ", self.start, self.end, self.size)?;
        match (self.status, self.occupant) {
            (BlockStatus::Occupied, Some(pid)) => write!(f, "Allocated, Process ID: {}", pid),
            (BlockStatus::Occupied, None) => write!(f, "Allocated"),
            (BlockStatus::Free, _) => write!(f, "Free"),
        }
    }
}

/// Which path a successful resize took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Requested size equals the current size
    Unchanged,
    /// Block truncated, tail returned to the pool
    Shrunk,
    /// Grown into the following free block
    ExtendedRight,
    /// Grown into the preceding free block (start moved down)
    ExtendedLeft,
    /// Moved to another free block, old block released
    Relocated { from: Address, to: Address },
}

impl ResizeOutcome {
    /// Start address of the block after the resize, if it moved
    pub fn new_address(&self) -> Option<Address> {
        match self {
            ResizeOutcome::Relocated { to, .. } => Some(*to),
            _ => None,
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: usize,
    pub used_memory: usize,
    pub available_memory: usize,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: usize,
    /// 0.0 when all free space is one block, approaching 1.0 as it scatters
    pub fragmentation: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        use crate::core::limits::{PRESSURE_CRITICAL, PRESSURE_HIGH, PRESSURE_MEDIUM};

        if ratio >= PRESSURE_CRITICAL {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Process memory statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMemoryStats {
    pub pid: Pid,
    pub allocated_bytes: Size,
    pub peak_bytes: Size,
    pub allocation_count: usize,
    pub resize_count: usize,
    pub relocation_count: usize,
}
