/*!
 * Memory Block
 * One contiguous extent of the pool
 */

use super::types::{BlockDescriptor, BlockStatus};
use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};

/// A contiguous extent of memory, free or owned by a process.
///
/// Blocks are plain values: the pool addresses them by position and a
/// block never outlives the split or merge that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start: Address,
    pub size: Size,
    pub occupant: Option<Pid>,
}

impl Block {
    pub fn free(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            occupant: None,
        }
    }

    pub fn occupied(start: Address, size: Size, pid: Pid) -> Self {
        Self {
            start,
            size,
            occupant: Some(pid),
        }
    }

    /// Exclusive end address
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn is_owned_by(&self, pid: Pid) -> bool {
        self.occupant == Some(pid)
    }

    /// Hand the block to `pid`. Returns false if it was already occupied.
    pub fn occupy(&mut self, pid: Pid) -> bool {
        if self.is_free() {
            self.occupant = Some(pid);
            true
        } else {
            false
        }
    }

    /// Return the block to the pool. Returns false if it was already free.
    pub fn release(&mut self) -> bool {
        self.occupant.take().is_some()
    }

    pub fn descriptor(&self) -> BlockDescriptor {
        BlockDescriptor {
            start: self.start,
            end: self.end() - 1,
            size: self.size,
            status: if self.is_free() {
                BlockStatus::Free
            } else {
                BlockStatus::Occupied
            },
            occupant: self.occupant,
        }
    }
}
