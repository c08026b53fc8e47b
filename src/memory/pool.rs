/*!
 * Pool Helpers
 * Placement, lookup and layout checks over the ordered block sequence
 */

use super::block::Block;
use super::ops::split;
use super::types::{InvariantError, MemoryError, MemoryResult};
use crate::core::types::{Address, Pid, Size};

/// Occupy the free block at `index` with a `size` byte allocation for `pid`.
///
/// Exact fits are occupied in place; larger blocks are split and the
/// remainder spliced in right after. Returns the start address.
///
/// `index` comes from a pluggable strategy, so anything other than an
/// in-range free block of at least `size` bytes is rejected before the
/// pool is touched.
pub(crate) fn place(pool: &mut Vec<Block>, index: usize, size: Size, pid: Pid) -> MemoryResult<Address> {
    let block = match pool.get(index) {
        Some(block) if block.is_free() && block.size >= size => *block,
        _ => {
            return Err(InvariantError::StrategyContract {
                index,
                requested: size,
            }
            .into())
        }
    };

    if block.size == size {
        pool[index].occupy(pid);
    } else {
        let (allocated, remainder) = split(&block, size, pid)?;
        pool[index] = allocated;
        pool.insert(index + 1, remainder);
    }
    Ok(block.start)
}

/// Index of the first block owned by `pid`
pub(crate) fn find_owned(pool: &[Block], pid: Pid) -> Option<usize> {
    pool.iter().position(|b| b.is_owned_by(pid))
}

/// (largest free block, total free bytes)
pub(crate) fn free_summary(pool: &[Block]) -> (Size, Size) {
    pool.iter()
        .filter(|b| b.is_free())
        .fold((0, 0), |(largest, total), b| (largest.max(b.size), total + b.size))
}

/// Sum of all block sizes
pub(crate) fn capacity(pool: &[Block]) -> Size {
    pool.iter().map(|b| b.size).sum()
}

pub(crate) fn out_of_memory(pool: &[Block], requested: Size) -> MemoryError {
    let (largest_free, available) = free_summary(pool);
    MemoryError::OutOfMemory {
        requested,
        largest_free,
        available,
        total: capacity(pool),
    }
}

/// Check contiguity, positive sizes and the coalesced normal form
pub fn validate_layout(pool: &[Block]) -> MemoryResult<()> {
    if pool.is_empty() {
        return Err(MemoryError::InvalidLayout("pool has no blocks".into()));
    }

    for (i, block) in pool.iter().enumerate() {
        if block.size == 0 {
            return Err(MemoryError::InvalidLayout(format!(
                "block {} at 0x{:x} has zero size",
                i, block.start
            )));
        }
    }

    for (i, pair) in pool.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        if a.end() != b.start {
            return Err(MemoryError::InvalidLayout(format!(
                "block {} ends at 0x{:x} but block {} starts at 0x{:x}",
                i,
                a.end(),
                i + 1,
                b.start
            )));
        }
        if a.is_free() && b.is_free() {
            return Err(MemoryError::InvalidLayout(format!(
                "blocks {} and {} are both free and not coalesced",
                i,
                i + 1
            )));
        }
    }

    Ok(())
}
