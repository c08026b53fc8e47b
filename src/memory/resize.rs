/*!
 * Resize Engine
 *
 * Grows or shrinks the allocation owned by a process.
 *
 * ## Paths
 *
 * - **Shrink**: truncate in place and hand the tail back as a free block
 * - **Extend right**: absorb space from a free successor
 * - **Extend left**: absorb space from a free predecessor, moving the start down
 * - **Relocate**: ask the strategy for any fitting free block, move there and
 *   release the old block
 *
 * Growth paths are tried in that order and the first that fits wins. Nothing
 * is written to the pool until a path is known to succeed. The caller is
 * expected to run the coalescing pass afterwards: shrink and relocate can
 * leave free blocks next to free blocks.
 */

use super::block::Block;
use super::pool::{find_owned, out_of_memory, place};
use super::traits::AllocationStrategy;
use super::types::{InvariantError, MemoryError, MemoryResult, ResizeOutcome};
use crate::core::types::{Pid, Size};
use log::{info, warn};

/// Resize the first block owned by `pid` to `new_size` bytes
pub fn resize<S>(
    pool: &mut Vec<Block>,
    strategy: &mut S,
    pid: Pid,
    new_size: Size,
) -> MemoryResult<ResizeOutcome>
where
    S: AllocationStrategy + ?Sized,
{
    if new_size == 0 {
        return Err(InvariantError::ZeroSize.into());
    }

    let index = match find_owned(pool, pid) {
        Some(index) => index,
        None => {
            warn!("Resize to {} bytes requested for PID {} which owns no block", new_size, pid);
            return Err(MemoryError::NotFound(pid));
        }
    };

    let current = pool[index];
    if new_size <= current.size {
        return Ok(shrink(pool, index, new_size));
    }

    if let Some(outcome) = extend_right(pool, index, new_size) {
        return Ok(outcome);
    }
    if let Some(outcome) = extend_left(pool, index, new_size) {
        return Ok(outcome);
    }
    relocate(pool, strategy, pid, index, new_size)
}

fn shrink(pool: &mut Vec<Block>, index: usize, new_size: Size) -> ResizeOutcome {
    let current = pool[index];
    if new_size == current.size {
        return ResizeOutcome::Unchanged;
    }

    pool[index].size = new_size;
    pool.insert(index + 1, Block::free(current.start + new_size, current.size - new_size));

    info!(
        "Shrunk block at 0x{:x} from {} to {} bytes, released {} bytes",
        current.start,
        current.size,
        new_size,
        current.size - new_size
    );
    ResizeOutcome::Shrunk
}

fn extend_right(pool: &mut Vec<Block>, index: usize, new_size: Size) -> Option<ResizeOutcome> {
    let current = pool[index];
    let next = *pool.get(index + 1)?;
    if !next.is_free() || current.size + next.size < new_size {
        return None;
    }

    let consumed = new_size - current.size;
    if consumed == next.size {
        pool.remove(index + 1);
    } else {
        pool[index + 1].start += consumed;
        pool[index + 1].size -= consumed;
    }
    pool[index].size = new_size;

    info!(
        "Extended block at 0x{:x} right by {} bytes to {} bytes",
        current.start, consumed, new_size
    );
    Some(ResizeOutcome::ExtendedRight)
}

fn extend_left(pool: &mut Vec<Block>, index: usize, new_size: Size) -> Option<ResizeOutcome> {
    let prev_index = index.checked_sub(1)?;
    let prev = pool[prev_index];
    let current = pool[index];
    if !prev.is_free() || prev.size + current.size < new_size {
        return None;
    }

    let remaining = prev.size + current.size - new_size;
    if remaining == 0 {
        pool[index].start = prev.start;
        pool[index].size = new_size;
        pool.remove(prev_index);
    } else {
        pool[prev_index].size = remaining;
        pool[index].start = prev.start + remaining;
        pool[index].size = new_size;
    }

    info!(
        "Extended block at 0x{:x} left to 0x{:x}, now {} bytes",
        current.start,
        prev.start + remaining,
        new_size
    );
    Some(ResizeOutcome::ExtendedLeft)
}

fn relocate<S>(
    pool: &mut Vec<Block>,
    strategy: &mut S,
    pid: Pid,
    index: usize,
    new_size: Size,
) -> MemoryResult<ResizeOutcome>
where
    S: AllocationStrategy + ?Sized,
{
    let current = pool[index];

    let target = match strategy.find(pool, new_size) {
        Some(target) => target,
        None => {
            let err = out_of_memory(pool, new_size);
            warn!(
                "Resize of PID {} block at 0x{:x} to {} bytes failed: {}",
                pid, current.start, new_size, err
            );
            return Err(err);
        }
    };

    let len_before = pool.len();
    let to = place(pool, target, new_size, pid)?;

    // A split before the old block shifts it one slot right
    let old_index = if target < index && pool.len() > len_before {
        index + 1
    } else {
        index
    };
    pool[old_index].release();

    info!(
        "Relocated PID {} from 0x{:x} ({} bytes) to 0x{:x} ({} bytes) via {}",
        pid,
        current.start,
        current.size,
        to,
        new_size,
        strategy.name()
    );
    Ok(ResizeOutcome::Relocated {
        from: current.start,
        to,
    })
}
