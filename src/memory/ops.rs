/*!
 * Block Operations
 * Stateless split and merge primitives
 */

use super::block::Block;
use super::types::InvariantError;
use crate::core::types::{Pid, Size};

/// Carve an occupied prefix of `size` bytes out of `block`.
///
/// The block must be strictly larger than `size`: an exact fit is the
/// caller's job (occupy in place), otherwise the remainder would be empty.
pub fn split(block: &Block, size: Size, pid: Pid) -> Result<(Block, Block), InvariantError> {
    if size == 0 {
        return Err(InvariantError::ZeroSize);
    }
    if block.size <= size {
        return Err(InvariantError::SplitTooSmall {
            block_size: block.size,
            requested: size,
        });
    }

    let allocated = Block::occupied(block.start, size, pid);
    let remainder = Block::free(block.start + size, block.size - size);
    Ok((allocated, remainder))
}

/// Combine two contiguous free blocks. `None` if either is occupied or
/// they do not touch.
pub fn merge(a: &Block, b: &Block) -> Option<Block> {
    if a.is_free() && b.is_free() && a.end() == b.start {
        Some(Block::free(a.start, a.size + b.size))
    } else {
        None
    }
}
