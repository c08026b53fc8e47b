/*!
 * Next-Fit Strategy
 * Circular scan resuming after the last successful placement
 */

use super::super::block::Block;
use super::super::traits::AllocationStrategy;
use crate::core::types::Size;
use log::debug;

/// Next-fit placement
///
/// The cursor is a plain index into a pool whose length changes under it,
/// so it is reduced modulo the current length before every scan. A cursor
/// left past the end after merges therefore wraps instead of indexing out
/// of bounds, at the price of not pointing at the same block it did before.
#[derive(Debug, Clone, Default)]
pub struct NextFit {
    cursor: usize,
}

impl NextFit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the first scan at `cursor` instead of 0
    pub fn with_cursor(cursor: usize) -> Self {
        Self { cursor }
    }

    /// Raw cursor as left by the last successful scan
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl AllocationStrategy for NextFit {
    fn find(&mut self, pool: &[Block], size: Size) -> Option<usize> {
        let len = pool.len();
        if len == 0 {
            return None;
        }

        let start = self.cursor % len;
        for offset in 0..len {
            let index = (start + offset) % len;
            let block = &pool[index];
            if block.is_free() && block.size >= size {
                self.cursor = (index + 1) % len;
                debug!(
                    "next-fit: {} bytes fit block {} at 0x{:x} ({} bytes), cursor -> {}",
                    size, index, block.start, block.size, self.cursor
                );
                return Some(index);
            }
        }

        debug!(
            "next-fit: no block for {} bytes after full scan from {}",
            size, start
        );
        None
    }

    fn name(&self) -> &'static str {
        "next-fit"
    }
}
