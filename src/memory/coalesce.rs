/*!
 * Coalescing Pass
 * Merge runs of adjacent free blocks into one
 */

use super::block::Block;
use super::ops::merge;
use log::info;

/// Normalize `pool` so no two neighbours are both free.
///
/// A successful merge keeps the cursor in place so chains of three or more
/// free blocks collapse in a single pass. Returns the number of merges.
pub fn coalesce(pool: &mut Vec<Block>) -> usize {
    let initial = pool.len();
    let mut merges = 0;
    let mut i = 0;

    while i + 1 < pool.len() {
        match merge(&pool[i], &pool[i + 1]) {
            Some(merged) => {
                pool[i] = merged;
                pool.remove(i + 1);
                merges += 1;
            }
            None => i += 1,
        }
    }

    if merges > 0 {
        info!(
            "Coalesced {} pairs of adjacent free blocks, reduced from {} to {} blocks",
            merges,
            initial,
            pool.len()
        );
    }

    merges
}
