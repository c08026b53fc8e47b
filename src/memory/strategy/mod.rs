/*!
 * Allocation Strategies
 * Placement policies plugged into the memory manager
 */

mod next_fit;

pub use super::traits::AllocationStrategy;
pub use next_fit::NextFit;
