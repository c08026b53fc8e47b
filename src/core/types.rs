/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (the occupant of an allocated block)
pub type Pid = u32;

/// Address type for memory operations (offset into the pool)
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;
