/*!
 * Memory Module
 * Contiguous block allocation, coalescing and resizing
 */

pub mod block;
pub mod coalesce;
pub mod config;
pub mod manager;
pub mod ops;
pub mod pool;
pub mod resize;
pub mod strategy;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block::Block;
pub use coalesce::coalesce;
pub use config::ManagerConfig;
pub use manager::{MemoryManager, SharedMemoryManager};
pub use pool::validate_layout;
pub use strategy::NextFit;
pub use traits::*;
pub use types::*;
