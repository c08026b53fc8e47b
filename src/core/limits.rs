/*!
 * System Limits and Constants
 *
 * Centralized location for pool sizes and pressure thresholds.
 */

// =============================================================================
// MEMORY POOL
// =============================================================================

/// Default simulated memory pool (1MB)
/// Used when no capacity is configured
pub const DEFAULT_MEMORY_POOL: usize = 1024 * 1024;

/// Pool size used by the demonstration driver
pub const DEMO_MEMORY_POOL: usize = 100;

/// Environment variable overriding the pool capacity
pub const POOL_SIZE_ENV: &str = "MEMSIM_POOL_SIZE";

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const PRESSURE_MEDIUM: f64 = 0.60;

/// Usage ratio at which allocations start warning (80%)
pub const PRESSURE_HIGH: f64 = 0.80;

/// Usage ratio considered critical (95%)
pub const PRESSURE_CRITICAL: f64 = 0.95;
