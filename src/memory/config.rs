/*!
 * Memory Manager Configuration
 *
 * Pool capacity and pressure thresholds
 */

use super::types::{MemoryError, MemoryResult};
use crate::core::limits::{DEFAULT_MEMORY_POOL, POOL_SIZE_ENV, PRESSURE_CRITICAL, PRESSURE_HIGH};
use crate::core::types::Size;

/// Memory manager configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    /// Total pool size in bytes
    pub capacity: Size,
    /// Usage ratio at which allocations log a pressure warning
    pub warning_threshold: f64,
    /// Usage ratio reported as critical
    pub critical_threshold: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_POOL)
    }
}

impl ManagerConfig {
    pub const fn with_capacity(capacity: Size) -> Self {
        Self {
            capacity,
            warning_threshold: PRESSURE_HIGH,
            critical_threshold: PRESSURE_CRITICAL,
        }
    }

    /// Read the capacity from `MEMSIM_POOL_SIZE`, falling back to `default_capacity`
    pub fn from_env(default_capacity: Size) -> MemoryResult<Self> {
        let capacity = match std::env::var(POOL_SIZE_ENV) {
            Ok(raw) => raw.trim().parse::<Size>().map_err(|e| {
                MemoryError::InvalidConfig(format!("{}={:?}: {}", POOL_SIZE_ENV, raw, e))
            })?,
            Err(_) => default_capacity,
        };

        let config = Self::with_capacity(capacity);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MemoryResult<()> {
        if self.capacity == 0 {
            return Err(MemoryError::InvalidConfig(
                "pool capacity must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.warning_threshold)
            || !(0.0..=1.0).contains(&self.critical_threshold)
            || self.warning_threshold > self.critical_threshold
        {
            return Err(MemoryError::InvalidConfig(format!(
                "pressure thresholds out of order: warning {} / critical {}",
                self.warning_threshold, self.critical_threshold
            )));
        }
        Ok(())
    }
}
