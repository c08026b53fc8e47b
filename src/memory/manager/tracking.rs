/*!
 * Process Memory Tracking
 * Per-process usage history kept alongside the pool
 */

use super::super::types::ResizeOutcome;
use crate::core::types::Size;

/// Per-process counters. Current bytes mirror what the pool says the
/// process owns; the rest is history the pool cannot reconstruct.
#[derive(Debug, Clone, Default)]
pub(super) struct ProcessMemoryTracking {
    pub current_bytes: Size,
    pub peak_bytes: Size,
    pub allocation_count: usize,
    pub resize_count: usize,
    pub relocation_count: usize,
}

impl ProcessMemoryTracking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_allocation(&mut self, size: Size) {
        self.allocation_count += 1;
        self.set_current(self.current_bytes + size);
    }

    pub fn record_resize(&mut self, old_size: Size, new_size: Size, outcome: ResizeOutcome) {
        if outcome == ResizeOutcome::Unchanged {
            return;
        }
        self.resize_count += 1;
        if matches!(outcome, ResizeOutcome::Relocated { .. }) {
            self.relocation_count += 1;
        }
        self.set_current((self.current_bytes + new_size).saturating_sub(old_size));
    }

    fn set_current(&mut self, bytes: Size) {
        self.current_bytes = bytes;
        self.peak_bytes = self.peak_bytes.max(bytes);
    }
}
