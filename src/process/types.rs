/*!
 * Process Types
 * Static resource demand and per-state time accounting
 */

use crate::core::types::{Kilobytes, Ticks};
use serde::{Deserialize, Serialize};

/// Resource demand fixed when a process is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    pub memory_needed: Kilobytes,
    /// Total CPU time needed to complete
    pub cpu_time_needed: Ticks,
    /// Average CPU time between two I/O requests
    pub avg_io_interval: Ticks,
}

impl Demand {
    #[inline]
    #[must_use]
    pub const fn new(memory_needed: Kilobytes, cpu_time_needed: Ticks, avg_io_interval: Ticks) -> Self {
        Self {
            memory_needed,
            cpu_time_needed,
            avg_io_interval,
        }
    }
}

/// Time a process spent in each state, plus queue entry counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAccounting {
    pub waiting_for_memory: Ticks,
    pub in_ready_queue: Ticks,
    pub in_cpu: Ticks,
    pub waiting_for_io: Ticks,
    pub in_io: Ticks,
    pub times_in_ready_queue: u64,
    pub times_in_io_queue: u64,
}

impl TimeAccounting {
    /// Sum of all time accumulators
    #[inline]
    pub const fn total(&self) -> Ticks {
        self.waiting_for_memory + self.in_ready_queue + self.in_cpu + self.waiting_for_io + self.in_io
    }
}
