/*!
 * Simulation Statistics
 * Counters and time sums collected while the simulation runs
 */

mod report;

pub use report::StatisticsReport;

use crate::core::types::Ticks;
use serde::{Deserialize, Serialize};

/// Queues whose lengths are tracked over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    Memory,
    Ready,
    Io,
}

/// Length-over-time bookkeeping for one queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Integral of queue length over simulated time
    pub length_time: u64,
    pub largest_length: u64,
    /// Number of times a process was appended
    pub insertions: u64,
}

/// Aggregate statistics for one simulation run
///
/// Every field only ever grows. Process accumulators are added when a
/// process completes, queue and CPU figures as time passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub created_processes: u64,
    pub completed_processes: u64,
    /// Quantum expiries that handed the CPU to another process
    pub forced_switches: u64,
    pub processed_io_operations: u64,

    // Flushed from completed processes
    pub time_waiting_for_memory: Ticks,
    pub time_in_ready_queue: Ticks,
    pub time_in_cpu: Ticks,
    pub time_waiting_for_io: Ticks,
    pub time_in_io: Ticks,
    pub times_in_ready_queue: u64,
    pub times_in_io_queue: u64,

    pub busy_cpu_time: Ticks,
    pub idle_cpu_time: Ticks,

    pub memory_queue: QueueStats,
    pub ready_queue: QueueStats,
    pub io_queue: QueueStats,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn queue(&self, kind: QueueKind) -> &QueueStats {
        match kind {
            QueueKind::Memory => &self.memory_queue,
            QueueKind::Ready => &self.ready_queue,
            QueueKind::Io => &self.io_queue,
        }
    }

    #[inline]
    fn queue_mut(&mut self, kind: QueueKind) -> &mut QueueStats {
        match kind {
            QueueKind::Memory => &mut self.memory_queue,
            QueueKind::Ready => &mut self.ready_queue,
            QueueKind::Io => &mut self.io_queue,
        }
    }

    /// Count an append to a queue whose length is now `length`
    #[inline]
    pub fn record_insertion(&mut self, kind: QueueKind, length: usize) {
        let queue = self.queue_mut(kind);
        queue.insertions += 1;
        queue.largest_length = queue.largest_length.max(length as u64);
    }

    /// Integrate a queue that held `length` processes for `elapsed` ticks
    #[inline]
    pub fn queue_time_passed(&mut self, kind: QueueKind, length: usize, elapsed: Ticks) {
        let queue = self.queue_mut(kind);
        queue.length_time += length as u64 * elapsed;
        queue.largest_length = queue.largest_length.max(length as u64);
    }

    /// Build the derived report for a run of `simulation_length` ticks
    pub fn report(&self, simulation_length: Ticks) -> StatisticsReport {
        StatisticsReport::from_statistics(self, simulation_length)
    }
}
