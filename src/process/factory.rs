/*!
 * Process Factory
 * Creates processes with run-scoped ids and workload-drawn demands
 */

use super::timing::Process;
use super::workload::Workload;
use crate::core::id::{IdGenerator, PidGenerator};
use crate::core::types::{Kilobytes, Timestamp};
use tracing::debug;

/// Builds processes for one simulation run
#[derive(Debug, Clone)]
pub struct ProcessFactory {
    ids: PidGenerator,
    memory_size: Kilobytes,
}

impl ProcessFactory {
    pub fn new(memory_size: Kilobytes) -> Self {
        Self::with_ids(memory_size, PidGenerator::default_start())
    }

    pub fn with_ids(memory_size: Kilobytes, ids: PidGenerator) -> Self {
        Self { ids, memory_size }
    }

    /// Create a process arriving at `clock`
    pub fn spawn<W: Workload + ?Sized>(&mut self, clock: Timestamp, workload: &mut W) -> Process {
        let demand = workload.demand(self.memory_size);
        let first_io = workload.io_interval(demand.avg_io_interval);
        let process = Process::new(self.ids.next_id(), demand, clock, first_io);

        debug!(
            pid = %process.pid(),
            clock,
            memory = demand.memory_needed,
            cpu = demand.cpu_time_needed,
            avg_io = demand.avg_io_interval,
            "process created"
        );
        process
    }
}
