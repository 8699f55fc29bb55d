/*!
 * CPU Statistics
 * Busy/idle time and ready-queue length bookkeeping
 */

use super::Cpu;
use crate::core::types::Ticks;
use crate::stats::{QueueKind, Statistics};

impl Cpu {
    /// Account `elapsed` ticks of simulated time since the previous call
    ///
    /// Per-process time is settled by the process transitions; this only
    /// covers what belongs to the CPU itself.
    pub fn time_passed(&self, elapsed: Ticks, stats: &mut Statistics) {
        if self.active.is_some() {
            stats.busy_cpu_time += elapsed;
        } else {
            stats.idle_cpu_time += elapsed;
        }
        stats.queue_time_passed(QueueKind::Ready, self.ready_queue.len(), elapsed);
    }
}
