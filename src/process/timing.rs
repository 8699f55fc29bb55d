/*!
 * Process Timing
 * Per-process state transitions and time accounting
 */

use super::types::{Demand, TimeAccounting};
use super::workload::Workload;
use crate::core::errors::ProcessError;
use crate::core::types::{Kilobytes, Pid, Ticks, Timestamp};
use crate::stats::Statistics;
use serde::Serialize;
use tracing::trace;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// A simulated process and its timing state
///
/// Every transition method closes out the time spent since the previous
/// transition into exactly one accumulator and moves `time_of_last_event`
/// forward.
/// Hence at any clock `c`:
/// `c - created_at == times.total() + (c - time_of_last_event)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pid: Pid,
    demand: Demand,
    created_at: Timestamp,
    cpu_time_remaining: Ticks,
    time_to_next_io: Ticks,
    time_of_last_event: Timestamp,
    times: TimeAccounting,
}

impl Process {
    /// Create a process at `created_at` that will request I/O after
    /// `first_io_interval` ticks of CPU time
    #[must_use]
    pub fn new(pid: Pid, demand: Demand, created_at: Timestamp, first_io_interval: Ticks) -> Self {
        Self {
            pid,
            demand,
            created_at,
            cpu_time_remaining: demand.cpu_time_needed,
            time_to_next_io: first_io_interval,
            time_of_last_event: created_at,
            times: TimeAccounting::default(),
        }
    }

    #[inline]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub const fn demand(&self) -> &Demand {
        &self.demand
    }

    #[inline]
    pub const fn memory_needed(&self) -> Kilobytes {
        self.demand.memory_needed
    }

    #[inline]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    #[inline]
    pub const fn cpu_time_remaining(&self) -> Ticks {
        self.cpu_time_remaining
    }

    #[inline]
    pub const fn time_to_next_io(&self) -> Ticks {
        self.time_to_next_io
    }

    #[inline]
    pub const fn time_of_last_event(&self) -> Timestamp {
        self.time_of_last_event
    }

    #[inline]
    pub const fn times(&self) -> &TimeAccounting {
        &self.times
    }

    /// All CPU demand has been served
    #[inline]
    pub const fn is_finished(&self) -> bool {
        self.cpu_time_remaining == 0
    }

    /// Reject a transition at `clock` if it predates the last event
    #[inline]
    pub fn check_clock(&self, clock: Timestamp) -> ProcessResult<()> {
        if clock < self.time_of_last_event {
            return Err(ProcessError::ClockRegression {
                pid: self.pid,
                clock,
                last_event: self.time_of_last_event,
            });
        }
        Ok(())
    }

    /// Close the interval since the last event; rejects clock regression
    fn advance(&mut self, clock: Timestamp) -> ProcessResult<Ticks> {
        self.check_clock(clock)?;
        let elapsed = clock - self.time_of_last_event;
        self.time_of_last_event = clock;
        Ok(elapsed)
    }

    /// Process was admitted to memory and leaves the memory queue
    pub fn left_memory_queue(&mut self, clock: Timestamp) -> ProcessResult<()> {
        self.times.waiting_for_memory += self.advance(clock)?;
        Ok(())
    }

    /// Process joins the ready queue
    ///
    /// Waiting time is settled by [`Process::entered_cpu`]. The driver calls
    /// this at the clock of the preceding transition; any gap since then is
    /// charged to the ready queue rather than dropped.
    pub fn enter_cpu_queue(&mut self, clock: Timestamp) -> ProcessResult<()> {
        self.times.in_ready_queue += self.advance(clock)?;
        self.times.times_in_ready_queue += 1;
        Ok(())
    }

    /// Process was switched in
    pub fn entered_cpu(&mut self, clock: Timestamp) -> ProcessResult<()> {
        self.times.in_ready_queue += self.advance(clock)?;
        trace!(pid = %self.pid, clock, remaining = self.cpu_time_remaining, "entered cpu");
        Ok(())
    }

    /// Process was switched out, for whatever reason
    ///
    /// Remaining CPU time and time to next I/O shrink by the elapsed time but
    /// never below zero.
    pub fn left_cpu(&mut self, clock: Timestamp) -> ProcessResult<()> {
        let elapsed = self.advance(clock)?;
        self.times.in_cpu += elapsed;
        self.cpu_time_remaining = self.cpu_time_remaining.saturating_sub(elapsed);
        self.time_to_next_io = self.time_to_next_io.saturating_sub(elapsed);
        trace!(
            pid = %self.pid,
            clock,
            ran = elapsed,
            remaining = self.cpu_time_remaining,
            next_io = self.time_to_next_io,
            "left cpu"
        );
        Ok(())
    }

    /// Process joins the I/O queue
    pub fn enter_io_queue(&mut self, clock: Timestamp) -> ProcessResult<()> {
        self.times.waiting_for_io += self.advance(clock)?;
        self.times.times_in_io_queue += 1;
        Ok(())
    }

    /// Process starts its I/O operation
    pub fn entered_io(&mut self, clock: Timestamp) -> ProcessResult<()> {
        self.times.waiting_for_io += self.advance(clock)?;
        Ok(())
    }

    /// Process finished its I/O operation; draws the next I/O interval
    pub fn left_io<W: Workload + ?Sized>(
        &mut self,
        clock: Timestamp,
        workload: &mut W,
    ) -> ProcessResult<()> {
        self.times.in_io += self.advance(clock)?;
        self.time_to_next_io = workload.io_interval(self.demand.avg_io_interval);
        Ok(())
    }

    /// Flush this process's accounting into the run statistics
    ///
    /// Consumes the process: a process is counted exactly once, when it
    /// leaves the system.
    pub fn update_statistics(self, stats: &mut Statistics) {
        let times = self.times;
        stats.time_waiting_for_memory += times.waiting_for_memory;
        stats.time_in_ready_queue += times.in_ready_queue;
        stats.time_in_cpu += times.in_cpu;
        stats.time_waiting_for_io += times.waiting_for_io;
        stats.time_in_io += times.in_io;

        stats.times_in_ready_queue += times.times_in_ready_queue;
        stats.times_in_io_queue += times.times_in_io_queue;

        stats.completed_processes += 1;
    }
}
