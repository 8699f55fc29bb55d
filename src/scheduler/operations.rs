/*!
 * CPU Core Operations
 * Insert, switch, and voluntary-departure operations
 */

use super::{Active, Cpu, Handoff, SchedulerResult};
use crate::core::id::IdGenerator;
use crate::core::types::{SliceId, Timestamp};
use crate::events::{Event, EventKind};
use crate::process::Process;
use crate::stats::{QueueKind, Statistics};
use tracing::{debug, trace};

impl Cpu {
    /// Add a process to the tail of the ready queue, switching it in if the
    /// CPU is idle
    ///
    /// Returns the slice event of the process switched in, or `None` when the
    /// CPU was already busy.
    pub fn insert_process(
        &mut self,
        process: Process,
        clock: Timestamp,
        stats: &mut Statistics,
    ) -> SchedulerResult<Option<Event>> {
        process.check_clock(clock)?;
        if self.active.is_none() {
            self.check_head(clock)?;
        }

        self.enqueue(process, clock, stats)?;
        if self.active.is_none() {
            self.promote(clock)
        } else {
            Ok(None)
        }
    }

    /// Round-robin preemption: the active process, if any, goes to the back
    /// of the ready queue and the head of the queue is switched in
    pub fn switch_process(
        &mut self,
        clock: Timestamp,
        stats: &mut Statistics,
    ) -> SchedulerResult<Option<Event>> {
        self.check_active(clock)?;
        self.check_head(clock)?;

        if let Some(active) = self.active.as_mut() {
            active.process.left_cpu(clock)?;
        }

        if let Some(active) = self.active.take() {
            if !self.ready_queue.is_empty() {
                stats.forced_switches += 1;
            }
            debug!(pid = %active.process.pid(), clock, "quantum expired");
            self.enqueue(active.process, clock, stats)?;
        }

        self.promote(clock)
    }

    /// The active process leaves the CPU on its own (I/O or completion)
    ///
    /// Its CPU time is settled and it is handed back without being requeued.
    /// The head of the ready queue, if any, is switched in.
    pub fn active_process_left(&mut self, clock: Timestamp) -> SchedulerResult<Handoff> {
        self.check_active(clock)?;
        self.check_head(clock)?;

        if let Some(active) = self.active.as_mut() {
            active.process.left_cpu(clock)?;
        }

        let departed = self.active.take().map(|active| active.process);
        if let Some(process) = departed.as_ref() {
            debug!(pid = %process.pid(), clock, remaining = process.cpu_time_remaining(), "process left cpu");
        }

        let next = self.promote(clock)?;
        Ok(Handoff { departed, next })
    }

    /// Whether `event` ends the slice currently running
    ///
    /// Slice events outlive a voluntary departure; the driver drops those
    /// that no longer match.
    pub fn is_current_slice(&self, event: &Event) -> bool {
        match (self.active.as_ref(), event.slice()) {
            (Some(active), Some(slice)) => active.slice == slice,
            _ => false,
        }
    }

    /// Reject `clock` if it predates the active process's last event
    fn check_active(&self, clock: Timestamp) -> SchedulerResult<()> {
        if let Some(active) = self.active.as_ref() {
            active.process.check_clock(clock)?;
        }
        Ok(())
    }

    /// Reject `clock` if the head of the ready queue could not be switched in
    ///
    /// Checked up front so that a rejected call leaves the CPU unchanged.
    fn check_head(&self, clock: Timestamp) -> SchedulerResult<()> {
        if let Some(head) = self.ready_queue.front() {
            head.check_clock(clock)?;
        }
        Ok(())
    }

    /// Append to the ready queue without the idle check
    fn enqueue(
        &mut self,
        mut process: Process,
        clock: Timestamp,
        stats: &mut Statistics,
    ) -> SchedulerResult<()> {
        process.enter_cpu_queue(clock)?;
        trace!(pid = %process.pid(), clock, queue_len = self.ready_queue.len() + 1, "enqueued");

        self.ready_queue.push_back(process);
        stats.record_insertion(QueueKind::Ready, self.ready_queue.len());
        Ok(())
    }

    /// Switch in the head of the ready queue; the CPU must be idle
    fn promote(&mut self, clock: Timestamp) -> SchedulerResult<Option<Event>> {
        debug_assert!(self.active.is_none(), "promote called on a busy CPU");

        let Some(mut process) = self.ready_queue.pop_front() else {
            debug!(clock, "ready queue empty, cpu idle");
            return Ok(None);
        };

        if let Err(err) = process.entered_cpu(clock) {
            self.ready_queue.push_front(process);
            return Err(err.into());
        }

        let slice = self.slices.next_id();
        let event = self.slice_event(&process, clock, slice);
        debug!(
            pid = %process.pid(),
            clock,
            slice = %slice,
            ends = %event.kind(),
            due = event.due(),
            "switched in"
        );

        self.active = Some(Active {
            process,
            slice,
            since: clock,
        });
        Ok(Some(event))
    }

    /// Event ending the slice that starts at `clock`
    fn slice_event(&self, process: &Process, clock: Timestamp, slice: SliceId) -> Event {
        let remaining = process.cpu_time_remaining();
        let next_io = process.time_to_next_io();
        let quantum = self.quantum.as_ticks();

        let (kind, length) = if remaining <= next_io && remaining <= quantum {
            (EventKind::EndProcess, remaining)
        } else if next_io <= quantum {
            (EventKind::IoRequest, next_io)
        } else {
            (EventKind::SwitchProcess, quantum)
        };

        Event::for_slice(kind, clock.saturating_add(length), process.pid(), slice)
    }
}
