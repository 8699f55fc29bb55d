/*!
 * I/O Device
 * Single-server I/O queue
 */

use crate::core::errors::SchedulerError;
use crate::core::types::{Pid, Ticks, Timestamp};
use crate::events::{Event, EventKind};
use crate::process::{Process, Workload};
use crate::scheduler::SchedulerResult;
use crate::stats::{QueueKind, Statistics};
use std::borrow::Cow;
use std::collections::VecDeque;
use tracing::debug;

/// One I/O device serving requests in FIFO order
#[derive(Debug)]
pub struct IoDevice {
    avg_io_time: Ticks,
    queue: VecDeque<Process>,
    active: Option<Process>,
}

impl IoDevice {
    /// Device name carried by errors
    pub const NAME: &'static str = "io";

    pub fn new(avg_io_time: Ticks) -> Self {
        Self {
            avg_io_time,
            queue: VecDeque::new(),
            active: None,
        }
    }

    /// Process currently performing I/O
    #[inline]
    pub fn active_process(&self) -> Option<&Process> {
        self.active.as_ref()
    }

    /// Processes waiting for the device, head first
    pub fn queue(&self) -> impl Iterator<Item = &Process> {
        self.queue.iter()
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queue an I/O request, starting it right away if the device is idle
    ///
    /// Returns the completion event of the operation started, if any.
    pub fn add_io_request<W: Workload + ?Sized>(
        &mut self,
        mut process: Process,
        clock: Timestamp,
        workload: &mut W,
        stats: &mut Statistics,
    ) -> SchedulerResult<Option<Event>> {
        process.enter_io_queue(clock)?;
        self.queue.push_back(process);
        stats.record_insertion(QueueKind::Io, self.queue.len());

        if self.active.is_none() {
            self.start_next(clock, workload)
        } else {
            Ok(None)
        }
    }

    /// Finish the operation in service and start the next one
    ///
    /// Returns the finished process and the completion event of the next
    /// operation, if any.
    pub fn remove_active<W: Workload + ?Sized>(
        &mut self,
        clock: Timestamp,
        workload: &mut W,
        stats: &mut Statistics,
    ) -> SchedulerResult<(Process, Option<Event>)> {
        let Some(mut finished) = self.active.take() else {
            return Err(SchedulerError::DeviceIdle {
                device: Cow::Borrowed(Self::NAME),
                clock,
            });
        };
        if let Err(err) = finished.left_io(clock, workload) {
            self.active = Some(finished);
            return Err(err.into());
        }
        stats.processed_io_operations += 1;
        debug!(pid = %finished.pid(), clock, next_io = finished.time_to_next_io(), "io finished");

        let next = self.start_next(clock, workload)?;
        Ok((finished, next))
    }

    /// Pid of the process in service
    #[inline]
    pub fn active_pid(&self) -> Option<Pid> {
        self.active.as_ref().map(Process::pid)
    }

    fn start_next<W: Workload + ?Sized>(
        &mut self,
        clock: Timestamp,
        workload: &mut W,
    ) -> SchedulerResult<Option<Event>> {
        let Some(mut process) = self.queue.pop_front() else {
            return Ok(None);
        };
        if let Err(err) = process.entered_io(clock) {
            self.queue.push_front(process);
            return Err(err.into());
        }

        let duration = workload.io_duration(self.avg_io_time);
        let due = clock.saturating_add(duration);
        let event = Event::for_process(EventKind::EndIo, due, process.pid());
        debug!(pid = %process.pid(), clock, duration, "io started");

        self.active = Some(process);
        Ok(Some(event))
    }

    pub fn time_passed(&self, elapsed: Ticks, stats: &mut Statistics) {
        stats.queue_time_passed(QueueKind::Io, self.queue.len(), elapsed);
    }
}
