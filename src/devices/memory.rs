/*!
 * Memory Queue
 * FIFO admission of new processes into a fixed-size memory
 */

use crate::core::types::{Kilobytes, Ticks, Timestamp};
use crate::process::{Process, ProcessResult};
use crate::stats::{QueueKind, Statistics};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Processes waiting for memory and the memory they are waiting for
///
/// Admission is strictly FIFO: a large process at the head blocks smaller
/// ones behind it.
#[derive(Debug)]
pub struct MemoryQueue {
    capacity: Kilobytes,
    free: Kilobytes,
    queue: VecDeque<Process>,
}

impl MemoryQueue {
    pub fn new(capacity: Kilobytes) -> Self {
        Self {
            capacity,
            free: capacity,
            queue: VecDeque::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> Kilobytes {
        self.capacity
    }

    #[inline]
    pub fn free(&self) -> Kilobytes {
        self.free
    }

    /// Processes waiting for memory, head first
    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.queue.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue a newly created process
    pub fn insert_process(&mut self, process: Process, stats: &mut Statistics) {
        if process.memory_needed() > self.capacity {
            warn!(
                pid = %process.pid(),
                needed = process.memory_needed(),
                capacity = self.capacity,
                "process can never be admitted"
            );
        }
        self.queue.push_back(process);
        stats.record_insertion(QueueKind::Memory, self.queue.len());
    }

    /// Admit the head of the queue if its memory need fits
    ///
    /// Call repeatedly until it returns `None` to drain everything that fits.
    pub fn admit_next(&mut self, clock: Timestamp) -> ProcessResult<Option<Process>> {
        let fits = self
            .queue
            .front()
            .is_some_and(|p| p.memory_needed() <= self.free);
        if !fits {
            return Ok(None);
        }

        let Some(mut process) = self.queue.pop_front() else {
            return Ok(None);
        };
        if let Err(err) = process.left_memory_queue(clock) {
            self.queue.push_front(process);
            return Err(err);
        }

        self.free -= process.memory_needed();
        debug!(pid = %process.pid(), clock, free = self.free, "admitted to memory");
        Ok(Some(process))
    }

    /// Return the memory of a completed process
    pub fn release(&mut self, amount: Kilobytes) {
        self.free = (self.free + amount).min(self.capacity);
    }

    pub fn time_passed(&self, elapsed: Ticks, stats: &mut Statistics) {
        stats.queue_time_passed(QueueKind::Memory, self.queue.len(), elapsed);
    }
}
