/*!
 * Event Queue
 * Pending events ordered by due time with deterministic tie-breaking
 */

use super::types::Event;
use crate::core::types::Timestamp;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Interface the simulator consumes to schedule future events
pub trait EventQueue {
    /// Schedule an event
    fn insert(&mut self, event: Event);

    /// Remove and return the event with the smallest due time
    ///
    /// Events with equal due time come out in insertion order.
    fn pop_earliest(&mut self) -> Option<Event>;

    /// Due time of the next event without removing it
    fn peek_due(&self) -> Option<Timestamp>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap entry keyed on (due, insertion sequence)
#[derive(Debug, Clone)]
struct Scheduled {
    due: Timestamp,
    seq: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so invert to pop the earliest first
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary-heap event queue - O(log n) insert and pop
#[derive(Debug, Default)]
pub struct Timeline {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventQueue for Timeline {
    fn insert(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            due: event.due(),
            seq,
            event,
        });
    }

    fn pop_earliest(&mut self) -> Option<Event> {
        self.heap.pop().map(|s| s.event)
    }

    fn peek_due(&self) -> Option<Timestamp> {
        self.heap.peek().map(|s| s.due)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
