/*!
 * Round-Robin CPU
 * Single-CPU scheduler with a FIFO ready queue and fixed time quantum
 */

use crate::core::id::SliceGenerator;
use crate::core::types::{SliceId, Timestamp};
use crate::process::Process;
use std::collections::VecDeque;
use tracing::info;

mod operations;
mod stats;
pub mod types;

pub use types::{CpuState, Handoff, TimeQuantum};

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, crate::core::errors::SchedulerError>;

/// Process currently holding the CPU
#[derive(Debug)]
struct Active {
    process: Process,
    slice: SliceId,
    since: Timestamp,
}

/// Round-robin CPU
///
/// The CPU owns every process it holds, either in the ready queue or in the
/// active slot, so a process can never be queued and running at once.
///
/// Each switch-in returns one event ending the slice at
/// `min(quantum, remaining CPU time, time to next I/O)` after the switch-in.
/// The event kind tells the driver which bound was hit:
/// [`EventKind::EndProcess`](crate::events::EventKind::EndProcess) wins ties,
/// then [`EventKind::IoRequest`](crate::events::EventKind::IoRequest), then
/// [`EventKind::SwitchProcess`](crate::events::EventKind::SwitchProcess).
#[derive(Debug)]
pub struct Cpu {
    quantum: TimeQuantum,
    ready_queue: VecDeque<Process>,
    active: Option<Active>,
    slices: SliceGenerator,
}

impl Cpu {
    /// Create an idle CPU with the given round-robin quantum
    pub fn new(quantum: TimeQuantum) -> Self {
        info!(quantum = quantum.as_ticks(), "CPU initialized");

        Self {
            quantum,
            ready_queue: VecDeque::new(),
            active: None,
            slices: SliceGenerator::default_start(),
        }
    }

    #[inline]
    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }

    /// Process currently using the CPU
    #[inline]
    pub fn active_process(&self) -> Option<&Process> {
        self.active.as_ref().map(|a| &a.process)
    }

    /// Slice id of the current switch-in
    #[inline]
    pub fn current_slice(&self) -> Option<SliceId> {
        self.active.as_ref().map(|a| a.slice)
    }

    /// Clock at which the active process was switched in
    #[inline]
    pub fn active_since(&self) -> Option<Timestamp> {
        self.active.as_ref().map(|a| a.since)
    }

    #[inline]
    pub fn state(&self) -> CpuState {
        if self.active.is_some() {
            CpuState::Busy
        } else {
            CpuState::Idle
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Processes waiting for the CPU, head first
    pub fn ready_queue(&self) -> impl Iterator<Item = &Process> {
        self.ready_queue.iter()
    }

    #[inline]
    pub fn ready_len(&self) -> usize {
        self.ready_queue.len()
    }
}
