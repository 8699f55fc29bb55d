/*!
 * Event Types
 * Immutable records of things that will happen in simulated time
 */

use crate::core::types::{Pid, SliceId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an event means to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new process arrives in the system
    NewProcess,
    /// The active process's quantum expired
    SwitchProcess,
    /// The active process has no CPU time left
    EndProcess,
    /// The active process needs I/O
    IoRequest,
    /// The process in I/O service is done
    EndIo,
}

impl EventKind {
    /// Whether the CPU emitted this event at a switch-in
    #[inline]
    pub const fn is_cpu_slice(&self) -> bool {
        matches!(
            self,
            Self::SwitchProcess | Self::EndProcess | Self::IoRequest
        )
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewProcess => "new_process",
            Self::SwitchProcess => "switch_process",
            Self::EndProcess => "end_process",
            Self::IoRequest => "io_request",
            Self::EndIo => "end_io",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled simulation event
///
/// Fields are private; an event cannot change after it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    due: Timestamp,
    subject: Option<Pid>,
    slice: Option<SliceId>,
}

impl Event {
    /// Event without a subject process
    #[inline]
    #[must_use]
    pub const fn new(kind: EventKind, due: Timestamp) -> Self {
        Self {
            kind,
            due,
            subject: None,
            slice: None,
        }
    }

    /// Event pertaining to one process
    #[inline]
    #[must_use]
    pub const fn for_process(kind: EventKind, due: Timestamp, pid: Pid) -> Self {
        Self {
            kind,
            due,
            subject: Some(pid),
            slice: None,
        }
    }

    /// Event ending a CPU slice
    #[inline]
    #[must_use]
    pub const fn for_slice(kind: EventKind, due: Timestamp, pid: Pid, slice: SliceId) -> Self {
        Self {
            kind,
            due,
            subject: Some(pid),
            slice: Some(slice),
        }
    }

    #[inline]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Absolute simulation time at which the event fires
    #[inline]
    pub const fn due(&self) -> Timestamp {
        self.due
    }

    #[inline]
    pub const fn subject(&self) -> Option<Pid> {
        self.subject
    }

    #[inline]
    pub const fn slice(&self) -> Option<SliceId> {
        self.slice
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.due)?;
        if let Some(pid) = self.subject {
            write!(f, " pid={}", pid)?;
        }
        if let Some(slice) = self.slice {
            write!(f, " slice={}", slice)?;
        }
        Ok(())
    }
}
