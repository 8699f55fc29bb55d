/*!
 * Scheduler Types
 * Domain types for the round-robin CPU
 */

use crate::core::errors::ConfigError;
use crate::core::types::Ticks;
use crate::events::Event;
use crate::process::Process;
use serde::{Deserialize, Deserializer, Serialize};

/// Round-robin time slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(Ticks);

impl TimeQuantum {
    /// Create new time quantum; zero-length slices are rejected
    pub fn new(ticks: Ticks) -> Result<Self, ConfigError> {
        if ticks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "quantum".to_string(),
                reason: "quantum must be at least 1 tick".to_string(),
            });
        }
        Ok(Self(ticks))
    }

    /// Hot path - called on every switch-in
    #[inline(always)]
    pub const fn as_ticks(&self) -> Ticks {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = Ticks::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// CPU state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuState {
    Idle,
    Busy,
}

/// Outcome of the active process leaving the CPU voluntarily
///
/// The departing process is handed back to the caller, who routes it to
/// the I/O queue or out of the system.
#[derive(Debug, Default)]
#[must_use]
pub struct Handoff {
    pub departed: Option<Process>,
    /// Slice event of the process switched in, if any
    pub next: Option<Event>,
}
