/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation clock value (abstract time units, milliseconds by convention)
pub type Timestamp = u64;

/// Length of a span of simulated time
pub type Ticks = u64;

/// Memory amount in kilobytes
pub type Kilobytes = u64;

/// Process identifier, unique within one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(pub u64);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one switch-in of a process on the CPU
///
/// Every promotion to the active slot gets a fresh id, so an event produced
/// by an earlier slice can be recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceId(pub u64);

impl fmt::Display for SliceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;
