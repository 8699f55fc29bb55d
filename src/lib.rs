/*!
 * Round-Robin CPU Simulator
 * Discrete-event simulation of a single round-robin CPU with memory
 * admission and I/O
 */

pub mod core;
pub mod devices;
pub mod events;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod stats;

// Re-exports
pub use crate::core::errors::{ConfigError, ProcessError, SchedulerError, SimError};
pub use crate::core::types::{Kilobytes, Pid, SimResult, SliceId, Ticks, Timestamp};
pub use devices::{IoDevice, MemoryQueue};
pub use events::{Event, EventKind, EventQueue, Timeline};
pub use monitoring::init_tracing;
pub use process::{
    Demand, Process, ProcessFactory, RandomWorkload, ScriptedWorkload, TimeAccounting, Workload,
};
pub use scheduler::{Cpu, CpuState, Handoff, SchedulerResult, TimeQuantum};
pub use simulation::{SimulationConfig, Simulator};
pub use stats::{QueueKind, Statistics, StatisticsReport};
