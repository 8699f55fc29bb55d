/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Timestamp};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

/// Process timing errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Clock regression for process {pid}: clock {clock} is earlier than last event at {last_event}")]
    #[diagnostic(
        code(process::clock_regression),
        help("The driver must supply non-decreasing clock values for every process transition.")
    )]
    ClockRegression {
        pid: Pid,
        clock: Timestamp,
        last_event: Timestamp,
    },
}

/// Scheduler errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Process transition rejected: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Device {device} is idle, no process to release at {clock}")]
    #[diagnostic(
        code(scheduler::device_idle),
        help("Completion events must only be scheduled while a process is in service.")
    )]
    DeviceIdle {
        device: Cow<'static, str>,
        clock: Timestamp,
    },
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Check the configuration file and RR_SIM_* environment variables.")
    )]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read configuration from {path}: {reason}")]
    #[diagnostic(code(config::read_failed), help("Make sure the file exists and is readable."))]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(code(config::parse_failed), help("The configuration file must be valid JSON."))]
    ParseFailed(String),
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Report serialization failed: {0}")]
    #[diagnostic(code(sim::report_serialization))]
    Report(#[from] serde_json::Error),
}
