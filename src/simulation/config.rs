/*!
 * Simulation Configuration
 * Defaults, JSON file loading, and RR_SIM_* environment overrides
 */

use crate::core::errors::ConfigError;
use crate::core::types::{Kilobytes, Ticks};
use crate::process::workload::MIN_MEMORY_NEEDED;
use crate::scheduler::TimeQuantum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "RR_SIM_";

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Memory available to user processes (KB)
    pub memory_size: Kilobytes,
    /// Round-robin time slice
    pub quantum: Ticks,
    /// Average length of one I/O operation
    pub avg_io_time: Ticks,
    /// Total simulated time
    pub simulation_length: Ticks,
    /// Average time between process arrivals
    pub avg_arrival_interval: Ticks,
    /// Seed of the workload generator
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            memory_size: 2048,
            quantum: 500,
            avg_io_time: 225,
            simulation_length: 250_000,
            avg_arrival_interval: 5_000,
            seed: 0,
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

impl SimulationConfig {
    /// Defaults, then the optional JSON file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            memory_size = config.memory_size,
            quantum = config.quantum,
            avg_io_time = config.avg_io_time,
            simulation_length = config.simulation_length,
            avg_arrival_interval = config.avg_arrival_interval,
            seed = config.seed,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "Reading configuration file");
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Apply `RR_SIM_*` overrides obtained through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut u64); 6] = [
            ("MEMORY_SIZE", &mut self.memory_size),
            ("QUANTUM", &mut self.quantum),
            ("AVG_IO_TIME", &mut self.avg_io_time),
            ("SIMULATION_LENGTH", &mut self.simulation_length),
            ("AVG_ARRIVAL_INTERVAL", &mut self.avg_arrival_interval),
            ("SEED", &mut self.seed),
        ];

        for (name, slot) in fields {
            let key = format!("{}{}", ENV_PREFIX, name);
            if let Some(raw) = lookup(&key) {
                *slot = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid(&key, format!("'{}' is not a non-negative integer", raw)))?;
            }
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        TimeQuantum::new(self.quantum)?;
        if self.memory_size <= MIN_MEMORY_NEEDED {
            return Err(invalid(
                "memory_size",
                format!("must exceed the minimum process size of {} KB", MIN_MEMORY_NEEDED),
            ));
        }
        if self.simulation_length == 0 {
            return Err(invalid("simulation_length", "must be at least 1 tick"));
        }
        if self.avg_arrival_interval == 0 {
            return Err(invalid("avg_arrival_interval", "must be at least 1 tick"));
        }
        if self.avg_io_time == 0 {
            return Err(invalid("avg_io_time", "must be at least 1 tick"));
        }
        Ok(())
    }

    pub fn time_quantum(&self) -> Result<TimeQuantum, ConfigError> {
        TimeQuantum::new(self.quantum)
    }
}
