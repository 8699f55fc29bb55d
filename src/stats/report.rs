/*!
 * Statistics Report
 * Derived figures for presenting a finished run
 */

use super::Statistics;
use crate::core::types::Ticks;
use serde::Serialize;
use std::fmt;

/// Summary of a finished simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub simulation_length: Ticks,
    pub created_processes: u64,
    pub completed_processes: u64,
    pub forced_switches: u64,
    pub processed_io_operations: u64,
    /// Completed processes per 1000 ticks
    pub average_throughput: f64,
    pub busy_cpu_time: Ticks,
    pub idle_cpu_time: Ticks,
    /// Fraction of the run the CPU was busy, in [0, 1]
    pub cpu_utilization: f64,
    pub largest_memory_queue: u64,
    pub average_memory_queue: f64,
    pub largest_ready_queue: u64,
    pub average_ready_queue: f64,
    pub largest_io_queue: u64,
    pub average_io_queue: f64,
    pub average_times_in_ready_queue: f64,
    pub average_times_in_io_queue: f64,
    pub average_time_in_system: f64,
    pub average_time_waiting_for_memory: f64,
    pub average_time_in_ready_queue: f64,
    pub average_time_in_cpu: f64,
    pub average_time_waiting_for_io: f64,
    pub average_time_in_io: f64,
}

#[inline]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl StatisticsReport {
    pub fn from_statistics(stats: &Statistics, simulation_length: Ticks) -> Self {
        let completed = stats.completed_processes;
        let time_in_system = stats.time_waiting_for_memory
            + stats.time_in_ready_queue
            + stats.time_in_cpu
            + stats.time_waiting_for_io
            + stats.time_in_io;

        Self {
            simulation_length,
            created_processes: stats.created_processes,
            completed_processes: completed,
            forced_switches: stats.forced_switches,
            processed_io_operations: stats.processed_io_operations,
            average_throughput: ratio(completed * 1000, simulation_length),
            busy_cpu_time: stats.busy_cpu_time,
            idle_cpu_time: stats.idle_cpu_time,
            cpu_utilization: ratio(
                stats.busy_cpu_time,
                stats.busy_cpu_time + stats.idle_cpu_time,
            ),
            largest_memory_queue: stats.memory_queue.largest_length,
            average_memory_queue: ratio(stats.memory_queue.length_time, simulation_length),
            largest_ready_queue: stats.ready_queue.largest_length,
            average_ready_queue: ratio(stats.ready_queue.length_time, simulation_length),
            largest_io_queue: stats.io_queue.largest_length,
            average_io_queue: ratio(stats.io_queue.length_time, simulation_length),
            average_times_in_ready_queue: ratio(stats.times_in_ready_queue, completed),
            average_times_in_io_queue: ratio(stats.times_in_io_queue, completed),
            average_time_in_system: ratio(time_in_system, completed),
            average_time_waiting_for_memory: ratio(stats.time_waiting_for_memory, completed),
            average_time_in_ready_queue: ratio(stats.time_in_ready_queue, completed),
            average_time_in_cpu: ratio(stats.time_in_cpu, completed),
            average_time_waiting_for_io: ratio(stats.time_waiting_for_io, completed),
            average_time_in_io: ratio(stats.time_in_io, completed),
        }
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation statistics ({} ticks)", self.simulation_length)?;
        writeln!(f, "================================================")?;
        writeln!(f, "Processes created:                  {}", self.created_processes)?;
        writeln!(f, "Processes completed:                {}", self.completed_processes)?;
        writeln!(f, "Forced process switches:            {}", self.forced_switches)?;
        writeln!(f, "Processed I/O operations:           {}", self.processed_io_operations)?;
        writeln!(f, "Average throughput (per 1000):      {:.3}", self.average_throughput)?;
        writeln!(f)?;
        writeln!(f, "CPU busy time:                      {}", self.busy_cpu_time)?;
        writeln!(f, "CPU idle time:                      {}", self.idle_cpu_time)?;
        writeln!(f, "CPU utilization:                    {:.1}%", self.cpu_utilization * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Largest memory queue:               {}", self.largest_memory_queue)?;
        writeln!(f, "Average memory queue length:        {:.3}", self.average_memory_queue)?;
        writeln!(f, "Largest ready queue:                {}", self.largest_ready_queue)?;
        writeln!(f, "Average ready queue length:         {:.3}", self.average_ready_queue)?;
        writeln!(f, "Largest I/O queue:                  {}", self.largest_io_queue)?;
        writeln!(f, "Average I/O queue length:           {:.3}", self.average_io_queue)?;
        writeln!(f)?;
        writeln!(f, "Per completed process:")?;
        writeln!(f, "  times in ready queue:             {:.3}", self.average_times_in_ready_queue)?;
        writeln!(f, "  times in I/O queue:               {:.3}", self.average_times_in_io_queue)?;
        writeln!(f, "  time in system:                   {:.1}", self.average_time_in_system)?;
        writeln!(f, "  time waiting for memory:          {:.1}", self.average_time_waiting_for_memory)?;
        writeln!(f, "  time in ready queue:              {:.1}", self.average_time_in_ready_queue)?;
        writeln!(f, "  time in CPU:                      {:.1}", self.average_time_in_cpu)?;
        writeln!(f, "  time waiting for I/O:             {:.1}", self.average_time_waiting_for_io)?;
        write!(f, "  time in I/O:                      {:.1}", self.average_time_in_io)
    }
}
