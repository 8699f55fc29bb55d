/*!
 * Workload Generation
 * Injectable source of randomized process demands and service times
 */

use super::types::Demand;
use crate::core::types::{Kilobytes, Ticks};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Smallest memory demand and CPU demand of a generated process
pub const MIN_MEMORY_NEEDED: Kilobytes = 100;
pub const MIN_CPU_TIME_NEEDED: Ticks = 100;
/// Exclusive upper bound of the CPU demand
pub const MAX_CPU_TIME_NEEDED: Ticks = 10_000;
/// I/O interval bounds as a percentage of CPU demand
pub const MIN_IO_INTERVAL_PERCENT: u64 = 1;
pub const MAX_IO_INTERVAL_PERCENT: u64 = 25;

/// Source of every random quantity in a run
///
/// Implementations decide the distribution; the simulator only asks for
/// values. Tests inject fixed sequences through [`ScriptedWorkload`].
pub trait Workload {
    /// Resource demand of a new process on a machine with `memory_size` KB
    fn demand(&mut self, memory_size: Kilobytes) -> Demand;

    /// CPU time until the next I/O request, around `average`
    fn io_interval(&mut self, average: Ticks) -> Ticks;

    /// Length of one I/O operation, around `average`
    fn io_duration(&mut self, average: Ticks) -> Ticks;

    /// Time until the next process arrives, around `average`
    fn arrival_interval(&mut self, average: Ticks) -> Ticks;
}

/// Uniform value in [0.8 * average, 1.2 * average], never below 1
///
/// Approximates exponentially distributed inter-arrival times while keeping
/// the spread bounded.
#[inline]
pub fn jitter<R: Rng>(rng: &mut R, average: Ticks) -> Ticks {
    let spread = average / 5;
    let low = average - spread;
    let high = average.saturating_add(spread);
    rng.gen_range(low..=high).max(1)
}

/// Pseudo-random workload backed by a seedable generator
#[derive(Debug, Clone)]
pub struct RandomWorkload<R = StdRng> {
    rng: R,
}

impl RandomWorkload<StdRng> {
    /// Reproducible workload for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomWorkload<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Workload for RandomWorkload<R> {
    fn demand(&mut self, memory_size: Kilobytes) -> Demand {
        // Memory need varies from 100 KB to 25% of memory size
        let memory_ceiling = memory_size / 4;
        let memory_needed = if memory_ceiling > MIN_MEMORY_NEEDED {
            self.rng.gen_range(MIN_MEMORY_NEEDED..memory_ceiling)
        } else {
            MIN_MEMORY_NEEDED
        };

        let cpu_time_needed = self
            .rng
            .gen_range(MIN_CPU_TIME_NEEDED..MAX_CPU_TIME_NEEDED);

        let percent = self
            .rng
            .gen_range(MIN_IO_INTERVAL_PERCENT..=MAX_IO_INTERVAL_PERCENT);
        let avg_io_interval = percent * cpu_time_needed / 100;

        Demand::new(memory_needed, cpu_time_needed, avg_io_interval)
    }

    fn io_interval(&mut self, average: Ticks) -> Ticks {
        jitter(&mut self.rng, average)
    }

    fn io_duration(&mut self, average: Ticks) -> Ticks {
        jitter(&mut self.rng, average)
    }

    fn arrival_interval(&mut self, average: Ticks) -> Ticks {
        // Exponential inter-arrival time: -avg * ln(U), U in (0, 1]
        let u: f64 = 1.0 - self.rng.gen::<f64>();
        let interval = -(average as f64) * u.ln();
        (interval.round() as Ticks).max(1)
    }
}

/// Deterministic workload replaying fixed values
///
/// Demands are handed out in order; once exhausted the last one repeats.
/// Interval and duration methods return their `average` unchanged unless a
/// fixed value was configured.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWorkload {
    demands: VecDeque<Demand>,
    last_demand: Option<Demand>,
    io_interval: Option<Ticks>,
    io_duration: Option<Ticks>,
    arrivals: VecDeque<Ticks>,
}

impl ScriptedWorkload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demands(mut self, demands: impl IntoIterator<Item = Demand>) -> Self {
        self.demands.extend(demands);
        self
    }

    pub fn with_io_interval(mut self, interval: Ticks) -> Self {
        self.io_interval = Some(interval);
        self
    }

    pub fn with_io_duration(mut self, duration: Ticks) -> Self {
        self.io_duration = Some(duration);
        self
    }

    /// Arrival gaps, consumed in order; afterwards `average` is used
    pub fn with_arrivals(mut self, gaps: impl IntoIterator<Item = Ticks>) -> Self {
        self.arrivals.extend(gaps);
        self
    }
}

impl Workload for ScriptedWorkload {
    fn demand(&mut self, memory_size: Kilobytes) -> Demand {
        if let Some(demand) = self.demands.pop_front() {
            self.last_demand = Some(demand);
            return demand;
        }
        self.last_demand.unwrap_or_else(|| {
            Demand::new(
                MIN_MEMORY_NEEDED.min(memory_size),
                MIN_CPU_TIME_NEEDED,
                MIN_CPU_TIME_NEEDED,
            )
        })
    }

    fn io_interval(&mut self, average: Ticks) -> Ticks {
        self.io_interval.unwrap_or(average).max(1)
    }

    fn io_duration(&mut self, average: Ticks) -> Ticks {
        self.io_duration.unwrap_or(average)
    }

    fn arrival_interval(&mut self, average: Ticks) -> Ticks {
        self.arrivals.pop_front().unwrap_or(average)
    }
}
