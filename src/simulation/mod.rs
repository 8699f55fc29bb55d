/*!
 * Simulation Driver
 * Pops events in time order and routes processes between CPU, memory and I/O
 */

pub mod config;

pub use config::SimulationConfig;

use crate::core::errors::ConfigError;
use crate::core::types::{SimResult, Timestamp};
use crate::devices::{IoDevice, MemoryQueue};
use crate::events::{Event, EventKind, EventQueue, Timeline};
use crate::process::{Process, ProcessFactory, RandomWorkload, Workload};
use crate::scheduler::Cpu;
use crate::stats::{Statistics, StatisticsReport};
use tracing::{debug, info, info_span, trace, warn};

/// Discrete-event simulator for one run
///
/// Owns every component and the clock. Nothing is shared, so a run is fully
/// determined by its configuration and workload.
pub struct Simulator<W = RandomWorkload, Q = Timeline> {
    config: SimulationConfig,
    clock: Timestamp,
    timeline: Q,
    cpu: Cpu,
    memory: MemoryQueue,
    io: IoDevice,
    stats: Statistics,
    factory: ProcessFactory,
    workload: W,
}

impl Simulator {
    /// Simulator with a seeded random workload
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let workload = RandomWorkload::seeded(config.seed);
        Self::with_parts(config, workload, Timeline::new())
    }
}

impl<W: Workload, Q: EventQueue> Simulator<W, Q> {
    /// Simulator with an injected workload and event queue
    ///
    /// The first process arrival is scheduled at time 0.
    pub fn with_parts(config: SimulationConfig, workload: W, mut timeline: Q) -> Result<Self, ConfigError> {
        config.validate()?;
        timeline.insert(Event::new(EventKind::NewProcess, 0));

        Ok(Self {
            cpu: Cpu::new(config.time_quantum()?),
            memory: MemoryQueue::new(config.memory_size),
            io: IoDevice::new(config.avg_io_time),
            factory: ProcessFactory::new(config.memory_size),
            stats: Statistics::new(),
            clock: 0,
            timeline,
            workload,
            config,
        })
    }

    #[inline]
    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    #[inline]
    pub fn memory(&self) -> &MemoryQueue {
        &self.memory
    }

    #[inline]
    pub fn io(&self) -> &IoDevice {
        &self.io
    }

    #[inline]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Every process still in the system, wherever it is
    pub fn live_processes(&self) -> impl Iterator<Item = &Process> {
        self.memory
            .processes()
            .chain(self.cpu.ready_queue())
            .chain(self.cpu.active_process())
            .chain(self.io.queue())
            .chain(self.io.active_process())
    }

    /// Run until the configured simulation length and report
    pub fn run(&mut self) -> SimResult<StatisticsReport> {
        let _span = info_span!("simulation", seed = self.config.seed).entered();
        info!(length = self.config.simulation_length, "Simulation starting");

        let mut dispatched = 0u64;
        while self.step()?.is_some() {
            dispatched += 1;
        }
        self.advance_to(self.config.simulation_length);

        info!(
            events = dispatched,
            created = self.stats.created_processes,
            completed = self.stats.completed_processes,
            "Simulation finished"
        );
        Ok(self.stats.report(self.config.simulation_length))
    }

    /// Dispatch the next event due within the simulation length
    ///
    /// Returns the dispatched event, or `None` once nothing is left to do.
    pub fn step(&mut self) -> SimResult<Option<Event>> {
        match self.timeline.peek_due() {
            Some(due) if due <= self.config.simulation_length => {}
            _ => return Ok(None),
        }
        let Some(event) = self.timeline.pop_earliest() else {
            return Ok(None);
        };

        self.advance_to(event.due());
        trace!(event = %event, "dispatch");

        match event.kind() {
            EventKind::NewProcess => self.create_process()?,
            EventKind::SwitchProcess => self.switch_process(&event)?,
            EventKind::EndProcess => self.end_process(&event)?,
            EventKind::IoRequest => self.process_io_request(&event)?,
            EventKind::EndIo => self.end_io_operation(&event)?,
        }
        Ok(Some(event))
    }

    /// Move the clock forward, letting every component account the gap
    fn advance_to(&mut self, time: Timestamp) {
        if time <= self.clock {
            return;
        }
        let elapsed = time - self.clock;
        self.cpu.time_passed(elapsed, &mut self.stats);
        self.memory.time_passed(elapsed, &mut self.stats);
        self.io.time_passed(elapsed, &mut self.stats);
        self.clock = time;
    }

    fn schedule(&mut self, event: Option<Event>) {
        if let Some(event) = event {
            trace!(event = %event, "scheduled");
            self.timeline.insert(event);
        }
    }

    fn create_process(&mut self) -> SimResult<()> {
        let process = self.factory.spawn(self.clock, &mut self.workload);
        self.stats.created_processes += 1;
        self.memory.insert_process(process, &mut self.stats);
        self.admit_processes()?;

        let gap = self
            .workload
            .arrival_interval(self.config.avg_arrival_interval);
        let due = self.clock.saturating_add(gap);
        self.schedule(Some(Event::new(EventKind::NewProcess, due)));
        Ok(())
    }

    /// Move every process that fits from the memory queue to the CPU
    fn admit_processes(&mut self) -> SimResult<()> {
        while let Some(process) = self.memory.admit_next(self.clock)? {
            let event = self.cpu.insert_process(process, self.clock, &mut self.stats)?;
            self.schedule(event);
        }
        Ok(())
    }

    /// Slice events are valid only for the switch-in that produced them
    fn is_stale(&self, event: &Event) -> bool {
        if self.cpu.is_current_slice(event) {
            return false;
        }
        debug!(event = %event, "dropping stale cpu event");
        true
    }

    fn switch_process(&mut self, event: &Event) -> SimResult<()> {
        if self.is_stale(event) {
            return Ok(());
        }
        let next = self.cpu.switch_process(self.clock, &mut self.stats)?;
        self.schedule(next);
        Ok(())
    }

    fn end_process(&mut self, event: &Event) -> SimResult<()> {
        if self.is_stale(event) {
            return Ok(());
        }
        let handoff = self.cpu.active_process_left(self.clock)?;
        self.schedule(handoff.next);

        if let Some(process) = handoff.departed {
            debug_assert!(process.is_finished());
            debug_assert_eq!(process.times().total(), self.clock - process.created_at());
            info!(
                pid = %process.pid(),
                clock = self.clock,
                time_in_system = self.clock - process.created_at(),
                "Process completed"
            );
            self.memory.release(process.memory_needed());
            process.update_statistics(&mut self.stats);
            self.admit_processes()?;
        }
        Ok(())
    }

    fn process_io_request(&mut self, event: &Event) -> SimResult<()> {
        if self.is_stale(event) {
            return Ok(());
        }
        let handoff = self.cpu.active_process_left(self.clock)?;
        self.schedule(handoff.next);

        if let Some(process) = handoff.departed {
            let event =
                self.io
                    .add_io_request(process, self.clock, &mut self.workload, &mut self.stats)?;
            self.schedule(event);
        }
        Ok(())
    }

    fn end_io_operation(&mut self, event: &Event) -> SimResult<()> {
        if event.subject() != self.io.active_pid() {
            warn!(event = %event, "io completion for a process not in service");
            return Ok(());
        }
        let (process, next_io) =
            self.io
                .remove_active(self.clock, &mut self.workload, &mut self.stats)?;
        self.schedule(next_io);

        let next_slice = self.cpu.insert_process(process, self.clock, &mut self.stats)?;
        self.schedule(next_slice);
        Ok(())
    }
}
