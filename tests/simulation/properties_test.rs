/*!
 * Property Tests
 * Accounting and scheduling invariants over generated workloads
 */

use proptest::prelude::*;
use rr_cpu_sim::{
    Cpu, Demand, EventKind, EventQueue, Pid, Process, SimulationConfig, Simulator, Statistics,
    TimeQuantum, Timeline,
};
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// CPU-bound processes on a bare CPU: every process is accounted from
    /// creation to completion and the CPU never idles while work remains
    #[test]
    fn prop_cpu_bound_accounting(
        needs in prop::collection::vec(1u64..2_000, 1..12),
        quantum in 1u64..400,
    ) {
        let mut cpu = Cpu::new(TimeQuantum::new(quantum).unwrap());
        let mut stats = Statistics::new();
        let mut timeline = Timeline::new();

        for (i, need) in needs.iter().enumerate() {
            let p = Process::new(Pid(i as u64 + 1), Demand::new(100, *need, u64::MAX), 0, u64::MAX);
            if let Some(event) = cpu.insert_process(p, 0, &mut stats).unwrap() {
                timeline.insert(event);
            }
        }

        let mut first_run: Vec<Pid> = Vec::new();
        let mut completed = 0usize;
        if let Some(p) = cpu.active_process() {
            first_run.push(p.pid());
        }

        while let Some(event) = timeline.pop_earliest() {
            let clock = event.due();
            prop_assert!(cpu.is_current_slice(&event));

            let next = match event.kind() {
                EventKind::SwitchProcess => {
                    prop_assert_eq!(clock - cpu.active_since().unwrap(), quantum);
                    cpu.switch_process(clock, &mut stats).unwrap()
                }
                EventKind::EndProcess => {
                    let handoff = cpu.active_process_left(clock).unwrap();
                    let done = handoff.departed.unwrap();
                    prop_assert_eq!(done.cpu_time_remaining(), 0);
                    prop_assert_eq!(done.times().total(), clock - done.created_at());
                    completed += 1;
                    handoff.next
                }
                other => panic!("unexpected event {:?}", other),
            };

            if let Some(p) = cpu.active_process() {
                if !first_run.contains(&p.pid()) {
                    first_run.push(p.pid());
                }
            }
            if let Some(event) = next {
                timeline.insert(event);
            }
        }

        let expected: Vec<Pid> = (1..=needs.len() as u64).map(Pid).collect();
        prop_assert_eq!(first_run, expected);
        prop_assert_eq!(completed, needs.len());
        prop_assert!(cpu.is_idle());
    }

    /// Full simulations: remaining CPU time never grows and live processes
    /// never lose time, for any seed and quantum
    #[test]
    fn prop_simulation_invariants(seed in any::<u64>(), quantum in 10u64..1_000) {
        let config = SimulationConfig {
            quantum,
            simulation_length: 20_000,
            avg_arrival_interval: 800,
            seed,
            ..Default::default()
        };
        let mut sim = Simulator::new(config).unwrap();
        let mut remaining: HashMap<Pid, u64> = HashMap::new();

        while sim.step().unwrap().is_some() {
            let clock = sim.clock();
            for process in sim.live_processes() {
                let previous = remaining.insert(process.pid(), process.cpu_time_remaining());
                if let Some(previous) = previous {
                    prop_assert!(process.cpu_time_remaining() <= previous);
                }
                prop_assert_eq!(
                    clock - process.created_at(),
                    process.times().total() + (clock - process.time_of_last_event())
                );
            }

            if let Some(active) = sim.cpu().active_process() {
                prop_assert!(sim.cpu().ready_queue().all(|p| p.pid() != active.pid()));
            }
        }

        let stats = sim.stats();
        prop_assert_eq!(
            stats.created_processes,
            stats.completed_processes + sim.live_processes().count() as u64
        );
    }
}
