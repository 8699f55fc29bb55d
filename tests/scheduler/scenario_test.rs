/*!
 * Scenario Tests
 * Exact switch sequences for small hand-checked workloads
 */

use pretty_assertions::assert_eq;
use rr_cpu_sim::{
    Cpu, Demand, EventKind, Pid, Process, ScriptedWorkload, SimulationConfig, Simulator,
    Statistics, TimeQuantum, Timeline,
};

/// (event kind, due time, active process after dispatch)
type Trace = Vec<(EventKind, u64, Option<Pid>)>;

#[test]
fn test_two_process_scenario_on_cpu() {
    // quantum 100, P1 needs 250, P2 needs 50, both inserted at 0
    let mut cpu = Cpu::new(TimeQuantum::new(100).unwrap());
    let mut stats = Statistics::new();
    let p1 = Process::new(Pid(1), Demand::new(100, 250, 10_000), 0, 10_000);
    let p2 = Process::new(Pid(2), Demand::new(100, 50, 10_000), 0, 10_000);

    let first = cpu.insert_process(p1, 0, &mut stats).unwrap().unwrap();
    assert!(cpu.insert_process(p2, 0, &mut stats).unwrap().is_none());
    assert_eq!((first.kind(), first.due()), (EventKind::SwitchProcess, 100));

    // 100: P1 preempted, P2 promoted; P2 finishes before its quantum ends
    let second = cpu.switch_process(100, &mut stats).unwrap().unwrap();
    assert_eq!(second.subject(), Some(Pid(2)));
    assert_eq!((second.kind(), second.due()), (EventKind::EndProcess, 150));

    // 150: P2 completes, P1 promoted with 150 remaining
    let handoff = cpu.active_process_left(150).unwrap();
    let p2 = handoff.departed.unwrap();
    assert!(p2.is_finished());
    assert_eq!(p2.times().in_ready_queue, 100);
    assert_eq!(p2.times().total(), 150);

    let third = handoff.next.unwrap();
    assert_eq!(cpu.active_process().unwrap().cpu_time_remaining(), 150);
    assert_eq!((third.kind(), third.due()), (EventKind::SwitchProcess, 250));

    // 250: P1 alone, preempted and switched straight back in
    let fourth = cpu.switch_process(250, &mut stats).unwrap().unwrap();
    assert_eq!(fourth.subject(), Some(Pid(1)));
    assert_eq!((fourth.kind(), fourth.due()), (EventKind::EndProcess, 300));

    let handoff = cpu.active_process_left(300).unwrap();
    let p1 = handoff.departed.unwrap();
    assert!(handoff.next.is_none());
    assert_eq!(p1.times().in_cpu, 250);
    assert_eq!(p1.times().in_ready_queue, 50);
    assert_eq!(p1.times().times_in_ready_queue, 3);
    assert_eq!(p1.times().total(), 300);
}

#[test]
fn test_two_process_scenario_through_simulator() {
    let config = SimulationConfig {
        quantum: 100,
        simulation_length: 1_000,
        avg_arrival_interval: 1_000_000,
        ..Default::default()
    };
    let workload = ScriptedWorkload::new()
        .with_demands([Demand::new(100, 250, 10_000), Demand::new(100, 50, 10_000)])
        .with_arrivals([0]);
    let mut sim = Simulator::with_parts(config, workload, Timeline::new()).unwrap();

    let mut trace: Trace = Vec::new();
    while let Some(event) = sim.step().unwrap() {
        trace.push((
            event.kind(),
            event.due(),
            sim.cpu().active_process().map(Process::pid),
        ));
    }

    assert_eq!(
        trace,
        vec![
            (EventKind::NewProcess, 0, Some(Pid(1))),
            (EventKind::NewProcess, 0, Some(Pid(1))),
            (EventKind::SwitchProcess, 100, Some(Pid(2))),
            (EventKind::EndProcess, 150, Some(Pid(1))),
            (EventKind::SwitchProcess, 250, Some(Pid(1))),
            (EventKind::EndProcess, 300, None),
        ]
    );
    assert_eq!(sim.stats().completed_processes, 2);
    assert_eq!(sim.stats().forced_switches, 1);
}

#[test]
fn test_io_request_routes_through_device() {
    let config = SimulationConfig {
        quantum: 100,
        avg_io_time: 30,
        simulation_length: 1_000,
        avg_arrival_interval: 1_000_000,
        ..Default::default()
    };
    // Requests I/O after every 60 ticks of CPU time
    let workload = ScriptedWorkload::new()
        .with_demands([Demand::new(100, 150, 60)])
        .with_io_interval(60)
        .with_io_duration(30);
    let mut sim = Simulator::with_parts(config, workload, Timeline::new()).unwrap();

    let mut trace = Vec::new();
    while let Some(event) = sim.step().unwrap() {
        trace.push((event.kind(), event.due()));
    }

    assert_eq!(
        trace,
        vec![
            (EventKind::NewProcess, 0),
            (EventKind::IoRequest, 60),
            (EventKind::EndIo, 90),
            (EventKind::IoRequest, 150),
            (EventKind::EndIo, 180),
            (EventKind::EndProcess, 210),
        ]
    );

    let stats = sim.stats();
    assert_eq!(stats.processed_io_operations, 2);
    assert_eq!(stats.time_in_cpu, 150);
    assert_eq!(stats.time_in_io, 60);
    assert_eq!(stats.times_in_io_queue, 2);
    assert_eq!(stats.times_in_ready_queue, 3);
}
