/*!
 * CPU Tests
 * Round-robin queue behavior, idle handling and slice bounds
 */

use pretty_assertions::assert_eq;
use rr_cpu_sim::{
    Cpu, CpuState, Demand, EventKind, Pid, Process, SchedulerError, Statistics, TimeQuantum,
};

fn cpu(quantum: u64) -> Cpu {
    Cpu::new(TimeQuantum::new(quantum).unwrap())
}

/// Process that never requests I/O within the test horizon
fn cpu_bound(id: u64, cpu_time: u64, created_at: u64) -> Process {
    Process::new(Pid(id), Demand::new(100, cpu_time, 1_000_000), created_at, 1_000_000)
}

fn active_pid(cpu: &Cpu) -> Option<Pid> {
    cpu.active_process().map(Process::pid)
}

#[test]
fn test_fifo_fairness() {
    let mut cpu = cpu(100);
    let mut stats = Statistics::new();

    cpu.insert_process(cpu_bound(1, 1_000, 0), 0, &mut stats).unwrap();
    cpu.insert_process(cpu_bound(2, 1_000, 0), 0, &mut stats).unwrap();
    cpu.insert_process(cpu_bound(3, 1_000, 0), 0, &mut stats).unwrap();

    let mut seen = vec![active_pid(&cpu).unwrap()];
    for clock in [100, 200] {
        cpu.switch_process(clock, &mut stats).unwrap();
        seen.push(active_pid(&cpu).unwrap());
    }

    assert_eq!(seen, vec![Pid(1), Pid(2), Pid(3)]);
}

#[test]
fn test_queue_exclusivity() {
    let mut cpu = cpu(100);
    let mut stats = Statistics::new();

    for id in 1..=4 {
        cpu.insert_process(cpu_bound(id, 1_000, 0), 0, &mut stats).unwrap();
    }

    for step in 1..=10 {
        cpu.switch_process(step * 100, &mut stats).unwrap();

        let active = active_pid(&cpu).unwrap();
        let queued: Vec<Pid> = cpu.ready_queue().map(Process::pid).collect();
        assert!(!queued.contains(&active));
        assert_eq!(queued.len() + 1, 4);
    }
}

#[test]
fn test_quantum_bound() {
    let mut cpu = cpu(250);
    let mut stats = Statistics::new();

    let event = cpu
        .insert_process(cpu_bound(1, 5_000, 0), 40, &mut stats)
        .unwrap()
        .unwrap();
    cpu.insert_process(cpu_bound(2, 5_000, 0), 60, &mut stats).unwrap();

    assert_eq!(event.kind(), EventKind::SwitchProcess);
    assert_eq!(event.due(), cpu.active_since().unwrap() + 250);

    let next = cpu.switch_process(event.due(), &mut stats).unwrap().unwrap();
    assert_eq!(next.due(), 290 + 250);
}

#[test]
fn test_idle_correctness() {
    let mut cpu = cpu(100);
    let mut stats = Statistics::new();

    assert_eq!(cpu.state(), CpuState::Idle);
    assert!(cpu.switch_process(0, &mut stats).unwrap().is_none());
    assert!(cpu.switch_process(10, &mut stats).unwrap().is_none());

    let handoff = cpu.active_process_left(20).unwrap();
    assert!(handoff.departed.is_none());
    assert!(handoff.next.is_none());
    assert_eq!(cpu.state(), CpuState::Idle);
}

#[test]
fn test_busy_to_idle_and_back() {
    let mut cpu = cpu(100);
    let mut stats = Statistics::new();

    cpu.insert_process(cpu_bound(1, 50, 0), 0, &mut stats).unwrap();
    assert_eq!(cpu.state(), CpuState::Busy);

    let handoff = cpu.active_process_left(50).unwrap();
    assert!(handoff.next.is_none());
    assert_eq!(cpu.state(), CpuState::Idle);

    let event = cpu
        .insert_process(cpu_bound(2, 500, 60), 60, &mut stats)
        .unwrap()
        .unwrap();
    assert_eq!(event.due(), 160);
    assert_eq!(cpu.state(), CpuState::Busy);
    assert_eq!(stats.ready_queue.insertions, 2);
}

#[test]
fn test_completion_monotonicity() {
    let mut cpu = cpu(100);
    let mut stats = Statistics::new();

    cpu.insert_process(cpu_bound(1, 330, 0), 0, &mut stats).unwrap();

    let mut clock = 0;
    let mut last_remaining = u64::MAX;
    loop {
        let remaining = cpu.active_process().unwrap().cpu_time_remaining();
        assert!(remaining <= last_remaining);
        last_remaining = remaining;

        clock += remaining.min(100);
        if remaining <= 100 {
            let handoff = cpu.active_process_left(clock).unwrap();
            let done = handoff.departed.unwrap();
            assert_eq!(done.cpu_time_remaining(), 0);
            assert_eq!(done.times().in_cpu, 330);
            break;
        }
        cpu.switch_process(clock, &mut stats).unwrap();
    }
    assert_eq!(clock, 330);
}

#[test]
fn test_clock_regression_fails_fast() {
    let mut cpu = cpu(100);
    let mut stats = Statistics::new();

    cpu.insert_process(cpu_bound(1, 500, 0), 100, &mut stats).unwrap();

    let err = cpu.active_process_left(99).unwrap_err();
    assert!(matches!(err, SchedulerError::Process(_)));
    assert_eq!(active_pid(&cpu), Some(Pid(1)));
}
