//! Selection loops shared by the key-ordered drivers (SJF and Priority).
//!
//! A key function orders the ready set; the smallest key is dispatched next.
//! Keys end with the pid, so every comparison is total and deterministic.

use super::{Pid, Process, Ticks, TraceRecorder};
use tracing::{debug, trace};

/// Index of the ready process with the smallest key at `tick`.
pub(super) fn best_candidate<K, F>(processes: &[Process], tick: Ticks, key: F) -> Option<usize>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    processes
        .iter()
        .enumerate()
        .filter(|(_, process)| process.is_ready_at(tick))
        .min_by_key(|&(_, process)| key(process))
        .map(|(index, _)| index)
}

/// Pids waiting at `tick`, in dispatch order, leaving out `running`.
pub(super) fn ready_pids<K, F>(
    processes: &[Process],
    tick: Ticks,
    running: Option<usize>,
    key: F,
) -> Vec<Pid>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut waiting: Vec<&Process> = processes
        .iter()
        .enumerate()
        .filter(|&(index, process)| Some(index) != running && process.is_ready_at(tick))
        .map(|(_, process)| process)
        .collect();
    waiting.sort_by_key(|&process| key(process));
    waiting.iter().map(|process| process.pid()).collect()
}

/// Earliest arrival after `tick` among unfinished processes.
pub(super) fn next_arrival(processes: &[Process], tick: Ticks) -> Option<Ticks> {
    processes
        .iter()
        .filter(|process| !process.is_finished() && process.arrival() > tick)
        .map(Process::arrival)
        .min()
}

/// Event loop: whenever the CPU frees up, run the best ready process to completion.
pub(super) fn run_to_completion<K, F>(processes: &mut [Process], recorder: &mut TraceRecorder, key: F)
where
    K: Ord,
    F: Fn(&Process) -> K + Copy,
{
    let mut clock: Ticks = 0;

    loop {
        let Some(index) = best_candidate(processes, clock, key) else {
            match next_arrival(processes, clock) {
                Some(arrival) => {
                    debug!(from = clock, to = arrival, "cpu idle");
                    clock = arrival;
                    continue;
                }
                None => break,
            }
        };

        let pid = processes[index].pid();
        let burst = processes[index].burst();
        debug!(pid, tick = clock, burst, "dispatch");

        processes[index].run_for(clock, burst);
        recorder.record_span(clock, burst, pid);
        for tick in clock..clock + burst {
            recorder.record_ready(tick, ready_pids(processes, tick, None, key));
        }
        recorder.record_completion(pid);

        clock += burst;
        debug!(pid, tick = clock, "complete");
    }
}

/// Tick loop: re-select every tick, so a better key preempts the incumbent at once.
pub(super) fn run_per_tick<K, F>(processes: &mut [Process], recorder: &mut TraceRecorder, key: F)
where
    K: Ord,
    F: Fn(&Process) -> K + Copy,
{
    let mut clock: Ticks = 0;
    let mut previous: Option<usize> = None;

    loop {
        let Some(index) = best_candidate(processes, clock, key) else {
            previous = None;
            match next_arrival(processes, clock) {
                Some(arrival) => {
                    debug!(from = clock, to = arrival, "cpu idle");
                    clock = arrival;
                    continue;
                }
                None => break,
            }
        };

        let pid = processes[index].pid();
        match previous {
            Some(incumbent) if incumbent != index && !processes[incumbent].is_finished() => {
                debug!(pid, preempted = processes[incumbent].pid(), tick = clock, "preempt");
            }
            Some(incumbent) if incumbent == index => {}
            _ => debug!(pid, tick = clock, "dispatch"),
        }
        trace!(pid, tick = clock, remaining = processes[index].remaining(), "run");

        recorder.record_ready(clock, ready_pids(processes, clock, Some(index), key));
        recorder.record_running(clock, pid);
        if processes[index].run_for(clock, 1) {
            recorder.record_completion(pid);
            debug!(pid, tick = clock + 1, "complete");
        }

        previous = Some(index);
        clock += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst_key(process: &Process) -> (Ticks, Ticks, Pid) {
        (process.burst(), process.arrival(), process.pid())
    }

    #[test]
    fn candidate_ties_fall_back_to_arrival_then_pid() {
        let processes = vec![
            Process::new(1, 2, 3),
            Process::new(2, 1, 3),
            Process::new(3, 1, 3),
            Process::new(4, 5, 1),
        ];

        assert_eq!(best_candidate(&processes, 2, burst_key), Some(1));
        assert_eq!(best_candidate(&processes, 0, burst_key), None);
        assert_eq!(ready_pids(&processes, 2, Some(1), burst_key), vec![3, 1]);
    }

    #[test]
    fn next_arrival_skips_finished_processes() {
        let mut processes = vec![Process::new(1, 4, 1), Process::new(2, 6, 1)];
        processes[0].run_for(4, 1);

        assert_eq!(next_arrival(&processes, 0), Some(6));
        assert_eq!(next_arrival(&processes, 6), None);
    }
}
