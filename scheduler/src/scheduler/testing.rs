//! Helpers for driver tests.

use super::{drive, Pid, Priority, Process, ScheduleResult, Scheduler, Ticks};

/// Runs `scheduler` over `(arrival, burst)` pairs, pids assigned in order.
pub(crate) fn run_driver<S: Scheduler>(scheduler: &S, input: &[(Ticks, Ticks)]) -> ScheduleResult {
    let processes = (1..)
        .zip(input)
        .map(|(pid, &(arrival, burst))| Process::new(pid, arrival, burst))
        .collect();
    drive(scheduler, processes)
}

/// Like `run_driver`, over `(arrival, burst, priority)` triples.
pub(crate) fn run_prioritized<S: Scheduler>(
    scheduler: &S,
    input: &[(Ticks, Ticks, Priority)],
) -> ScheduleResult {
    let processes = (1..)
        .zip(input)
        .map(|(pid, &(arrival, burst, priority))| {
            Process::with_priority(pid, arrival, burst, Some(priority))
        })
        .collect();
    drive(scheduler, processes)
}

/// `(pid, start, end, waiting)` per process, pid ascending.
pub(crate) fn table(result: &ScheduleResult) -> Vec<(Pid, Ticks, Ticks, Ticks)> {
    result
        .process_table
        .iter()
        .map(|row| (row.pid, row.start, row.end, row.waiting))
        .collect()
}
