use super::{selection, Algorithm, Pid, Process, Scheduler, Ticks, TraceRecorder};
use tracing::debug;

/// Dispatches in arrival order, ties by pid, each process running to completion.
pub struct FirstComeFirstServed;

impl FirstComeFirstServed {
    fn arrival_order(process: &Process) -> (Ticks, Pid) {
        (process.arrival(), process.pid())
    }
}

impl Scheduler for FirstComeFirstServed {
    const NAME: &'static str = "First-Come-First-Served";
    const ALGORITHM: Algorithm = Algorithm::Fcfs;

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder) {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&index| Self::arrival_order(&processes[index]));

        let mut clock: Ticks = 0;
        for index in order {
            let pid = processes[index].pid();
            let burst = processes[index].burst();
            let start = clock.max(processes[index].arrival());
            if start > clock {
                debug!(from = clock, to = start, "cpu idle");
            }
            debug!(pid, tick = start, burst, "dispatch");

            processes[index].run_for(start, burst);
            recorder.record_span(start, burst, pid);
            for tick in start..start + burst {
                let waiting = selection::ready_pids(processes, tick, None, Self::arrival_order);
                recorder.record_ready(tick, waiting);
            }
            recorder.record_completion(pid);

            clock = start + burst;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{run_driver, table};

    #[test]
    fn second_process_waits_for_the_first() {
        let result = run_driver(&FirstComeFirstServed, &[(0, 5), (1, 3)]);

        assert_eq!(table(&result), vec![(1, 0, 5, 0), (2, 5, 8, 4)]);
        assert_eq!(result.average_waiting, 2.0);
        assert_eq!(result.average_turnaround, 6.0);
        assert_eq!(result.ready_queue[&1], vec![2]);
        assert_eq!(result.ready_queue[&4], vec![2]);
        assert!(!result.ready_queue.contains_key(&0));
    }

    #[test]
    fn idle_gap_before_late_arrival() {
        let result = run_driver(&FirstComeFirstServed, &[(2, 1), (6, 2)]);

        assert_eq!(table(&result), vec![(1, 2, 3, 0), (2, 6, 8, 0)]);
        assert_eq!(result.running_process.keys().copied().collect::<Vec<_>>(), vec![2, 6, 7]);
    }

    #[test]
    fn simultaneous_arrivals_keep_input_order() {
        let result = run_driver(&FirstComeFirstServed, &[(3, 2), (0, 1), (3, 1)]);

        assert_eq!(result.completed, vec![2, 1, 3]);
        assert_eq!(table(&result), vec![(1, 3, 5, 0), (2, 0, 1, 0), (3, 5, 6, 2)]);
    }
}
