use super::{selection, Algorithm, Pid, Process, Scheduler, Ticks, TraceRecorder};

/// Non-preemptive shortest job first: the shortest burst among arrived processes runs to completion.
pub struct ShortestJobFirst;

/// Preemptive variant: every tick runs the process with the least remaining time.
pub struct ShortestRemainingTimeFirst;

fn shortest_burst(process: &Process) -> (Ticks, Ticks, Pid) {
    (process.burst(), process.arrival(), process.pid())
}

fn shortest_remaining(process: &Process) -> (Ticks, Ticks, Pid) {
    (process.remaining(), process.arrival(), process.pid())
}

impl Scheduler for ShortestJobFirst {
    const NAME: &'static str = "Shortest Job First";
    const ALGORITHM: Algorithm = Algorithm::Sjf;

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder) {
        selection::run_to_completion(processes, recorder, shortest_burst);
    }
}

impl Scheduler for ShortestRemainingTimeFirst {
    const NAME: &'static str = "Shortest Remaining Time First";
    const ALGORITHM: Algorithm = Algorithm::SjfPreemptive;

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder) {
        selection::run_per_tick(processes, recorder, shortest_remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{run_driver, table};

    #[test]
    fn shortest_arrived_job_goes_next() {
        let result = run_driver(&ShortestJobFirst, &[(0, 7), (2, 4), (4, 1), (5, 4)]);

        // P1 cannot be preempted; at 7 the 1-tick job beats both 4-tick jobs
        assert_eq!(
            table(&result),
            vec![(1, 0, 7, 0), (2, 8, 12, 6), (3, 7, 8, 3), (4, 12, 16, 7)]
        );
        assert_eq!(result.completed, vec![1, 3, 2, 4]);
        assert_eq!(result.ready_queue[&5], vec![3, 2, 4]);
        assert_eq!(result.average_waiting, 4.0);
    }

    #[test]
    fn equal_bursts_fall_back_to_arrival() {
        let result = run_driver(&ShortestJobFirst, &[(0, 2), (2, 3), (1, 3)]);

        assert_eq!(result.completed, vec![1, 3, 2]);
    }

    #[test]
    fn idle_until_first_arrival() {
        let result = run_driver(&ShortestJobFirst, &[(4, 2), (3, 5)]);

        assert_eq!(table(&result), vec![(1, 8, 10, 4), (2, 3, 8, 0)]);
        assert!(!result.running_process.contains_key(&0));
    }

    #[test]
    fn late_short_job_preempts_immediately() {
        let result = run_driver(&ShortestRemainingTimeFirst, &[(0, 7), (2, 4), (4, 1), (5, 4)]);

        assert_eq!(
            table(&result),
            vec![(1, 0, 16, 9), (2, 2, 7, 1), (3, 4, 5, 0), (4, 7, 11, 2)]
        );
        assert_eq!(result.running_process[&4], 3);
        assert_eq!(result.completed, vec![3, 2, 4, 1]);
        assert_eq!(result.ready_queue[&4], vec![2, 1]);
        assert_eq!(result.average_waiting, 3.0);
    }

    #[test]
    fn equal_remaining_keeps_the_earlier_arrival() {
        let result = run_driver(&ShortestRemainingTimeFirst, &[(0, 4), (2, 2)]);

        // At tick 2 both have two ticks left; P1 arrived first and keeps the CPU
        assert_eq!(table(&result), vec![(1, 0, 4, 0), (2, 4, 6, 2)]);
    }
}
