use super::{selection, Algorithm, Pid, Priority, Process, Scheduler, Ticks, TraceRecorder};

/// Non-preemptive priority scheduling. Lower values dispatch first.
pub struct PriorityScheduler;

/// Preemptive priority scheduling: a strictly higher-priority arrival takes the CPU at once.
pub struct PreemptivePriorityScheduler;

fn highest_priority(process: &Process) -> (Priority, Ticks, Pid) {
    (
        process.priority().unwrap_or(Priority::MAX),
        process.arrival(),
        process.pid(),
    )
}

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority";
    const ALGORITHM: Algorithm = Algorithm::Priority;

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder) {
        selection::run_to_completion(processes, recorder, highest_priority);
    }
}

impl Scheduler for PreemptivePriorityScheduler {
    const NAME: &'static str = "Preemptive Priority";
    const ALGORITHM: Algorithm = Algorithm::PriorityPreemptive;

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder) {
        selection::run_per_tick(processes, recorder, highest_priority);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{run_prioritized, table};

    #[test]
    fn lower_value_runs_first_regardless_of_input_order() {
        let result = run_prioritized(&PriorityScheduler, &[(0, 3, 2), (0, 2, 1)]);

        assert_eq!(result.completed, vec![2, 1]);
        assert_eq!(table(&result), vec![(1, 2, 5, 2), (2, 0, 2, 0)]);
        assert_eq!(result.ready_queue[&0], vec![1]);
    }

    #[test]
    fn urgent_arrival_waits_without_preemption() {
        let result = run_prioritized(&PriorityScheduler, &[(0, 4, 3), (1, 2, 1)]);

        assert_eq!(table(&result), vec![(1, 0, 4, 0), (2, 4, 6, 3)]);
    }

    #[test]
    fn negative_priorities_are_more_urgent() {
        let result = run_prioritized(&PriorityScheduler, &[(0, 2, 0), (0, 2, -5)]);

        assert_eq!(result.completed, vec![2, 1]);
    }

    #[test]
    fn urgent_arrival_preempts() {
        let result = run_prioritized(&PreemptivePriorityScheduler, &[(0, 4, 3), (1, 2, 1)]);

        assert_eq!(table(&result), vec![(1, 0, 6, 2), (2, 1, 3, 0)]);
        assert_eq!(result.running_process[&0], 1);
        assert_eq!(result.running_process[&1], 2);
        assert_eq!(result.ready_queue[&1], vec![1]);
        assert_eq!(result.completed, vec![2, 1]);
    }

    #[test]
    fn equal_priority_does_not_preempt() {
        let result = run_prioritized(&PreemptivePriorityScheduler, &[(0, 3, 2), (1, 1, 2)]);

        assert_eq!(table(&result), vec![(1, 0, 3, 0), (2, 3, 4, 2)]);
    }

    #[test]
    fn preempted_process_resumes_without_new_start() {
        let result = run_prioritized(
            &PreemptivePriorityScheduler,
            &[(0, 5, 4), (2, 1, 1), (4, 2, 2)],
        );

        // P1 runs 0-1, P2 at 2, P1 at 3, P3 4-5, P1 6-7
        assert_eq!(
            table(&result),
            vec![(1, 0, 8, 3), (2, 2, 3, 0), (3, 4, 6, 0)]
        );
        assert_eq!(result.completed, vec![2, 3, 1]);
    }
}
