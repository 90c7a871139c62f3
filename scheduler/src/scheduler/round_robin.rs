use super::{Algorithm, Pid, Process, Scheduler, Ticks, TraceRecorder};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Time-sliced FIFO: each dispatch runs for at most `quantum` ticks, then the
/// process rejoins the tail of the queue behind anything that arrived meanwhile.
pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "round robin needs a positive quantum");
        Self { quantum }
    }
}

/// Processes not yet in the ready queue, in arrival order.
struct Arrivals {
    order: Vec<usize>,
    next: usize,
}

impl Arrivals {
    fn new(processes: &[Process]) -> Self {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&index| (processes[index].arrival(), processes[index].pid()));
        Self { order, next: 0 }
    }

    /// Moves every process that has arrived by `tick` onto the queue.
    fn admit(&mut self, processes: &[Process], tick: Ticks, queue: &mut VecDeque<usize>) {
        while let Some(&index) = self.order.get(self.next) {
            if processes[index].arrival() > tick {
                break;
            }
            trace!(pid = processes[index].pid(), tick, "arrive");
            queue.push_back(index);
            self.next += 1;
        }
    }

    fn peek_arrival(&self, processes: &[Process]) -> Option<Ticks> {
        self.order
            .get(self.next)
            .map(|&index| processes[index].arrival())
    }
}

fn queued_pids(processes: &[Process], queue: &VecDeque<usize>) -> Vec<Pid> {
    queue.iter().map(|&index| processes[index].pid()).collect()
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";
    const ALGORITHM: Algorithm = Algorithm::RoundRobin;

    fn quantum(&self) -> Option<Ticks> {
        Some(self.quantum)
    }

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder) {
        let mut arrivals = Arrivals::new(processes);
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(processes.len());
        let mut clock: Ticks = 0;
        arrivals.admit(processes, clock, &mut queue);

        loop {
            let Some(index) = queue.pop_front() else {
                match arrivals.peek_arrival(processes) {
                    Some(arrival) => {
                        debug!(from = clock, to = arrival, "cpu idle");
                        clock = arrival;
                        arrivals.admit(processes, clock, &mut queue);
                        continue;
                    }
                    None => break,
                }
            };

            let pid = processes[index].pid();
            let slice = self.quantum.min(processes[index].remaining());
            debug!(pid, tick = clock, slice, "dispatch");

            for _ in 0..slice {
                recorder.record_ready(clock, queued_pids(processes, &queue));
                recorder.record_running(clock, pid);
                processes[index].run_for(clock, 1);
                clock += 1;
                // Arrivals during the slice queue ahead of the incumbent
                arrivals.admit(processes, clock, &mut queue);
            }

            if processes[index].is_finished() {
                recorder.record_completion(pid);
                debug!(pid, tick = clock, "complete");
            } else {
                debug!(pid, tick = clock, remaining = processes[index].remaining(), "requeue");
                queue.push_back(index);
            }
        }
    }
}
