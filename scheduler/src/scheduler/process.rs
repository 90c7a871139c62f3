use super::{Pid, Priority, Ticks};

/// One schedulable unit together with its run-state for a single simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    arrival: Ticks,
    burst: Ticks,
    remaining: Ticks,
    priority: Option<Priority>,
    start: Option<Ticks>,
    end: Option<Ticks>,
}

impl Process {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Process::with_priority(pid, arrival, burst, None)
    }

    pub fn with_priority(pid: Pid, arrival: Ticks, burst: Ticks, priority: Option<Priority>) -> Self {
        debug_assert!(burst > 0, "process {pid} must need CPU time");
        Self {
            pid,
            arrival,
            burst,
            remaining: burst,
            priority,
            start: None,
            end: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival(&self) -> Ticks {
        self.arrival
    }

    pub fn burst(&self) -> Ticks {
        self.burst
    }

    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn start(&self) -> Option<Ticks> {
        self.start
    }

    pub fn end(&self) -> Option<Ticks> {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Arrived by `tick` and still needs the CPU.
    pub fn is_ready_at(&self, tick: Ticks) -> bool {
        self.arrival <= tick && !self.is_finished()
    }

    /// Runs the process for `ticks` units beginning at `tick`.
    /// Returns true once the process has finished.
    pub fn run_for(&mut self, tick: Ticks, ticks: Ticks) -> bool {
        debug_assert!(ticks > 0 && ticks <= self.remaining);
        debug_assert!(tick >= self.arrival, "process {} ran before arriving", self.pid);

        // Resumptions keep the first dispatch tick
        self.start.get_or_insert(tick);
        self.remaining -= ticks;

        if self.remaining == 0 {
            self.end = Some(tick + ticks);
            true
        } else {
            false
        }
    }

    pub fn turnaround(&self) -> Option<Ticks> {
        self.end.map(|end| end - self.arrival)
    }

    pub fn waiting(&self) -> Option<Ticks> {
        self.turnaround().map(|turnaround| turnaround - self.burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_process_has_full_remaining_time() {
        let process = Process::new(1, 3, 4);
        assert_eq!(process.remaining(), 4);
        assert_eq!(process.start(), None);
        assert_eq!(process.end(), None);
        assert!(!process.is_ready_at(2));
        assert!(process.is_ready_at(3));
    }

    #[test]
    fn start_is_kept_across_resumptions() {
        let mut process = Process::new(1, 0, 3);
        assert!(!process.run_for(2, 1));
        assert!(!process.run_for(5, 1));
        assert!(process.run_for(9, 1));

        assert_eq!(process.start(), Some(2));
        assert_eq!(process.end(), Some(10));
        assert_eq!(process.turnaround(), Some(10));
        assert_eq!(process.waiting(), Some(7));
        assert!(!process.is_ready_at(10));
    }
}
