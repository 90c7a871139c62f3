use super::{Pid, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-tick record of CPU occupancy, the ready set and completion order.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    running: BTreeMap<Ticks, Pid>,
    ready: BTreeMap<Ticks, Vec<Pid>>,
    completed: Vec<Pid>,
}

/// The finished trace of one simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    pub running_process: BTreeMap<Ticks, Pid>,
    pub ready_queue: BTreeMap<Ticks, Vec<Pid>>,
    pub completed: Vec<Pid>,
}

/// A maximal run of ticks with the same CPU occupant. `pid` is `None` while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    pub start: Ticks,
    pub end: Ticks,
    pub pid: Option<Pid>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_running(&mut self, tick: Ticks, pid: Pid) {
        let previous = self.running.insert(tick, pid);
        debug_assert!(
            previous.is_none(),
            "tick {tick} already occupied by {previous:?}, cannot also run {pid}"
        );
    }

    /// Marks `pid` as running for `length` ticks beginning at `start`.
    pub fn record_span(&mut self, start: Ticks, length: Ticks, pid: Pid) {
        for tick in start..start + length {
            self.record_running(tick, pid);
        }
    }

    /// Empty ready sets are not stored.
    pub fn record_ready(&mut self, tick: Ticks, pids: Vec<Pid>) {
        if !pids.is_empty() {
            self.ready.insert(tick, pids);
        }
    }

    pub fn record_completion(&mut self, pid: Pid) {
        debug_assert!(!self.completed.contains(&pid), "process {pid} completed twice");
        self.completed.push(pid);
    }

    pub fn finish(self) -> Trace {
        Trace {
            running_process: self.running,
            ready_queue: self.ready,
            completed: self.completed,
        }
    }
}

impl Trace {
    /// Number of ticks on which some process held the CPU.
    pub fn busy_ticks(&self) -> usize {
        self.running_process.len()
    }

    /// Gantt segments covering `0..horizon` without gaps.
    pub fn timeline(&self, horizon: Ticks) -> Vec<GanttSegment> {
        let mut segments: Vec<GanttSegment> = Vec::new();

        for tick in 0..horizon {
            let occupant = self.running_process.get(&tick).copied();
            match segments.last_mut() {
                Some(segment) if segment.pid == occupant => segment.end = tick + 1,
                _ => segments.push(GanttSegment {
                    start: tick,
                    end: tick + 1,
                    pid: occupant,
                }),
            }
        }

        segments
    }
}
