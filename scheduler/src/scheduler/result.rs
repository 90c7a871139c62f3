use super::{aggregate, Algorithm, GanttSegment, Pid, Priority, Process, Ticks, Trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of the process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub start: Ticks,
    pub end: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
}

impl ProcessRow {
    /// `None` until the process has completed.
    pub fn from_process(process: &Process) -> Option<Self> {
        Some(Self {
            pid: process.pid(),
            arrival: process.arrival(),
            burst: process.burst(),
            priority: process.priority(),
            start: process.start()?,
            end: process.end()?,
            turnaround: process.turnaround()?,
            waiting: process.waiting()?,
        })
    }
}

/// Everything the presentation layer reads about one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
    pub process_table: Vec<ProcessRow>,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub running_process: BTreeMap<Ticks, Pid>,
    pub ready_queue: BTreeMap<Ticks, Vec<Pid>>,
    pub completed: Vec<Pid>,
    pub timeline: Vec<GanttSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    NotArrived,
    Ready,
    Running,
    Completed,
}

/// The process states at one tick, as drawn by the live view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tick: Ticks,
    pub running: Option<Pid>,
    pub ready: Vec<Pid>,
    pub completed: Vec<Pid>,
}

impl ScheduleResult {
    pub fn assemble(
        algorithm: Algorithm,
        quantum: Option<Ticks>,
        processes: &[Process],
        trace: Trace,
    ) -> Self {
        let metrics = aggregate(processes);
        let makespan = metrics.rows.iter().map(|row| row.end).max().unwrap_or(0);
        let timeline = trace.timeline(makespan);

        Self {
            algorithm,
            quantum,
            process_table: metrics.rows,
            average_turnaround: metrics.average_turnaround,
            average_waiting: metrics.average_waiting,
            running_process: trace.running_process,
            ready_queue: trace.ready_queue,
            completed: trace.completed,
            timeline,
        }
    }

    /// Tick at which the last process finishes.
    pub fn makespan(&self) -> Ticks {
        self.process_table.iter().map(|row| row.end).max().unwrap_or(0)
    }

    pub fn row(&self, pid: Pid) -> Option<&ProcessRow> {
        self.process_table.iter().find(|row| row.pid == pid)
    }

    pub fn state_of(&self, pid: Pid, tick: Ticks) -> Option<ProcessState> {
        let row = self.row(pid)?;
        Some(if row.arrival > tick {
            ProcessState::NotArrived
        } else if row.end <= tick {
            ProcessState::Completed
        } else if self.running_process.get(&tick) == Some(&pid) {
            ProcessState::Running
        } else {
            ProcessState::Ready
        })
    }

    pub fn snapshot(&self, tick: Ticks) -> Snapshot {
        Snapshot {
            tick,
            running: self.running_process.get(&tick).copied(),
            ready: self.ready_queue.get(&tick).cloned().unwrap_or_default(),
            completed: self
                .completed
                .iter()
                .copied()
                .filter(|&pid| self.row(pid).is_some_and(|row| row.end <= tick))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{simulate, ProcessSpec, SimulationRequest};

    fn fcfs_result() -> ScheduleResult {
        simulate(&SimulationRequest::new(
            Algorithm::Fcfs,
            vec![ProcessSpec::new(0, 5), ProcessSpec::new(1, 3), ProcessSpec::new(10, 1)],
        ))
        .unwrap()
    }

    #[test]
    fn snapshot_follows_the_trace() {
        let result = fcfs_result();

        let snapshot = result.snapshot(6);
        assert_eq!(snapshot.running, Some(2));
        assert!(snapshot.ready.is_empty());
        assert_eq!(snapshot.completed, vec![1]);

        let idle = result.snapshot(9);
        assert_eq!(idle.running, None);
        assert_eq!(idle.completed, vec![1, 2]);
    }

    #[test]
    fn states_over_time() {
        let result = fcfs_result();

        assert_eq!(result.state_of(2, 0), Some(ProcessState::NotArrived));
        assert_eq!(result.state_of(2, 1), Some(ProcessState::Ready));
        assert_eq!(result.state_of(2, 5), Some(ProcessState::Running));
        assert_eq!(result.state_of(2, 8), Some(ProcessState::Completed));
        assert_eq!(result.state_of(9, 0), None);
    }

    #[test]
    fn serializes_the_presentation_contract() {
        let result = fcfs_result();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["algorithm"], "fcfs");
        assert!(json.get("quantum").is_none());
        assert_eq!(json["process_table"][1]["start"], 5);
        assert!(json["process_table"][0].get("priority").is_none());
        assert_eq!(json["running_process"]["5"], 2);
        assert_eq!(json["ready_queue"]["1"], serde_json::json!([2]));
        assert_eq!(json["completed"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["timeline"][2], serde_json::json!({"start": 8, "end": 10, "pid": null}));
        assert_eq!(result.makespan(), 11);
    }
}
