use super::Pid;
use thiserror::Error;

/// Input rejected before any simulation runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("process list is empty")]
    EmptyProcessList,

    #[error("process {pid} has negative arrival time {arrival}")]
    NegativeArrival { pid: Pid, arrival: i64 },

    #[error("process {pid} has non-positive burst time {burst}")]
    NonPositiveBurst { pid: Pid, burst: i64 },

    #[error("round robin requires a time quantum")]
    MissingQuantum,

    #[error("time quantum must be at least 1, got {0}")]
    NonPositiveQuantum(i64),

    #[error("process {pid} has no priority, required by priority scheduling")]
    MissingPriority { pid: Pid },

    #[error("unknown algorithm '{0}' (expected one of fcfs, sjf, sjf_preemptive, rr, priority, priority_preemptive)")]
    UnknownAlgorithm(String),
}
