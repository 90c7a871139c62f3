mod compare;
mod display;
mod error;
mod fcfs;
mod metrics;
mod priority;
mod process;
mod request;
mod result;
mod round_robin;
mod runner;
mod selection;
mod sjf;
mod trace;

#[cfg(test)]
mod testing;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::info;

pub use compare::{compare, comparison_table, ComparisonEntry};
pub use display::{plain_table, DisplayTerminal};
pub use error::ScheduleError;
pub use fcfs::FirstComeFirstServed;
pub use metrics::{aggregate, Metrics};
pub use priority::{PreemptivePriorityScheduler, PriorityScheduler};
pub use process::Process;
pub use request::{ProcessSpec, SimulationRequest};
pub use result::{ProcessRow, ProcessState, ScheduleResult, Snapshot};
pub use round_robin::RoundRobinScheduler;
pub use runner::{RunnerEvent, ScheduleRunner};
pub use sjf::{ShortestJobFirst, ShortestRemainingTimeFirst};
pub use trace::{GanttSegment, Trace, TraceRecorder};

/// One abstract unit of CPU time.
pub type Ticks = u64;
/// 1-based position of a process in the input.
pub type Pid = u32;
/// Lower value = dispatched earlier.
pub type Priority = i64;

/// An algorithm driver. Each driver consumes a fresh process set and records
/// its decisions into the trace; it never fails once the input is validated.
pub trait Scheduler {
    const NAME: &'static str;
    const ALGORITHM: Algorithm;

    fn schedule(&self, processes: &mut [Process], recorder: &mut TraceRecorder);

    fn quantum(&self) -> Option<Ticks> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    SjfPreemptive,
    #[serde(rename = "rr")]
    RoundRobin,
    Priority,
    PriorityPreemptive,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::SjfPreemptive,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::PriorityPreemptive,
    ];

    /// The wire name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::SjfPreemptive => "sjf_preemptive",
            Algorithm::RoundRobin => "rr",
            Algorithm::Priority => "priority",
            Algorithm::PriorityPreemptive => "priority_preemptive",
        }
    }

    /// Human-readable driver name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => FirstComeFirstServed::NAME,
            Algorithm::Sjf => ShortestJobFirst::NAME,
            Algorithm::SjfPreemptive => ShortestRemainingTimeFirst::NAME,
            Algorithm::RoundRobin => RoundRobinScheduler::NAME,
            Algorithm::Priority => PriorityScheduler::NAME,
            Algorithm::PriorityPreemptive => PreemptivePriorityScheduler::NAME,
        }
    }

    pub fn needs_quantum(self) -> bool {
        self == Algorithm::RoundRobin
    }

    pub fn needs_priority(self) -> bool {
        matches!(self, Algorithm::Priority | Algorithm::PriorityPreemptive)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ScheduleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == name)
            .ok_or_else(|| ScheduleError::UnknownAlgorithm(name.to_owned()))
    }
}

/// A validated algorithm selection with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    SjfPreemptive,
    RoundRobin { quantum: Ticks },
    Priority,
    PriorityPreemptive,
}

impl Policy {
    pub fn algorithm(self) -> Algorithm {
        match self {
            Policy::Fcfs => Algorithm::Fcfs,
            Policy::Sjf => Algorithm::Sjf,
            Policy::SjfPreemptive => Algorithm::SjfPreemptive,
            Policy::RoundRobin { .. } => Algorithm::RoundRobin,
            Policy::Priority => Algorithm::Priority,
            Policy::PriorityPreemptive => Algorithm::PriorityPreemptive,
        }
    }
}

/// Runs one driver over its own process set and assembles the result.
pub fn drive<S: Scheduler>(scheduler: &S, mut processes: Vec<Process>) -> ScheduleResult {
    let mut recorder = TraceRecorder::new();
    scheduler.schedule(&mut processes, &mut recorder);
    ScheduleResult::assemble(S::ALGORITHM, scheduler.quantum(), &processes, recorder.finish())
}

/// Validates `request` and simulates it with the selected algorithm.
pub fn simulate(request: &SimulationRequest) -> Result<ScheduleResult, ScheduleError> {
    let (policy, processes) = request.validate()?;
    let count = processes.len();

    let result = match policy {
        Policy::Fcfs => drive(&FirstComeFirstServed, processes),
        Policy::Sjf => drive(&ShortestJobFirst, processes),
        Policy::SjfPreemptive => drive(&ShortestRemainingTimeFirst, processes),
        Policy::RoundRobin { quantum } => drive(&RoundRobinScheduler::new(quantum), processes),
        Policy::Priority => drive(&PriorityScheduler, processes),
        Policy::PriorityPreemptive => drive(&PreemptivePriorityScheduler, processes),
    };

    info!(
        algorithm = %result.algorithm,
        processes = count,
        makespan = result.makespan(),
        average_turnaround = result.average_turnaround,
        average_waiting = result.average_waiting,
        "simulation finished"
    );
    Ok(result)
}
