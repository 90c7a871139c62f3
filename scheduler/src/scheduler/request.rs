use super::{Algorithm, Pid, Policy, Priority, Process, ScheduleError, Ticks};
use serde::{Deserialize, Serialize};

/// One process as submitted by a caller. Fields are signed so that negative
/// input reaches validation instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival: i64,
    pub burst: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ProcessSpec {
    pub fn new(arrival: i64, burst: i64) -> Self {
        Self {
            arrival,
            burst,
            priority: None,
        }
    }

    pub fn with_priority(arrival: i64, burst: i64, priority: Priority) -> Self {
        Self {
            arrival,
            burst,
            priority: Some(priority),
        }
    }
}

/// A single simulation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
    pub processes: Vec<ProcessSpec>,
}

impl SimulationRequest {
    pub fn new(algorithm: Algorithm, processes: Vec<ProcessSpec>) -> Self {
        Self {
            algorithm: algorithm.as_str().to_owned(),
            quantum: None,
            processes,
        }
    }

    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Checks every field and builds the fresh process set, pids in input order.
    pub fn validate(&self) -> Result<(Policy, Vec<Process>), ScheduleError> {
        let algorithm: Algorithm = self.algorithm.parse()?;

        if self.processes.is_empty() {
            return Err(ScheduleError::EmptyProcessList);
        }

        let mut processes = Vec::with_capacity(self.processes.len());
        for (pid, spec) in (1..).zip(&self.processes) {
            processes.push(spec.to_process(pid, algorithm)?);
        }

        let policy = match algorithm {
            Algorithm::Fcfs => Policy::Fcfs,
            Algorithm::Sjf => Policy::Sjf,
            Algorithm::SjfPreemptive => Policy::SjfPreemptive,
            Algorithm::RoundRobin => Policy::RoundRobin {
                quantum: validate_quantum(self.quantum)?,
            },
            Algorithm::Priority => Policy::Priority,
            Algorithm::PriorityPreemptive => Policy::PriorityPreemptive,
        };

        Ok((policy, processes))
    }
}

impl ProcessSpec {
    fn to_process(&self, pid: Pid, algorithm: Algorithm) -> Result<Process, ScheduleError> {
        if self.arrival < 0 {
            return Err(ScheduleError::NegativeArrival {
                pid,
                arrival: self.arrival,
            });
        }
        if self.burst <= 0 {
            return Err(ScheduleError::NonPositiveBurst {
                pid,
                burst: self.burst,
            });
        }
        if algorithm.needs_priority() && self.priority.is_none() {
            return Err(ScheduleError::MissingPriority { pid });
        }

        Ok(Process::with_priority(
            pid,
            self.arrival as Ticks,
            self.burst as Ticks,
            self.priority,
        ))
    }
}

fn validate_quantum(quantum: Option<i64>) -> Result<Ticks, ScheduleError> {
    match quantum {
        None => Err(ScheduleError::MissingQuantum),
        Some(quantum) if quantum <= 0 => Err(ScheduleError::NonPositiveQuantum(quantum)),
        Some(quantum) => Ok(quantum as Ticks),
    }
}
