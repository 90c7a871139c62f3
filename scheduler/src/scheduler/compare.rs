use super::{simulate, Algorithm, ProcessSpec, ScheduleError, ScheduleResult, SimulationRequest, Ticks};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write;

/// Headline figures of one algorithm over a shared input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub algorithm: Algorithm,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub makespan: Ticks,
}

impl From<&ScheduleResult> for ComparisonEntry {
    fn from(result: &ScheduleResult) -> Self {
        Self {
            algorithm: result.algorithm,
            average_turnaround: result.average_turnaround,
            average_waiting: result.average_waiting,
            makespan: result.makespan(),
        }
    }
}

/// Simulates every algorithm the input supports, each run on its own worker.
///
/// Priority modes join only when every process has a priority, Round Robin
/// only when a quantum is given. Entries follow `Algorithm::ALL` order.
pub fn compare(
    processes: &[ProcessSpec],
    quantum: Option<i64>,
) -> Result<Vec<ComparisonEntry>, ScheduleError> {
    let prioritized = processes.iter().all(|spec| spec.priority.is_some());
    let algorithms: Vec<Algorithm> = Algorithm::ALL
        .into_iter()
        .filter(|algorithm| !algorithm.needs_priority() || prioritized)
        .filter(|algorithm| !algorithm.needs_quantum() || quantum.is_some())
        .collect();

    algorithms
        .par_iter()
        .map(|&algorithm| {
            let request = SimulationRequest {
                algorithm: algorithm.as_str().to_owned(),
                quantum,
                processes: processes.to_vec(),
            };
            simulate(&request).map(|result| ComparisonEntry::from(&result))
        })
        .collect()
}

/// Renders comparison entries as an aligned text table.
pub fn comparison_table(entries: &[ComparisonEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:>12} {:>12} {:>9}",
        "Algorithm", "Turnaround", "Waiting", "Makespan"
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<32} {:>12.2} {:>12.2} {:>9}",
            entry.algorithm.name(),
            entry.average_turnaround,
            entry.average_waiting,
            entry.makespan
        );
    }
    out
}
