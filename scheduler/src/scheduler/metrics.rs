use super::{Process, ProcessRow};
use average::Estimate;

/// Per-process turnaround/waiting rows and their means.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub rows: Vec<ProcessRow>,
    pub average_turnaround: f64,
    pub average_waiting: f64,
}

/// Derives the process table from completed processes, ordered by pid.
pub fn aggregate(processes: &[Process]) -> Metrics {
    let mut rows: Vec<ProcessRow> = processes.iter().filter_map(ProcessRow::from_process).collect();
    debug_assert_eq!(rows.len(), processes.len(), "every process must complete");
    rows.sort_by_key(|row| row.pid);

    let average_turnaround = mean(rows.iter().map(|row| row.turnaround as f64));
    let average_waiting = mean(rows.iter().map(|row| row.waiting as f64));

    Metrics {
        rows,
        average_turnaround,
        average_waiting,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    values.collect::<average::Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_all_processes() {
        let mut first = Process::new(1, 0, 5);
        first.run_for(0, 5);
        let mut second = Process::new(2, 1, 3);
        second.run_for(5, 3);

        let metrics = aggregate(&[second, first]);

        assert_eq!(metrics.rows[0].pid, 1);
        assert_eq!(metrics.rows[1].turnaround, 7);
        assert_eq!(metrics.rows[1].waiting, 4);
        assert_eq!(metrics.average_turnaround, 6.0);
        assert_eq!(metrics.average_waiting, 2.0);
    }
}
