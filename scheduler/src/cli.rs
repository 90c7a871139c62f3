use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Simulate CPU scheduling algorithms over a fixed set of processes.
///
/// Processes come from a JSON request file, from repeated --process flags,
/// or both (flags override the file).
#[derive(Parser, Debug)]
#[command(name = "cpu-scheduler-sim", about = "Simulate CPU scheduling algorithms")]
pub struct CliArgs {
    /// JSON request file ("-" reads stdin)
    #[arg(long, env = "SCHED_INPUT")]
    pub input: Option<PathBuf>,

    /// fcfs, sjf, sjf_preemptive, rr, priority or priority_preemptive
    #[arg(long, env = "SCHED_ALGORITHM")]
    pub algorithm: Option<String>,

    /// Time quantum for round robin
    #[arg(long, env = "SCHED_QUANTUM", allow_negative_numbers = true)]
    pub quantum: Option<i64>,

    /// A process as ARRIVAL:BURST or ARRIVAL:BURST:PRIORITY (repeatable)
    #[arg(long = "process", value_name = "ARRIVAL:BURST[:PRIORITY]", allow_hyphen_values = true)]
    pub processes: Vec<String>,

    /// How to present the result
    #[arg(long, value_enum, default_value = "json", env = "SCHED_OUTPUT")]
    pub output: OutputFormat,

    /// Run every applicable algorithm and compare their averages
    #[arg(long)]
    pub compare: bool,

    /// Milliseconds per tick in the terminal viewer
    #[arg(long, default_value = "800", env = "SCHED_TICK_RATE_MS")]
    pub tick_rate_ms: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Tui,
}
