//! CPU scheduling simulator.
//!
//! Simulates First-Come-First-Served, Shortest-Job-First (non-preemptive and
//! shortest-remaining-time), Round Robin and Priority (non-preemptive and
//! preemptive) scheduling over a fixed set of processes on one CPU, in
//! abstract integer ticks. Every run is a pure function of its input.

pub mod scheduler;

pub use scheduler::{
    compare, simulate, Algorithm, ComparisonEntry, Pid, ProcessSpec, ScheduleError, ScheduleResult,
    SimulationRequest, Ticks,
};
