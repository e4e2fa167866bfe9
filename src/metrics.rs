//! Per-process metrics and run-level KPIs.
//!
//! Derived from the final process records after the loop ends.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Wait | Ticks arrived but not running |
//! | Turnaround | completion - arrival |
//! | Response | first dispatch - arrival |
//! | Utilization | busy ticks / run length |
//! | Throughput | completed processes / run length |
//!
//! Averages cover completed processes only. A pending process reports
//! whatever partial state it has and is flagged with
//! [`ProcessStatus::Pending`] so renderers can set it apart.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{EventKind, Process, ProcessStatus, Tick};
use crate::simulation::SimulationOutcome;

/// Metrics of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub name: String,
    pub arrival: Tick,
    pub burst: Tick,
    /// Completed within the run, or still pending.
    pub status: ProcessStatus,
    /// Accumulated wait; may be under-counted for pending processes.
    pub wait_time: Tick,
    /// `None` if never dispatched.
    pub response_time: Option<Tick>,
    /// `None` unless completed.
    pub turnaround: Option<Tick>,
    /// `None` unless completed.
    pub completion_time: Option<Tick>,
    /// Service still owed when the run ended.
    pub remaining: Tick,
}

impl ProcessMetrics {
    pub fn from_process(process: &Process) -> Self {
        Self {
            name: process.name.clone(),
            arrival: process.arrival,
            burst: process.burst,
            status: process.status(),
            wait_time: process.wait_time,
            response_time: process.response_time,
            turnaround: process.turnaround,
            completion_time: process.completion_time,
            remaining: process.remaining,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProcessStatus::Completed
    }
}

/// Run-level performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Processes that completed within the run.
    pub completed: usize,
    /// Processes still pending at the end of the run.
    pub pending: usize,
    /// Mean wait over completed processes.
    pub avg_wait: f64,
    /// Mean turnaround over completed processes.
    pub avg_turnaround: f64,
    /// Mean response over completed processes.
    pub avg_response: f64,
    /// Latest completion time (0 if nothing completed).
    pub makespan: Tick,
    /// Ticks on which a process ran.
    pub busy_ticks: Tick,
    /// Ticks on which nothing was runnable.
    pub idle_ticks: Tick,
    /// busy / run length (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Number of dispatches (`selected` events).
    pub dispatches: usize,
}

/// Metrics for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Per-process metrics, in input order.
    pub processes: Vec<ProcessMetrics>,
    pub summary: MetricsSummary,
}

impl MetricsReport {
    /// Computes metrics from a finished run.
    pub fn calculate(outcome: &SimulationOutcome) -> Self {
        let processes: Vec<ProcessMetrics> = outcome
            .processes
            .iter()
            .map(ProcessMetrics::from_process)
            .collect();

        let mut completed = 0usize;
        let mut total_wait: Tick = 0;
        let mut total_turnaround: Tick = 0;
        let mut total_response: Tick = 0;
        let mut makespan: Tick = 0;

        for m in processes.iter().filter(|m| m.is_completed()) {
            completed += 1;
            total_wait += m.wait_time;
            total_turnaround += m.turnaround.unwrap_or(0);
            total_response += m.response_time.unwrap_or(0);
            makespan = makespan.max(m.completion_time.unwrap_or(0));
        }

        let mean = |total: Tick| {
            if completed == 0 {
                0.0
            } else {
                total as f64 / completed as f64
            }
        };

        let busy_ticks = outcome.busy_ticks();
        let run_time = outcome.run_time as f64;
        let summary = MetricsSummary {
            completed,
            pending: processes.len() - completed,
            avg_wait: mean(total_wait),
            avg_turnaround: mean(total_turnaround),
            avg_response: mean(total_response),
            makespan,
            busy_ticks,
            idle_ticks: outcome.idle_ticks(),
            cpu_utilization: if run_time > 0.0 {
                busy_ticks as f64 / run_time
            } else {
                0.0
            },
            throughput: if run_time > 0.0 {
                completed as f64 / run_time
            } else {
                0.0
            },
            dispatches: outcome.events.count(EventKind::Selected),
        };

        Self { processes, summary }
    }

    /// Completed processes, in input order.
    pub fn completed(&self) -> impl Iterator<Item = &ProcessMetrics> {
        self.processes.iter().filter(|m| m.is_completed())
    }

    /// Pending processes, in input order.
    pub fn pending(&self) -> impl Iterator<Item = &ProcessMetrics> {
        self.processes.iter().filter(|m| !m.is_completed())
    }

    pub fn get(&self, name: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.name == name)
    }
}
