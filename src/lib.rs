//! Discrete-time CPU scheduling simulator.
//!
//! Simulates a single processor serving a fixed set of processes under a
//! chosen policy, one integer tick at a time, and records what happened.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessTable`, `Event`, `EventLog`
//! - **`policy`**: Scheduling policies: FCFS, preemptive SRTF, Round-Robin
//! - **`simulation`**: Run configuration and the tick-driven loop
//! - **`metrics`**: Per-process metrics and run-level KPIs
//! - **`validation`**: Input integrity checks (names, bursts, stale records)
//! - **`input`**: Parser for the line-oriented scenario format
//! - **`report`**: Text table and JSON rendering of a run
//! - **`workload`**: Seeded random workload generation
//!
//! # Example
//!
//! ```
//! use u_cpusched::{simulate, Process, SimulationConfig};
//!
//! let processes = vec![Process::new("A", 0, 3), Process::new("B", 1, 2)];
//! let outcome = simulate(processes, &SimulationConfig::fcfs(6)).unwrap();
//! let metrics = outcome.metrics();
//!
//! assert_eq!(metrics.summary.completed, 2);
//! assert_eq!(metrics.get("B").unwrap().wait_time, 2);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod error;
pub mod input;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod report;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use error::{ConfigError, ParseError, SimulationError};
pub use input::{parse_scenario, Scenario};
pub use metrics::{MetricsReport, MetricsSummary, ProcessMetrics};
pub use models::{Event, EventKind, EventLog, Process, ProcessId, ProcessStatus, Tick};
pub use policy::PolicyKind;
pub use simulation::{simulate, SimulationConfig, SimulationOutcome, Simulator};
