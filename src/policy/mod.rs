//! Scheduling policies.
//!
//! A policy decides, tick by tick, which process holds the processor and
//! applies one tick of service to it. Three policies are provided:
//!
//! - **FCFS**: non-preemptive, arrival order
//! - **SRTF**: preemptive shortest-remaining-time-first
//! - **Round-Robin**: FIFO queue with a fixed time quantum
//!
//! # Completion Convention
//! A process whose last unit of service is consumed on tick `t` is
//! observed as finished at the start of tick `t + 1`, after that tick's
//! arrivals. Its completion time is therefore `t + 1` under every policy.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

mod fcfs;
mod round_robin;
mod srtf;

pub use fcfs::Fcfs;
pub use round_robin::RoundRobin;
pub use srtf::Srtf;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::error::ConfigError;
use crate::models::{EventLog, ProcessId, ProcessTable, Tick};

/// What happened on the processor during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The process consumed one tick of service.
    Ran(ProcessId),
    /// Nothing was runnable.
    Idle,
}

/// A scheduling policy driven by the simulation loop.
///
/// The loop calls [`admit`](Policy::admit) for each arrival, then
/// [`tick`](Policy::tick) once per simulated tick, then
/// [`settle`](Policy::settle) once at the end of the run.
pub trait Policy: Send + Debug {
    /// Policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Makes a newly arrived process known to the policy.
    fn admit(&mut self, _id: ProcessId, _table: &ProcessTable) {}

    /// Decides who runs on tick `now` and applies one tick of service.
    ///
    /// Appends `Finished` and `Selected` events to `log`; the loop logs
    /// arrivals and idle ticks.
    fn tick(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) -> TickOutcome;

    /// Observes a completion that happened on the final tick of the run.
    fn settle(&mut self, end: Tick, table: &mut ProcessTable, log: &mut EventLog);

    /// Process currently holding the processor, if any.
    fn current(&self) -> Option<ProcessId>;
}

/// Closed set of available policies, resolved once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PolicyKind {
    /// First-Come First-Served (non-preemptive).
    Fcfs,
    /// Shortest-Remaining-Time-First (preemptive SJF).
    Srtf,
    /// Round-Robin with a fixed quantum.
    RoundRobin {
        /// Maximum consecutive ticks per dispatch.
        quantum: Tick,
    },
}

impl PolicyKind {
    pub fn fcfs() -> Self {
        Self::Fcfs
    }

    pub fn srtf() -> Self {
        Self::Srtf
    }

    pub fn round_robin(quantum: Tick) -> Self {
        Self::RoundRobin { quantum }
    }

    /// Resolves a policy selector (`fcfs`, `sjf`/`srtf`, `rr`).
    ///
    /// `quantum` is required for `rr` and ignored otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cpusched::policy::PolicyKind;
    /// use u_cpusched::error::ConfigError;
    ///
    /// assert_eq!(PolicyKind::from_name("rr", Some(2)), Ok(PolicyKind::round_robin(2)));
    /// assert_eq!(PolicyKind::from_name("rr", None), Err(ConfigError::MissingQuantum));
    /// assert_eq!(PolicyKind::from_name("SJF", None), Ok(PolicyKind::Srtf));
    /// ```
    pub fn from_name(name: &str, quantum: Option<Tick>) -> Result<Self, ConfigError> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Self::Fcfs,
            "sjf" | "srtf" => Self::Srtf,
            "rr" | "round-robin" | "round_robin" => {
                Self::RoundRobin {
                    quantum: quantum.ok_or(ConfigError::MissingQuantum)?,
                }
            }
            other => return Err(ConfigError::UnknownPolicy(other.to_string())),
        };
        kind.validate()?;
        Ok(kind)
    }

    /// Checks policy parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::RoundRobin { quantum: 0 } => Err(ConfigError::ZeroQuantum),
            _ => Ok(()),
        }
    }

    /// Whether the policy can take the processor away from a running process.
    pub fn is_preemptive(&self) -> bool {
        !matches!(self, Self::Fcfs)
    }

    /// Configured quantum (Round-Robin only).
    pub fn quantum(&self) -> Option<Tick> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Selector used in scenario files.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Srtf => "sjf",
            Self::RoundRobin { .. } => "rr",
        }
    }

    /// Builds a fresh policy instance for one run.
    pub fn instantiate(&self) -> Box<dyn Policy> {
        match *self {
            Self::Fcfs => Box::new(Fcfs::new()),
            Self::Srtf => Box::new(Srtf::new()),
            Self::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "First-Come First-Served"),
            Self::Srtf => write!(f, "Preemptive Shortest Job First"),
            Self::RoundRobin { quantum } => write!(f, "Round-Robin (quantum {quantum})"),
        }
    }
}
