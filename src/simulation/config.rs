//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Tick;
use crate::policy::PolicyKind;

/// Parameters of one simulation run.
///
/// # Example
/// ```
/// use u_cpusched::simulation::SimulationConfig;
///
/// let config = SimulationConfig::round_robin(20, 2);
/// assert!(config.validate().is_ok());
/// assert!(SimulationConfig::fcfs(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total ticks to simulate (ticks `0..run_time`).
    pub run_time: Tick,
    /// Policy driving the run.
    #[serde(flatten)]
    pub policy: PolicyKind,
}

impl SimulationConfig {
    pub fn new(run_time: Tick, policy: PolicyKind) -> Self {
        Self { run_time, policy }
    }

    pub fn fcfs(run_time: Tick) -> Self {
        Self::new(run_time, PolicyKind::Fcfs)
    }

    pub fn srtf(run_time: Tick) -> Self {
        Self::new(run_time, PolicyKind::Srtf)
    }

    pub fn round_robin(run_time: Tick, quantum: Tick) -> Self {
        Self::new(run_time, PolicyKind::RoundRobin { quantum })
    }

    /// Checks run length and policy parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_time == 0 {
            return Err(ConfigError::ZeroRunTime);
        }
        self.policy.validate()
    }
}
