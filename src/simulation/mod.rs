//! Simulation loop and run configuration.
//!
//! The loop advances an integer clock one tick at a time, logs arrivals
//! and idle ticks, and delegates every scheduling decision to the policy
//! selected in [`SimulationConfig`].
//!
//! # Usage
//!
//! ```
//! use u_cpusched::models::Process;
//! use u_cpusched::simulation::{simulate, SimulationConfig};
//!
//! let processes = vec![Process::new("A", 0, 3), Process::new("B", 0, 3)];
//! let outcome = simulate(processes, &SimulationConfig::round_robin(6, 2)).unwrap();
//! assert!(outcome.all_completed());
//! ```

mod config;
mod engine;

pub use config::SimulationConfig;
pub use engine::{simulate, SimulationOutcome, Simulator};
