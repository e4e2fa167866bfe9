//! Error types.
//!
//! Configuration and input problems are detected before a run starts and
//! surfaced immediately; a run never fails midway. A run that ends with
//! unfinished processes is not an error.

use thiserror::Error;

use crate::validation::ValidationError;

/// Invalid run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `run_time` must be at least one tick.
    #[error("run time must be a positive number of ticks")]
    ZeroRunTime,
    /// Round-Robin was requested without a quantum.
    #[error("round-robin requires a quantum")]
    MissingQuantum,
    /// Round-Robin quantum must be at least one tick.
    #[error("round-robin quantum must be a positive number of ticks")]
    ZeroQuantum,
    /// Policy name not recognised.
    #[error("unknown scheduling policy '{0}' (expected fcfs, sjf or rr)")]
    UnknownPolicy(String),
}

/// Why [`simulate`](crate::simulation::simulate) refused to run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// One or more process records violate the input preconditions.
    #[error("invalid process list: {}", summarize(.0))]
    InvalidProcesses(Vec<ValidationError>),
}

/// Errors raised while reading a scenario description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: unknown directive '{directive}'")]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: expected {expected}")]
    Malformed { line: usize, expected: &'static str },

    #[error("line {line}: '{value}' is not a valid {field}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("missing required directive '{0}'")]
    MissingDirective(&'static str),

    #[error("line {line}: {source}")]
    Config {
        line: usize,
        #[source]
        source: ConfigError,
    },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
