//! Scenario description parser.
//!
//! Reads the line-oriented scenario format used in operating-systems
//! coursework:
//!
//! ```text
//! processcount 2      # number of processes
//! runfor 10           # ticks to simulate
//! use rr              # fcfs | sjf | rr
//! quantum 2           # rr only
//! process name A arrival 0 burst 5
//! process name B arrival 1 burst 3
//! end
//! ```
//!
//! `#` starts a comment. Directives may appear in any order; parsing stops
//! at `end` (or at the end of input).

use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::error::{ParseError, SimulationError};
use crate::models::{Process, Tick};
use crate::policy::PolicyKind;
use crate::simulation::{simulate, SimulationConfig, SimulationOutcome};

/// A parsed scenario: the process list plus the run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Processes in file order.
    pub processes: Vec<Process>,
    /// Run length and policy.
    pub config: SimulationConfig,
    /// Value of the `processcount` directive, if present.
    pub declared_count: Option<usize>,
}

impl Scenario {
    /// Runs the scenario on a fresh copy of its processes.
    pub fn run(&self) -> Result<SimulationOutcome, SimulationError> {
        simulate(self.processes.clone(), &self.config)
    }
}

impl FromStr for Scenario {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_scenario(text)
    }
}

/// Parses a scenario description.
///
/// # Example
/// ```
/// use u_cpusched::input::parse_scenario;
/// use u_cpusched::policy::PolicyKind;
///
/// let text = "processcount 1\nrunfor 5\nuse fcfs\nprocess name A arrival 0 burst 2\nend\n";
/// let scenario = parse_scenario(text).unwrap();
/// assert_eq!(scenario.config.run_time, 5);
/// assert_eq!(scenario.config.policy, PolicyKind::Fcfs);
/// assert_eq!(scenario.processes[0].burst, 2);
/// ```
pub fn parse_scenario(text: &str) -> Result<Scenario, ParseError> {
    let mut declared_count = None;
    let mut run_for: Option<(usize, Tick)> = None;
    let mut policy_name: Option<(usize, String)> = None;
    let mut quantum = None;
    let mut processes = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut tokens = content.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();

        match directive.to_ascii_lowercase().as_str() {
            "end" => break,
            "processcount" => {
                let value = single_arg(&args, line, "a process count")?;
                declared_count = Some(parse_number::<usize>(value, line, "process count")?);
            }
            "runfor" => {
                let value = single_arg(&args, line, "a run length")?;
                run_for = Some((line, parse_number(value, line, "run length")?));
            }
            "use" => {
                let value = single_arg(&args, line, "a policy name")?;
                policy_name = Some((line, value.to_string()));
            }
            "quantum" => {
                let value = single_arg(&args, line, "a quantum")?;
                quantum = Some(parse_number(value, line, "quantum")?);
            }
            "process" => processes.push(parse_process(&args, line)?),
            other => {
                return Err(ParseError::UnknownDirective {
                    line,
                    directive: other.to_string(),
                })
            }
        }
    }

    let (run_line, run_time) = run_for.ok_or(ParseError::MissingDirective("runfor"))?;
    let (use_line, name) = policy_name.ok_or(ParseError::MissingDirective("use"))?;

    let policy = PolicyKind::from_name(&name, quantum).map_err(|source| ParseError::Config {
        line: use_line,
        source,
    })?;
    let config = SimulationConfig::new(run_time, policy);
    config.validate().map_err(|source| ParseError::Config {
        line: run_line,
        source,
    })?;

    if let Some(count) = declared_count {
        if count != processes.len() {
            warn!(
                declared = count,
                found = processes.len(),
                "processcount does not match the number of process lines"
            );
        }
    }

    Ok(Scenario {
        processes,
        config,
        declared_count,
    })
}

fn single_arg<'a>(args: &[&'a str], line: usize, expected: &'static str) -> Result<&'a str, ParseError> {
    match args {
        [value] => Ok(*value),
        _ => Err(ParseError::Malformed { line, expected }),
    }
}

fn parse_number<T: FromStr>(value: &str, line: usize, field: &'static str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Parses `name X arrival N burst N` (pairs in any order).
fn parse_process(args: &[&str], line: usize) -> Result<Process, ParseError> {
    const EXPECTED: &str = "'process name <name> arrival <tick> burst <ticks>'";

    let mut name = None;
    let mut arrival = None;
    let mut burst = None;

    for pair in args.chunks(2) {
        let [key, value] = pair else {
            return Err(ParseError::Malformed {
                line,
                expected: EXPECTED,
            });
        };
        match key.to_ascii_lowercase().as_str() {
            "name" => name = Some(value.to_string()),
            "arrival" => arrival = Some(parse_number(value, line, "arrival time")?),
            "burst" => burst = Some(parse_number(value, line, "burst time")?),
            _ => {
                return Err(ParseError::Malformed {
                    line,
                    expected: EXPECTED,
                })
            }
        }
    }

    match (name, arrival, burst) {
        (Some(name), Some(arrival), Some(burst)) => Ok(Process::new(name, arrival, burst)),
        _ => Err(ParseError::Malformed {
            line,
            expected: EXPECTED,
        }),
    }
}
