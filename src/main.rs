//! Command-line front end.
//!
//! ```text
//! u-cpusched <scenario.in> [--json]
//! u-cpusched --random <seed> <policy> <run_time> [quantum] [--json]
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=u_cpusched=debug`) to trace the run on
//! stderr.

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::{env, fs};

use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_cpusched::report::{JsonReport, TextReport};
use u_cpusched::workload::WorkloadGenerator;
use u_cpusched::{
    parse_scenario, simulate, ConfigError, ParseError, PolicyKind, SimulationConfig,
    SimulationError, SimulationOutcome, Tick,
};

const USAGE: &str = "\
usage: u-cpusched <scenario.in> [--json]
       u-cpusched --random <seed> <fcfs|sjf|rr> <run_time> [quantum] [--json]";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),

    #[error("invalid {name} '{value}'")]
    InvalidArgument { name: &'static str, value: String },

    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Scenario {
        path: PathBuf,
        json: bool,
    },
    Random {
        seed: u64,
        config: SimulationConfig,
        json: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args).and_then(execute) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--json")
        .collect();

    match positional.as_slice() {
        [] => Err(CliError::Usage("missing scenario file".into())),
        ["-h" | "--help"] => Ok(Command::Help),
        ["--random", rest @ ..] => parse_random(rest, json),
        [flag, ..] if flag.starts_with("--") => {
            Err(CliError::Usage(format!("unknown option '{flag}'")))
        }
        [path] => Ok(Command::Scenario {
            path: PathBuf::from(*path),
            json,
        }),
        _ => Err(CliError::Usage("expected a single scenario file".into())),
    }
}

fn parse_random(args: &[&str], json: bool) -> Result<Command, CliError> {
    let (seed, policy, run_time, quantum) = match args {
        [seed, policy, run_time] => (seed, policy, run_time, None),
        [seed, policy, run_time, quantum] => (seed, policy, run_time, Some(quantum)),
        _ => {
            return Err(CliError::Usage(
                "--random takes <seed> <policy> <run_time> [quantum]".into(),
            ))
        }
    };

    let seed = number(seed, "seed")?;
    let run_time: Tick = number(run_time, "run time")?;
    let quantum = quantum.map(|q| number(q, "quantum")).transpose()?;
    let config = SimulationConfig::new(run_time, PolicyKind::from_name(policy, quantum)?);
    config.validate()?;

    Ok(Command::Random { seed, config, json })
}

fn number<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

fn execute(command: Command) -> Result<String, CliError> {
    match command {
        Command::Help => Ok(format!("{USAGE}\n")),
        Command::Scenario { path, json } => {
            let text = fs::read_to_string(&path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            let scenario =
                parse_scenario(&text).map_err(|source| CliError::Parse { path, source })?;
            debug!(processes = scenario.processes.len(), "scenario loaded");
            render(&scenario.run()?, json)
        }
        Command::Random { seed, config, json } => {
            let processes = WorkloadGenerator::new(seed)
                .with_horizon(config.run_time)
                .generate();
            info!(seed, processes = processes.len(), "generated workload");
            render(&simulate(processes, &config)?, json)
        }
    }
}

fn render(outcome: &SimulationOutcome, json: bool) -> Result<String, CliError> {
    if json {
        let mut text = JsonReport::new(outcome).to_json()?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(TextReport::new(outcome).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_scenario_args() {
        assert_eq!(
            parse_args(&args(&["demo.in", "--json"])).unwrap(),
            Command::Scenario {
                path: PathBuf::from("demo.in"),
                json: true
            }
        );
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_random_args() {
        assert_eq!(
            parse_args(&args(&["--random", "7", "rr", "20", "3"])).unwrap(),
            Command::Random {
                seed: 7,
                config: SimulationConfig::round_robin(20, 3),
                json: false
            }
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(&[]), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(&args(&["--verbose"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&args(&["a.in", "b.in"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&args(&["--random", "x", "fcfs", "5"])),
            Err(CliError::InvalidArgument { name: "seed", .. })
        ));
        assert!(matches!(
            parse_args(&args(&["--random", "1", "rr", "5"])),
            Err(CliError::Config(ConfigError::MissingQuantum))
        ));
        assert!(matches!(
            parse_args(&args(&["--random", "1", "fcfs", "0"])),
            Err(CliError::Config(ConfigError::ZeroRunTime))
        ));
    }

    #[test]
    fn test_execute_random_is_deterministic() {
        let command = || Command::Random {
            seed: 3,
            config: SimulationConfig::srtf(30),
            json: true,
        };
        let first = execute(command()).unwrap();
        assert_eq!(first, execute(command()).unwrap());
        assert!(first.contains("\"events\""));
    }

    #[test]
    fn test_execute_missing_file() {
        let err = execute(Command::Scenario {
            path: PathBuf::from("/nonexistent/scenario.in"),
            json: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
