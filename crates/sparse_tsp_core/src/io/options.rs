use std::{env, path::Path};

use log::LevelFilter;

use crate::{Error, Result};

/// Runtime options for sparse tour solving.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Base random seed for initial tour shuffling.
    pub seed: u64,
    /// Number of independently seeded searches; the cheapest route wins.
    pub runs: usize,
    /// Sweep behavior of the tour optimizer.
    pub sweep_mode: SweepMode,
    /// Perturbation applied to each candidate index pair.
    pub move_op: MoveOperator,
    /// Multiple of the average edge length above which a route edge counts as an outlier.
    pub outlier_threshold: f64,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs and metrics. Empty means stderr.
    pub log_output: String,
    /// Optional input file path for the graph description. Empty means stdin.
    pub input: String,
    /// Optional output file path for the expanded route. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SweepMode {
    /// Exactly one pass over all index pairs.
    Single,
    /// Repeat passes until one yields no improvement.
    Converge,
}

impl SweepMode {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "single" => Ok(Self::Single),
            "converge" => Ok(Self::Converge),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --sweep-mode: {value} (expected single|converge)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveOperator {
    /// Exchange the tour elements at the two positions.
    Swap,
    /// Reverse the tour segment between the two positions.
    Reverse,
}

impl MoveOperator {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "swap" => Ok(Self::Swap),
            "reverse" => Ok(Self::Reverse),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --move-op: {value} (expected swap|reverse)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {value} (expected error|warn|info|debug|trace|off)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {value} (expected compact|pretty)"
            ))),
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            runs: 1,
            sweep_mode: SweepMode::Single,
            move_op: MoveOperator::Swap,
            outlier_threshold: 10.0,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "seed" => {
                    options.seed = parse_value::<u64>(&name, value)?;
                }
                "runs" => {
                    options.runs = parse_value::<usize>(&name, value)?;
                }
                "sweep-mode" => {
                    options.sweep_mode = SweepMode::parse(&require_value(&name, value)?)?;
                }
                "move-op" => {
                    options.move_op = MoveOperator::parse(&require_value(&name, value)?)?;
                }
                "outlier-threshold" => {
                    options.outlier_threshold = parse_value::<f64>(&name, value)?;
                }
                "log-level" => {
                    options.log_level = LogLevel::parse(&require_value(&name, value)?)?;
                }
                "log-format" => {
                    options.log_format = LogFormat::parse(&require_value(&name, value)?)?;
                }
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                "log-output" => {
                    options.log_output = require_value(&name, value)?;
                }
                "input" => {
                    options.input = require_value(&name, value)?;
                }
                "output" => {
                    options.output = require_value(&name, value)?;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  sparse-tsp [options] < graph.json\n\n",
            "Options:\n",
            "  --seed <u64>\n",
            "  --runs <usize>\n",
            "  --sweep-mode <single|converge>\n",
            "  --move-op <swap|reverse>\n",
            "  --outlier-threshold <f64>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  sparse-tsp --runs 8 --seed 7 < graph.json\n",
            "  sparse-tsp --sweep-mode=converge --move-op=reverse --input graph.json\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        path_option(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        path_option(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        path_option(&self.output)
    }
}

fn path_option(raw: &str) -> Option<&Path> {
    if raw.is_empty() {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn require_value(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn parse_value<T>(name: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = require_value(name, value)?;
    raw.parse::<T>()
        .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}

#[cfg(test)]
mod tests {
    use super::{LogLevel, MoveOperator, SolverOptions, SweepMode};

    #[test]
    fn defaults_match_observed_behavior() {
        let options = SolverOptions::default();
        assert_eq!(options.seed, 42);
        assert_eq!(options.runs, 1);
        assert_eq!(options.sweep_mode, SweepMode::Single);
        assert_eq!(options.move_op, MoveOperator::Swap);
    }

    #[test]
    fn parse_accepts_space_and_equals_value_forms() {
        let options = SolverOptions::parse_from_iter([
            "--seed",
            "7",
            "--runs=4",
            "--sweep-mode=converge",
            "--move-op",
            "reverse",
        ])
        .expect("parse args");

        assert_eq!(options.seed, 7);
        assert_eq!(options.runs, 4);
        assert_eq!(options.sweep_mode, SweepMode::Converge);
        assert_eq!(options.move_op, MoveOperator::Reverse);
    }

    #[test]
    fn parse_reads_io_and_log_paths() {
        let options = SolverOptions::parse_from_iter([
            "--input",
            "/tmp/graph.json",
            "--output=/tmp/route.txt",
            "--log-output",
            "/tmp/run.log",
            "--log-level",
            "debug",
        ])
        .expect("parse args");

        assert_eq!(
            options.input_path().expect("input path").to_str(),
            Some("/tmp/graph.json")
        );
        assert_eq!(
            options.output_path().expect("output path").to_str(),
            Some("/tmp/route.txt")
        );
        assert_eq!(
            options.log_output_path().expect("log path").to_str(),
            Some("/tmp/run.log")
        );
        assert_eq!(options.log_level, LogLevel::Debug);
    }

    #[test]
    fn empty_paths_mean_standard_streams() {
        let options = SolverOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());
    }

    #[test]
    fn no_log_timestamp_clears_flag() {
        let options =
            SolverOptions::parse_from_iter(["--no-log-timestamp"]).expect("parse args");
        assert!(!options.log_timestamp);
    }

    #[test]
    fn help_returns_usage_error() {
        let err = SolverOptions::parse_from_iter(["--help"]).expect_err("help short-circuits");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn unknown_option_is_rejected_with_usage() {
        let err = SolverOptions::parse_from_iter(["--bogus"]).expect_err("unknown option");
        assert!(err.to_string().contains("Unknown option: --bogus"));
    }

    #[test]
    fn invalid_enum_value_is_rejected() {
        let err =
            SolverOptions::parse_from_iter(["--sweep-mode", "thrice"]).expect_err("bad mode");
        assert!(err.to_string().contains("--sweep-mode"));
    }

    #[test]
    fn positional_argument_is_rejected() {
        let err = SolverOptions::parse_from_iter(["graph.json"]).expect_err("positional arg");
        assert!(err.to_string().contains("Unexpected argument"));
    }
}
