use anyhow::{bail, Context, Result};
use cpu_scheduler_sim::{ProcessSpec, SimulationRequest};
use std::{fs, io::Read, path::Path, time::Duration};

use crate::cli::{CliArgs, OutputFormat};

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub request: SimulationRequest,
    pub output: OutputFormat,
    pub compare: bool,
    pub tick_rate: Duration,
    pub pretty: bool,
}

impl Config {
    /// Merges the request file (if any) with command-line overrides.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut request = match args.input.as_deref() {
            Some(path) => load_request(path)?,
            None => SimulationRequest::default(),
        };

        if let Some(algorithm) = args.algorithm {
            request.algorithm = algorithm;
        }
        if args.quantum.is_some() {
            request.quantum = args.quantum;
        }
        if !args.processes.is_empty() {
            request.processes = args
                .processes
                .iter()
                .map(|spec| parse_process(spec))
                .collect::<Result<_>>()?;
        }

        if request.algorithm.is_empty() && !args.compare {
            bail!("no algorithm given; pass --algorithm, --compare or an input file with \"algorithm\"");
        }

        Ok(Self {
            request,
            output: args.output,
            compare: args.compare,
            tick_rate: Duration::from_millis(args.tick_rate_ms.max(1)),
            pretty: args.pretty,
        })
    }
}

fn load_request(path: &Path) -> Result<SimulationRequest> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read request from stdin")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("invalid request in {}", path.display()))
}

/// Parses `ARRIVAL:BURST` or `ARRIVAL:BURST:PRIORITY`.
pub fn parse_process(spec: &str) -> Result<ProcessSpec> {
    let fields: Vec<&str> = spec.split(':').map(str::trim).collect();
    let number = |field: &str, name: &str| -> Result<i64> {
        field
            .parse()
            .with_context(|| format!("invalid {name} '{field}' in process '{spec}'"))
    };

    match *fields.as_slice() {
        [arrival, burst] => Ok(ProcessSpec::new(number(arrival, "arrival")?, number(burst, "burst")?)),
        [arrival, burst, priority] => Ok(ProcessSpec::with_priority(
            number(arrival, "arrival")?,
            number(burst, "burst")?,
            number(priority, "priority")?,
        )),
        _ => bail!("process '{spec}' must look like ARRIVAL:BURST or ARRIVAL:BURST:PRIORITY"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_process_specs() {
        assert_eq!(parse_process("0:5").unwrap(), ProcessSpec::new(0, 5));
        assert_eq!(parse_process("3:2:-1").unwrap(), ProcessSpec::with_priority(3, 2, -1));
        // Negative values pass through to validation
        assert_eq!(parse_process("-1:0").unwrap(), ProcessSpec::new(-1, 0));
        assert!(parse_process("1").is_err());
        assert!(parse_process("a:2").unwrap_err().to_string().contains("'a'"));
    }

    #[test]
    fn flags_build_a_request() {
        let args = CliArgs::parse_from([
            "cpu-scheduler-sim",
            "--algorithm",
            "rr",
            "--quantum",
            "2",
            "--process",
            "0:5",
            "--process",
            "1:4",
            "--output",
            "table",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.request.algorithm, "rr");
        assert_eq!(config.request.quantum, Some(2));
        assert_eq!(config.request.processes.len(), 2);
        assert_eq!(config.output, OutputFormat::Table);
        assert!(!config.compare);
    }

    #[test]
    fn missing_algorithm_is_an_error_unless_comparing() {
        let args = CliArgs::parse_from(["cpu-scheduler-sim", "--process", "0:1"]);
        assert!(Config::from_args(args).is_err());

        let args = CliArgs::parse_from(["cpu-scheduler-sim", "--compare", "--process", "0:1"]);
        assert!(Config::from_args(args).unwrap().compare);
    }
}
