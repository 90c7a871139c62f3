mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cpu_scheduler_sim::scheduler::{comparison_table, plain_table, ScheduleRunner};
use cpu_scheduler_sim::{compare, simulate};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use serde::Serialize;
use std::io;
use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::Config;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_args(CliArgs::parse())?;
    debug!(?config, "configuration loaded");

    if config.compare {
        let entries = compare(&config.request.processes, config.request.quantum)?;
        info!(algorithms = entries.len(), "comparison finished");
        match config.output {
            OutputFormat::Json => print_json(&entries, config.pretty)?,
            OutputFormat::Table | OutputFormat::Tui => print!("{}", comparison_table(&entries)),
        }
        return Ok(());
    }

    let result = simulate(&config.request)?;
    match config.output {
        OutputFormat::Json => print_json(&result, config.pretty)?,
        OutputFormat::Table => print!("{}", plain_table(&result)),
        OutputFormat::Tui => {
            execute!(io::stdout(), Clear(ClearType::All))?;

            let mut runner = ScheduleRunner::new(&result, config.tick_rate)
                .context("failed to set up the terminal")?;
            while runner.run()? {}
            drop(runner);

            execute!(io::stdout(), Clear(ClearType::All))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
