// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cfgchain` command-line entry point.

use anyhow::{Context, Result};
use cfgchain::adapters::{EnvironmentSource, MappingSource};
use cfgchain::cli::{print_table, Cli, Command, GetArgs, StartArgs, Verbosity};
use cfgchain::domain::ConfigMap;
use cfgchain::logging::init_logging;
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

const APP_NAME: &str = "cfgchain";
const APP_QUALIFIER: &str = "org";

#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    value: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let verbosity = if cli.is_dry_run() {
        Verbosity::Debug
    } else {
        cli.verbosity(EnvironmentSource::from_process(), &config)
            .context("Failed to resolve verbosity")?
    };
    init_logging(verbosity.as_filter());
    tracing::debug!("command-line args: {:?}", cli);

    match &cli.command {
        Command::Get(args) => get(args, &config),
        Command::Start(args) => {
            start(args);
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            tracing::info!("running status");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ConfigMap> {
    let source = match path {
        Some(path) => MappingSource::from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => MappingSource::from_default_location(APP_NAME, APP_QUALIFIER)
            .context("Failed to load default configuration file")?,
    };
    Ok(source.values().clone())
}

fn get(args: &GetArgs, config: &ConfigMap) -> Result<ExitCode> {
    let chain = args.chain(EnvironmentSource::from_process(), config);
    tracing::debug!("lookup chain: {:?}", chain);

    let mut entries = Vec::with_capacity(args.keys.len());
    let mut missing = false;
    for key in &args.keys {
        match chain
            .resolve(key)
            .with_context(|| format!("Failed to resolve '{}'", key))?
        {
            Some(value) => entries.push(Entry {
                key: key.as_str(),
                value: value.as_string(),
            }),
            None => {
                eprintln!("No value for '{}'", key);
                missing = true;
            }
        }
    }

    match (args.keys.len(), entries.as_slice()) {
        (1, [entry]) => println!("{}", entry.value),
        (_, []) => {}
        _ => print_table(&entries, &["key", "value"])?,
    }

    Ok(if missing {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn start(args: &StartArgs) {
    if args.dry_run {
        tracing::debug!("dry run, nothing will be started");
    }
    match args.duration {
        Some(seconds) => tracing::info!("running start for {} seconds", seconds),
        None => tracing::info!("running start"),
    }
}
