// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument surface of the `cfgchain` binary.

use crate::adapters::{ArgumentSource, CommandMountHook, EnvironmentSource};
use crate::cli::duration_in_seconds;
use crate::domain::{ConfigMap, ConfigValue, Result};
use crate::ports::MountHook;
use crate::service::Chain;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Key under which the verbosity is looked up in every source.
pub const VERBOSITY_KEY: &str = "CFGCHAIN_VERBOSE";

/// Resolve configuration values through a chain of sources
#[derive(Parser, Serialize, Debug)]
#[command(name = "cfgchain", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the verbosity level [default: error]
    #[arg(short, long, value_enum, global = true)]
    #[serde(rename = "CFGCHAIN_VERBOSE", skip_serializing_if = "Option::is_none")]
    pub verbose: Option<Verbosity>,

    /// Path to a YAML or JSON configuration file
    #[arg(short, long, global = true)]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    #[serde(skip)]
    pub command: Command,
}

impl Cli {
    /// Resolves the verbosity: flag, then environment, then configuration
    /// file, then `error`.
    pub fn verbosity(&self, env: EnvironmentSource, config: &ConfigMap) -> Result<Verbosity> {
        let chain = Chain::builder()
            .with_args(ArgumentSource::from_record(self)?)
            .then(env)
            .with_mapping(config.clone())
            .or_default(Verbosity::Error.as_filter());

        chain.require(VERBOSITY_KEY)?.parse(VERBOSITY_KEY)
    }

    /// Returns `true` if the command asked for a dry run.
    pub fn is_dry_run(&self) -> bool {
        matches!(&self.command, Command::Start(args) if args.dry_run)
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve one or more keys and print their values
    Get(GetArgs),

    /// Start the service
    Start(StartArgs),

    /// Show the service status
    Status,
}

/// Arguments of `cfgchain get`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct GetArgs {
    /// Keys to resolve
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Answer KEY with VALUE before any other source is consulted
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, String)>,

    /// JSON document consulted after the configuration file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// File whose whole contents answer any key still unresolved
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Command run when the JSON document or the file is missing, split on whitespace
    #[arg(long, value_name = "COMMAND")]
    pub mount: Option<String>,

    /// Value used when no source answers
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetArgs {
    /// Builds the lookup chain: overrides, environment, configuration file,
    /// JSON document, raw file, default.
    pub fn chain(&self, env: EnvironmentSource, config: &ConfigMap) -> Chain {
        let overrides: HashMap<String, ConfigValue> = self
            .overrides
            .iter()
            .map(|(k, v)| (k.clone(), ConfigValue::from(v.as_str())))
            .collect();

        let mut builder = Chain::builder()
            .with_args(ArgumentSource::from_values(overrides))
            .then(env)
            .with_mapping(config.clone());

        if let Some(path) = &self.json {
            builder = builder.with_json_file(path.clone(), self.mount_hook());
        }
        if let Some(path) = &self.file {
            builder = builder.with_file(path.clone(), self.mount_hook());
        }

        match &self.default {
            Some(value) => builder.or_default(value.as_str()),
            None => builder.build(),
        }
    }

    fn mount_hook(&self) -> Option<Box<dyn MountHook>> {
        let mut parts = self.mount.as_deref()?.split_whitespace();
        let program = parts.next()?;
        Some(Box::new(CommandMountHook::new(program, parts)))
    }
}

/// Arguments of `cfgchain start`.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct StartArgs {
    /// See what would happen without doing anything
    #[arg(long)]
    pub dry_run: bool,

    /// How long to run, e.g. 1m30s
    #[arg(long, value_parser = duration_in_seconds)]
    pub duration: Option<u64>,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

/// Logging verbosity levels accepted by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Everything, including every delegation in a chain
    Debug,
}

impl Verbosity {
    /// Returns the `tracing` filter directive for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// A verbosity name that is not one of `error`, `warn`, `info`, `debug`.
#[derive(Debug, Error)]
#[error("Unknown verbosity '{0}', expected one of error, warn, info, debug")]
pub struct UnknownVerbosity(pub String);

impl FromStr for Verbosity {
    type Err = UnknownVerbosity;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Verbosity::Error),
            "warn" | "warning" => Ok(Verbosity::Warn),
            "info" => Ok(Verbosity::Info),
            "debug" => Ok(Verbosity::Debug),
            _ => Err(UnknownVerbosity(s.to_string())),
        }
    }
}
