use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use serde::Serialize;

use crate::manifest::load_manifest;

/// Command-line interface for restmapper
///
/// Inspects route manifests and tries request paths against them.
#[derive(Parser, Debug)]
#[command(name = "restmapper", version)]
#[command(about = "URL template matching for REST route manifests", long_about = None)]
pub struct Cli {
    /// Log level (trace/debug/info/warn/error)
    #[arg(long, global = true, env = "RESTMAPPER_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every mapping a manifest registers
    Inspect {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Also print each segment's kind and compiled pattern
        #[arg(long, default_value_t = false)]
        segments: bool,
    },
    /// Match one request against a manifest and print the bindings
    Match {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// HTTP method of the request
        #[arg(long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /archive/2024-06-01
        #[arg(short, long)]
        path: String,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// What a command concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `match` found no mapping
    NoMatch,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    method: &'a str,
    path: &'a str,
    handler: &'a str,
    template: &'a str,
    bindings: BTreeMap<&'a str, &'a str>,
}

/// Run `cli`, writing human or JSON output to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    match &cli.command {
        Commands::Inspect { manifest, segments } => {
            let registry = load_manifest(manifest)?
                .build_registry()
                .with_context(|| format!("invalid route in {}", manifest.display()))?;
            registry.dump_routes(out, *segments)?;
            Ok(Outcome::Success)
        }
        Commands::Match {
            manifest,
            method,
            path,
            json,
        } => {
            let verb = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid HTTP method '{method}'"))?;
            let registry = load_manifest(manifest)?
                .build_registry()
                .with_context(|| format!("invalid route in {}", manifest.display()))?;

            let Some(matched) = registry.find(&verb, path) else {
                if *json {
                    writeln!(out, "null")?;
                } else {
                    writeln!(out, "no mapping for {verb} {path}")?;
                }
                return Ok(Outcome::NoMatch);
            };

            let report = MatchReport {
                method: verb.as_str(),
                path,
                handler: matched.handler().as_ref(),
                template: matched.mapping.template().as_str(),
                bindings: matched
                    .bindings
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect(),
            };
            if *json {
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                writeln!(
                    out,
                    "{} {} -> {} ({})",
                    report.method, report.path, report.handler, report.template
                )?;
                for (name, value) in &report.bindings {
                    writeln!(out, "    {name} = {value}")?;
                }
            }
            Ok(Outcome::Success)
        }
    }
}

/// Parse process arguments, initialize logging and run against stdout.
pub fn run_cli() -> anyhow::Result<Outcome> {
    let cli = Cli::parse();
    crate::telemetry::init_logging(&cli.log_level)?;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    execute(&cli, &mut lock)
}
