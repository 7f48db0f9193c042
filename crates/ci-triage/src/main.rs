//! ci-triage — offline replay and debugging for triage decisions.
//!
//! Reads JSON from a file (or `-` for stdin), writes JSON to stdout. Logs go
//! to stderr so stdout stays machine-readable.

use anyhow::{Context, Result};
use ci_triage::{
    build_signature, plan, CiRunObservation, SignatureVersion, TriageConfig, TriageContext,
    TriageRecord,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the next action for an observation + context request
    Plan {
        /// Path to a JSON `{ "observation": ..., "context": ... }`, or `-`
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Compute the failure signature of an observation
    Signature {
        /// Path to a JSON observation, or `-`
        #[arg(long, short)]
        input: PathBuf,
        /// Signature algorithm (defaults to CI_TRIAGE_SIGNATURE_VERSION, then 3)
        #[arg(long)]
        version: Option<u8>,
    },
    /// Decode a persisted triage record
    Replay {
        /// Path to a JSON record, or `-`
        #[arg(long, short)]
        input: PathBuf,
    },
}

/// Input for `plan`.
#[derive(Debug, Serialize, Deserialize)]
struct TriageRequest {
    observation: CiRunObservation,
    context: TriageContext,
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn load_request(path: &Path) -> Result<TriageRequest> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid triage request in {}", path.display()))
}

fn load_observation(path: &Path) -> Result<CiRunObservation> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid observation in {}", path.display()))
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Plan { input } => {
            let request = load_request(&input)?;
            let plan = plan(&request.observation, &request.context)?;
            Ok(serde_json::to_string_pretty(&plan)?)
        }
        Command::Signature { input, version } => {
            let observation = load_observation(&input)?;
            let version = match version {
                Some(v) => SignatureVersion::try_from(v)?,
                None => TriageConfig::from_env()?.signature_version,
            };
            let signature = build_signature(&observation, version);
            info!(signature = %signature, failures = observation.failures.len(), "computed signature");
            Ok(serde_json::to_string_pretty(&signature)?)
        }
        Command::Replay { input } => {
            let raw = read_input(&input)?;
            let record = TriageRecord::from_json(&raw)
                .with_context(|| format!("Invalid triage record in {}", input.display()))?;
            Ok(serde_json::to_string_pretty(&record.decision())?)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = run(args.command)?;
    println!("{output}");
    Ok(())
}
