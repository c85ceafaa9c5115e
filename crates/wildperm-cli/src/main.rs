//! Wildperm CLI
//!
//! Checks requested permissions against the permissions a subject holds.
//!
//! # Usage
//!
//! ```bash
//! wildperm --grant 'files.read.*' --grant files.write.reports files.read.reports
//! wildperm --grants-file grants.json --mode has-any 'files.write.*'
//! ```
//!
//! Exits with status 0 when every request is granted and 1 otherwise.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::{debug, info};
use wildperm::{PermissionFactory, PermissionOptions, PermissionSet};

#[derive(Parser, Debug)]
#[command(name = "wildperm")]
#[command(about = "Check requested permissions against held permissions")]
struct Args {
    /// A permission held by the subject (repeatable)
    #[arg(short, long = "grant")]
    grants: Vec<String>,

    /// JSON file listing held permissions
    #[arg(long)]
    grants_file: Option<PathBuf>,

    /// Segment delimiter (overrides the grants file)
    #[arg(long)]
    delimiter: Option<String>,

    /// Wildcard token (overrides the grants file)
    #[arg(long)]
    wildcard: Option<String>,

    /// Prefix added to every held permission (overrides the grants file)
    #[arg(long)]
    prefix: Option<String>,

    /// How requests are checked
    #[arg(long, value_enum, default_value_t = Mode::Grants)]
    mode: Mode,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Requested permissions
    #[arg(required = true)]
    requests: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Each request must be granted by some held permission.
    Grants,
    /// The held permissions must grant at least one of the requests.
    GrantsAny,
    /// Each request is a pattern; some held permission must fall under it.
    HasAny,
}

/// The contents of a `--grants-file`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GrantsFile {
    options: Option<PermissionOptions>,
    prefix: String,
    grants: Vec<GrantEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GrantEntry {
    Name(String),
    Described {
        name: String,
        description: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let filter = if args.verbose {
        "wildperm=trace"
    } else {
        "wildperm=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let file = match &args.grants_file {
        Some(path) => load_grants_file(path)?,
        None => GrantsFile::default(),
    };
    let factory = build_factory(&args, &file)?;
    let held = held_permissions(&factory, &args.grants, &file.grants);
    info!("Loaded {} held permissions", held.len());

    let results = evaluate(&held, &factory, args.mode, &args.requests);
    for (request, granted) in &results {
        println!("{}: {}", request, if *granted { "granted" } else { "denied" });
    }

    if results.iter().all(|(_, granted)| *granted) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn load_grants_file(path: &Path) -> Result<GrantsFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read grants file {}", path.display()))?;
    parse_grants_file(&contents)
        .with_context(|| format!("failed to parse grants file {}", path.display()))
}

fn parse_grants_file(contents: &str) -> Result<GrantsFile> {
    Ok(serde_json::from_str(contents)?)
}

/// Combines command-line flags with the grants file; flags win.
fn build_factory(args: &Args, file: &GrantsFile) -> Result<PermissionFactory> {
    let base = file.options.clone().unwrap_or_default();
    let options = PermissionOptions::new(
        args.delimiter.as_deref().unwrap_or(base.delimiter()),
        args.wildcard.as_deref().unwrap_or(base.wildcard()),
    )
    .context("invalid delimiter or wildcard")?;
    let prefix = args.prefix.as_deref().unwrap_or(&file.prefix);

    let factory = PermissionFactory::new()
        .with_options(options)
        .with_prefix(prefix);
    debug!("Using {}", factory);
    Ok(factory)
}

fn held_permissions(
    factory: &PermissionFactory,
    grants: &[String],
    entries: &[GrantEntry],
) -> PermissionSet {
    let mut held = factory.create_set(grants);
    held.extend(entries.iter().map(|entry| match entry {
        GrantEntry::Name(name) => factory.create_permission(name),
        GrantEntry::Described {
            name,
            description: Some(description),
        } => factory.create_described(name, description.as_str()),
        GrantEntry::Described {
            name,
            description: None,
        } => factory.create_permission(name),
    }));
    held
}

/// Evaluates requests, returning one `(label, granted)` pair per output line.
///
/// Requests are full names; the factory prefix applies only to held permissions.
fn evaluate(
    held: &PermissionSet,
    factory: &PermissionFactory,
    mode: Mode,
    requests: &[String],
) -> Vec<(String, bool)> {
    match mode {
        Mode::Grants => requests
            .iter()
            .map(|request| (request.clone(), held.grants_permission(request)))
            .collect(),
        Mode::HasAny => requests
            .iter()
            .map(|request| (request.clone(), held.has_any_permission(request)))
            .collect(),
        Mode::GrantsAny => {
            let requested = PermissionFactory::new()
                .with_options(factory.options().clone())
                .create_set(requests);
            vec![(requests.join(", "), held.grants_any_permission(&requested))]
        }
    }
}
