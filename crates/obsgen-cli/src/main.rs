//! `obsgen` command line.
//!
//! Reads a host-exported manifest, runs generation, and writes each unit
//! into an output directory. Logging goes to stderr and honours `RUST_LOG`
//! unless `-v` or `--log-level` is given.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use obsgen_build::{generate, markers, unit::GeneratedUnit};
use obsgen_config::{CONFIG_FILE_NAME, ObsgenConfig};
use obsgen_schema::manifest::Manifest;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "obsgen", version, about = "Generate observable wrappers for .NET events")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log filter directive, e.g. `obsgen_build=debug`
    #[arg(long, global = true, env = "OBSGEN_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate wrapper units from a manifest.
    Generate {
        /// JSON manifest exported by the host.
        #[arg(long)]
        manifest: PathBuf,

        /// Directory the units are written to.
        #[arg(long)]
        out_dir: PathBuf,

        /// Config file (default: `obsgen.toml` next to the manifest, if present).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fail instead of writing when a unit on disk is missing or stale.
        #[arg(long)]
        check: bool,
    },

    /// Write the marker declarations the host compiles in.
    Markers {
        #[arg(long)]
        out_dir: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_level.as_deref());

    match cli.command {
        Command::Generate {
            manifest,
            out_dir,
            config,
            check,
        } => run_generate(&manifest, &out_dir, config.as_deref(), check),
        Command::Markers { out_dir, config } => {
            let config = load_config(config.as_deref(), None)?;
            write_units(&out_dir, &[markers::generate(&config)])
        }
    }
}

fn init_tracing(verbose: u8, log_level: Option<&str>) {
    let filter = match (log_level, verbose) {
        (Some(directive), _) => EnvFilter::new(directive),
        (None, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        (None, 1) => EnvFilter::new("debug"),
        (None, _) => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&Path>, manifest: Option<&Path>) -> Result<ObsgenConfig> {
    if let Some(path) = explicit {
        return ObsgenConfig::load(path).with_context(|| format!("loading {}", path.display()));
    }

    let beside = manifest
        .and_then(Path::parent)
        .map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |dir| dir.join(CONFIG_FILE_NAME));
    debug!(path = %beside.display(), "looking for config");

    ObsgenConfig::load_or_default(&beside).with_context(|| format!("loading {}", beside.display()))
}

fn run_generate(manifest_path: &Path, out_dir: &Path, config: Option<&Path>, check: bool) -> Result<()> {
    let config = load_config(config, Some(manifest_path))?;

    let json = fs::read_to_string(manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path.display()))?;
    let manifest = Manifest::from_json(&json)
        .with_context(|| format!("parsing manifest {}", manifest_path.display()))?;

    let generation = generate(&manifest, &config)?;

    for diagnostic in &generation.diagnostics {
        eprintln!("{diagnostic}");
    }

    if check {
        let stale: Vec<&str> = stale_units(out_dir, &generation.units)
            .into_iter()
            .map(|unit| unit.name.as_str())
            .collect();
        if !stale.is_empty() {
            bail!(
                "{} generated unit(s) out of date: {}",
                stale.len(),
                stale.join(", ")
            );
        }
        info!(units = generation.units.len(), "generated units are up to date");

        return Ok(());
    }

    write_units(out_dir, &generation.units)
}

/// Units whose file is missing or differs from the generated text.
fn stale_units<'a>(out_dir: &Path, units: &'a [GeneratedUnit]) -> Vec<&'a GeneratedUnit> {
    units
        .iter()
        .filter(|unit| {
            !fs::read_to_string(out_dir.join(&unit.name)).is_ok_and(|on_disk| on_disk == unit.source)
        })
        .collect()
}

fn write_units(out_dir: &Path, units: &[GeneratedUnit]) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    for unit in stale_units(out_dir, units) {
        let path = out_dir.join(&unit.name);

        fs::write(&path, &unit.source).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote unit");
    }

    println!("{} unit(s) in {}", units.len(), out_dir.display());

    Ok(())
}
