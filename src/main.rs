//! slidefx inspector
//!
//! Lists, prints, validates and exports the effect catalog, and samples the
//! CPU reference models for debugging.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use slidefx::{export_catalog, list_effects, sample_effect, show_effect, validate_catalog};
use slidefx_catalog::PrecisionPolicy;
use slidefx_config::Config;

#[derive(Parser)]
#[command(name = "slidefx")]
#[command(about = "Slide-transition and particle effect catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ~/.slidefx/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every effect in the catalog
    List,

    /// Print the bindings and programs of one effect
    Show {
        key: String,

        /// Precision preamble policy: as-authored, guarded or stripped
        #[arg(long, value_parser = parse_precision)]
        precision: Option<PrecisionPolicy>,
    },

    /// Re-check every program against its declared bindings
    Validate,

    /// Write every program and catalog.json into a directory
    Export { dir: PathBuf },

    /// Print reference-model output for a default input
    Sample {
        key: String,

        /// Transition progress (default: preview.sample_percent)
        #[arg(long)]
        percent: Option<f32>,
    },
}

fn parse_precision(name: &str) -> Result<PrecisionPolicy, String> {
    PrecisionPolicy::from_name(name).ok_or_else(|| {
        let names: Vec<_> = PrecisionPolicy::ALL.iter().map(|p| p.name()).collect();
        format!("unknown precision policy '{}', expected one of {}", name, names.join(", "))
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path).with_context(|| format!("Loading {:?}", path)),
        None => Config::load().context("Loading default configuration"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::List => {
            let catalog = config.build_catalog()?;
            print!("{}", list_effects(&catalog));
        }
        Commands::Show { key, precision } => {
            if let Some(policy) = precision {
                config.catalog.precision = policy;
            }
            let catalog = config.build_catalog()?;
            println!("{}", show_effect(&catalog, &key)?);
        }
        Commands::Validate => {
            let catalog = config.build_catalog()?;
            let report = validate_catalog(&catalog);
            println!("{report}");
            if !report.is_ok() {
                bail!("{} effects failed validation", report.failures.len());
            }
        }
        Commands::Export { dir } => {
            let catalog = config.build_catalog()?;
            let written = export_catalog(&catalog, &dir)?;
            println!("Wrote {} files to {}", written.len(), dir.display());
        }
        Commands::Sample { key, percent } => {
            let percent = percent.unwrap_or(config.preview.sample_percent);
            println!("{}", sample_effect(&key, percent, config.preview.bloom_amount)?);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,slidefx=info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
