use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use metacat_core::config::ENV_LOG;
use metacat_core::{AssetType, OutputFormat};

mod commands;
mod settings;

#[derive(Parser)]
#[command(name = "metacat")]
#[command(about = "Validate catalog identifiers and analyze lineage edges", long_about = None)]
struct Cli {
    /// Output format: text or json (overrides config)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Config file (default: ./metacat.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse identifiers and report every violation
    Parse {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Strictly normalize one identifier (trim, lowercase, structural checks)
    Canonicalize { id: String },
    /// Assemble an identifier from a prefix token and segments
    Build {
        /// Prefix token, e.g. db.rec or metric
        prefix: String,
        #[arg(required = true)]
        segments: Vec<String>,
    },
    /// Derive the asset type of an identifier
    Type {
        id: String,
        /// Fail unless the identifier derives this type
        #[arg(long)]
        expect: Option<AssetType>,
    },
    /// Print the grammar table
    Grammar,
    /// Triage a JSON/YAML edge file, then check the accepted edges for cycles
    Lineage { file: PathBuf },
    /// List identifiers downstream (or upstream) of one node in an edge file
    Impact {
        file: PathBuf,
        id: String,
        /// Walk against edge direction instead
        #[arg(long)]
        upstream: bool,
    },
    /// Print the effective configuration
    Config,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = settings::load_config(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    match cli.command {
        Commands::Parse { ids } => commands::parse(&ids, &config),
        Commands::Canonicalize { id } => commands::canonicalize(&id, &config),
        Commands::Build { prefix, segments } => commands::build(&prefix, &segments, &config),
        Commands::Type { id, expect } => commands::asset_type(&id, expect, &config),
        Commands::Grammar => commands::grammar(&config),
        Commands::Lineage { file } => commands::lineage(&file, &config),
        Commands::Impact { file, id, upstream } => commands::impact(&file, &id, upstream, &config),
        Commands::Config => commands::show_config(&config),
    }
}
