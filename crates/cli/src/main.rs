//! Toko CLI - browse the catalog and run shopping sessions from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, cheapest first
//! toko catalog --sort harga-asc
//!
//! # Only accessories whose name contains "tas", as JSON
//! toko catalog --category Aksesoris --query tas --json
//!
//! # Interactive session (type `help` for commands)
//! toko session
//!
//! # Replay a scripted session against a custom catalog
//! toko --catalog catalog.yaml session --script demo.txt
//!
//! # Check a catalog file
//! toko validate catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `catalog` - Print the filtered, sorted product list
//! - `session` - Interactive or scripted cart session
//! - `validate` - Validate a catalog file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toko_cli::catalog_file;
use toko_cli::commands;
use toko_cli::commands::session::SessionOptions;
use toko_cli::config::{CliConfig, DEFAULT_LOG_FILTER, LogFormat};
use toko_core::{FilterCriteria, SortKey};

#[derive(Parser)]
#[command(name = "toko")]
#[command(author, version, about = "Toko storefront CLI")]
struct Cli {
    /// Catalog file (overrides `TOKO_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the product list
    Catalog {
        /// Case-insensitive search in product names
        #[arg(short, long)]
        query: Option<String>,

        /// Category (`Semua`, `Fashion`, `Gadget`, `Aksesoris`, `Kecantikan`)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`terbaru`, `harga-asc`, `harga-desc`, `rating`)
        #[arg(short, long)]
        sort: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run a shopping session
    Session {
        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,

        /// Stop at the first bad command or unknown product
        #[arg(long)]
        strict: bool,
    },
    /// Validate a catalog file
    Validate {
        /// Catalog file to check
        file: PathBuf,
    },
}

fn main() {
    // Parse arguments first so `--help` and `--version` work with a broken environment
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    let log_format = config.as_ref().map_or(LogFormat::Pretty, |c| c.log_format);
    init_tracing(log_format);

    let result = config
        .map_err(Into::into)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the rendered views.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Catalog {
            query,
            category,
            sort,
            json,
        } => {
            let catalog = load_catalog(cli.catalog, config)?;
            let sort = sort.map_or(config.default_sort, |s| SortKey::parse_lenient(&s));
            commands::catalog::list(
                &catalog,
                query.as_deref(),
                category.as_deref(),
                sort,
                json,
                &mut stdout,
            )?;
        }
        Commands::Session { script, strict } => {
            let catalog = load_catalog(cli.catalog, config)?;
            let criteria = FilterCriteria {
                sort: config.default_sort,
                ..FilterCriteria::default()
            };
            if let Some(path) = script {
                let file = std::fs::File::open(&path)
                    .map_err(|e| format!("cannot open script {}: {e}", path.display()))?;
                let options = SessionOptions {
                    strict,
                    prompt: false,
                };
                commands::session::run(
                    &catalog,
                    criteria,
                    BufReader::new(file),
                    &mut stdout,
                    options,
                )?;
            } else {
                let stdin = io::stdin();
                let options = SessionOptions {
                    strict,
                    prompt: stdin.is_terminal(),
                };
                commands::session::run(&catalog, criteria, stdin.lock(), &mut stdout, options)?;
            }
        }
        Commands::Validate { file } => commands::validate::run(&file, &mut stdout)?,
    }
    Ok(())
}

fn load_catalog(
    flag: Option<PathBuf>,
    config: &CliConfig,
) -> Result<toko_core::Catalog, catalog_file::LoadError> {
    let path = flag.or_else(|| config.catalog_path.clone());
    catalog_file::load_or_builtin(path.as_deref())
}
