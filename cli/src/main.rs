//! unjoin CLI - Main entry point
//!
//! Maps a JSON array of flat join rows into nested JSON records using the
//! table relationships declared in `unjoin.toml`.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use unjoin_cli::commands;
use unjoin_cli::config::{CONFIG_FILE, Config};
use unjoin_cli::error::CliError;
use unjoin_cli::logging;

/// unjoin - nest the flat rows of a multi-table join
#[derive(Parser, Debug)]
#[command(name = "unjoin")]
#[command(author, version, about = "Nest the flat rows of a multi-table SQL join", long_about = None)]
struct Cli {
    /// Path to mapping file (default: unjoin.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map a JSON array of flat rows into nested records
    Map {
        /// Row file, or `-` for stdin
        #[arg(value_name = "ROWS")]
        rows: PathBuf,

        /// Override the column delimiter from the mapping file
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Print each table's distinct records without nesting
        #[arg(long)]
        raw: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Write output to a file (default: stdout)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Validate the mapping file and show the processing order
    Check,

    /// Initialize a new unjoin.toml mapping file
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Init => commands::init::run(config_path),

        Command::Check => {
            let (config, path) = load_config(config_path)?;
            commands::check::run(&config, &path)
        }

        Command::Map {
            rows,
            delimiter,
            raw,
            pretty,
            out,
        } => {
            let (config, _) = load_config(config_path)?;
            commands::map::run(
                &config,
                &rows,
                delimiter.as_deref(),
                raw,
                pretty,
                out.as_deref(),
            )
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<(Config, PathBuf), CliError> {
    let config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading mapping");
            Config::load_from(path)?
        }
        None => {
            tracing::debug!(path = CONFIG_FILE, "loading default mapping");
            Config::load()?
        }
    };
    let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
    Ok((config, path))
}
