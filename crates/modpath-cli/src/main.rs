#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use commands::RootArgs;
use miette::Result;
use modpath_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modpath")]
#[command(author, version, about = "Inspect how bundle module ids are rewritten into import specifiers", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(flatten)]
    roots: RootArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Rewrite one module id into an import specifier
    Rewrite {
        /// Module id: an absolute path, a path relative to appAndAddons, or a bare specifier
        id: String,

        /// Path of the importing module
        #[arg(long)]
        parent: Option<String>,
    },

    /// Show every step taken while rewriting a module id
    Explain {
        /// Module id: an absolute path, a path relative to appAndAddons, or a bare specifier
        id: String,

        /// Path of the importing module
        #[arg(long)]
        parent: Option<String>,
    },

    /// Rewrite a JSON array of `{ "id", "parent"? }` requests
    Batch {
        /// JSON file with the requests
        file: PathBuf,

        /// Write results to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Validate and print the configured roots
    Roots,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    let Some(command) = cli.command else {
        return commands::version::run();
    };

    if matches!(command, Commands::Version) {
        return commands::version::run();
    }

    let rewriter = commands::load_rewriter(&config.cwd, &cli.roots, cli.json)?;

    match command {
        Commands::Version => commands::version::run(),
        Commands::Rewrite { id, parent } => {
            commands::rewrite::run(&rewriter, &id, parent.as_deref(), cli.json)
        }
        Commands::Explain { id, parent } => {
            commands::explain::run(&rewriter, &id, parent.as_deref(), cli.json)
        }
        Commands::Batch { file, out } => {
            commands::batch::run(&rewriter, &config.cwd, &file, out.as_deref(), cli.json)
        }
        Commands::Roots => commands::roots::run(&rewriter, cli.json),
    }
}
