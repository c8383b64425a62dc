//! CLI frontend for the character sheet engine.

mod commands;
mod render;
mod theme;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "charsheet",
    about = "Derive and display tabletop character sheet statistics",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log derivation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a sheet and report suspicious values
    Check {
        /// Path to the character sheet (JSON)
        sheet: PathBuf,

        /// Fail when any warning is reported
        #[arg(long)]
        strict: bool,
    },

    /// Print the character dashboard
    Show {
        /// Path to the character sheet (JSON)
        sheet: PathBuf,

        /// Theme file with named colors
        #[arg(short, long)]
        theme: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Export the derived statistics as JSON
    Export {
        /// Path to the character sheet (JSON)
        sheet: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Open the interactive terminal dashboard
    Tui {
        /// Path to the character sheet (JSON)
        sheet: PathBuf,

        /// Theme file with named colors
        #[arg(short, long)]
        theme: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { sheet, strict } => commands::check::run(&sheet, strict),
        Commands::Show {
            sheet,
            theme,
            no_color,
        } => commands::show::run(&sheet, theme.as_deref(), no_color),
        Commands::Export { sheet, output } => commands::export::run(&sheet, output.as_deref()),
        Commands::Tui { sheet, theme } => commands::tui::run(&sheet, theme.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Send logs to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
