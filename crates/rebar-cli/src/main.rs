mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rebar",
    version,
    about = "Digitize reinforcing-rod specifications from structural drawings into a bill of materials"
)]
struct Cli {
    /// Log recognized headers and rod lines (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Digitize a specification PDF (or a JSON array of page texts)
    Digitize {
        /// Path to a PDF, or to a JSON file holding an array of page texts (null for blank pages)
        input_file: PathBuf,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the result to a file (CSV if the name ends in .csv, JSON otherwise)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom JSON pattern profile (default: builtin profile)
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Inspect and validate pattern profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List predefined profiles
    List,
    /// Print a predefined profile as JSON
    Show {
        /// Preset name
        #[arg(default_value = "default")]
        preset: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();

    let result = match cli.command {
        Commands::Digitize {
            input_file,
            output,
            out,
            profile,
        } => commands::digitize::run(input_file, &output, out, profile),
        Commands::Profile { action } => match action {
            ProfileAction::List => commands::profile::list(),
            ProfileAction::Show { preset } => commands::profile::show(&preset),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
