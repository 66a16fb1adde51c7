//! glozz CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::normalise::Mode;

#[derive(Parser)]
#[command(name = "glozz")]
#[command(version)]
#[command(about = "Cut, shift and normalise Glozz annotation documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep only the units that lie within [START, END]
    #[command(allow_negative_numbers = true)]
    Cut {
        /// Annotation file (.aa) to read
        input: PathBuf,

        /// First character of the window
        start: i64,

        /// Last character of the window
        end: i64,

        /// Where to write the cut annotations
        output: PathBuf,

        /// Shift surviving units by N (default: re-anchor the window at 1)
        #[arg(long, value_name = "N")]
        shift: Option<i64>,
    },

    /// Move every unit bound at or past START by N characters
    #[command(allow_negative_numbers = true)]
    Shift {
        /// Annotation file (.aa) to read
        input: PathBuf,

        /// Bounds at or past this offset move
        start: i64,

        /// Where to write the shifted annotations
        output: PathBuf,

        /// Number of characters to move by (may be negative)
        #[arg(long, value_name = "N")]
        shift: i64,
    },

    /// Renumber creation dates and the ids that embed them
    #[command(allow_negative_numbers = true)]
    Normalise {
        /// Annotation files (.aa) to normalise
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory to write normalised files to (created if absent)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// How dates are renumbered
        #[arg(long, value_enum, default_value_t = Mode::Count)]
        mode: Mode,

        /// First number handed out
        #[arg(long, default_value_t = 1)]
        start: i64,
    },

    /// Print the hashcode of a file
    Hashcode {
        /// File to hash, usually the text (.ac) of a document
        input: PathBuf,
    },

    /// Give one annotation a new id and repoint its references
    Rename {
        /// Annotation file (.aa) to read
        input: PathBuf,

        /// Where to write the renamed annotations
        output: PathBuf,

        /// Id to rename (eg. kowey_398190)
        #[arg(long, value_name = "ID")]
        source: String,

        /// Id to rename to (default: same author, next free date)
        #[arg(long, value_name = "ID")]
        target: Option<String>,
    },

    /// Check references, spans and, with --text, the recorded hashcode
    Check {
        /// Annotation file (.aa) to check
        input: PathBuf,

        /// The document's text (.ac)
        #[arg(long, value_name = "FILE")]
        text: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glozz=info,glozz_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cut {
            input,
            start,
            end,
            output,
            shift,
        } => commands::cut::execute(commands::cut::CutArgs {
            input,
            start,
            end,
            output,
            shift,
        }),
        Commands::Shift {
            input,
            start,
            output,
            shift,
        } => commands::shift::execute(commands::shift::ShiftArgs {
            input,
            threshold: start,
            output,
            delta: shift,
        }),
        Commands::Normalise {
            inputs,
            output,
            mode,
            start,
        } => commands::normalise::execute(commands::normalise::NormaliseArgs {
            inputs,
            output_dir: output,
            mode,
            start,
        }),
        Commands::Hashcode { input } => {
            commands::hashcode::execute(commands::hashcode::HashcodeArgs { input })
        }
        Commands::Rename {
            input,
            output,
            source,
            target,
        } => commands::rename::execute(commands::rename::RenameArgs {
            input,
            output,
            source,
            target,
        }),
        Commands::Check { input, text } => {
            commands::check::execute(commands::check::CheckArgs { input, text })
        }
    }
}
