use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send every request of the given groups in dependency order
    Run {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        batch: BatchArgs,
        /// Write completion records as JSON to this file
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        results: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the dependencies found for each request without sending anything
    Plan {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        batch: BatchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the request groups of an export
    Groups {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
