//! CLI argument definitions for Bokor.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bokor",
    version,
    about = "Declaration tooling for Bokor projects",
    long_about = "Bokor checks project declaration files (bokor.toml) for structural \
                  well-formedness and aligns version-less dependencies against the \
                  platform BOM documents they reference."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check manifests for structural well-formedness
    Check {
        /// Manifest files to check
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// BOM documents to verify platform alignment against
        #[arg(long)]
        bom: Vec<PathBuf>,
        /// Worker threads used when checking several manifests
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Print the ordered, aligned dependency declarations of a manifest
    Deps {
        /// Manifest file to read
        manifest: PathBuf,
        /// BOM documents supplying platform-managed versions
        #[arg(long)]
        bom: Vec<PathBuf>,
        /// Only list declarations visible in this build phase:
        /// main-compile, test-compile or test-runtime
        #[arg(long)]
        phase: Option<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
