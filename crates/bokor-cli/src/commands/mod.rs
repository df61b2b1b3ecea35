//! Command dispatch and handler modules.

mod check;
mod deps;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check {
            manifests,
            bom,
            jobs,
        } => check::exec(&manifests, &bom, jobs, cli.verbose),
        Command::Deps {
            manifest,
            bom,
            phase,
        } => deps::exec(&manifest, &bom, phase.as_deref(), cli.verbose),
    }
}
