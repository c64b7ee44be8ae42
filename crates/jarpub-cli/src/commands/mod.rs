//! Command dispatch and handler modules.

mod compare;
mod plan;
mod pom;
mod session;
mod verify;

use miette::Result;

use crate::cli::{Cli, Command};

use session::Session;

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Compare { a, b } => compare::exec(a, b),
        Command::Plan { json } => plan::exec(&Session::load(&cli)?, *json),
        Command::Pom { variant } => pom::exec(&Session::load(&cli)?, variant.as_deref()),
        Command::Verify {
            repo_dir,
            variant,
            packaging,
        } => verify::exec(
            &Session::load(&cli)?,
            repo_dir,
            variant.as_deref(),
            packaging.as_deref(),
        ),
    }
}
