//! CLI argument definitions for jarpub.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jarpub",
    version,
    about = "Plan and verify Maven publications described by pom.yaml",
    long_about = "jarpub merges layered pom.yaml descriptions, resolves the repositories declared \
                  in jarpub.toml against gradle.properties, and shows where each publication \
                  goes and which files it must produce."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set a project property, overriding gradle.properties and the environment
    #[arg(short = 'P', value_name = "KEY=VALUE", global = true)]
    pub properties: Vec<String>,

    /// Extra POM description, resolved before the project and root ones
    #[arg(long, global = true)]
    pub pom_file: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every publication with its coordinate, policies and upload targets
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the POM XML of a publication
    Pom {
        /// Publication variant (the default POM when omitted)
        #[arg(long)]
        variant: Option<String>,
    },

    /// Check a local Maven repository holds the expected files of a publication
    Verify {
        /// Root of the local Maven repository
        repo_dir: PathBuf,
        /// Publication variant (the default POM when omitted)
        #[arg(long)]
        variant: Option<String>,
        /// Packaging extension of the main artifact (defaults to the POM's)
        #[arg(long)]
        packaging: Option<String>,
    },

    /// Compare two version strings
    Compare {
        /// First version
        a: String,
        /// Second version
        b: String,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
