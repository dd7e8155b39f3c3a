//! Command-line interface for the inclusion list verifier.

use std::path::PathBuf;

use clap::{
    Args,
    Parser,
    Subcommand,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Inclusion list conformance checks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the fixture's inclusion list against its parent header and nonces
    Validate(FixtureArgs),
    /// Validate the inclusion list, then check the fixture's block against it
    Reconcile(FixtureArgs),
}

#[derive(Debug, Args)]
pub struct FixtureArgs {
    /// Path to a JSON fixture
    #[arg(long, env = "IL_VERIFY_FIXTURE")]
    pub fixture: PathBuf,
}
