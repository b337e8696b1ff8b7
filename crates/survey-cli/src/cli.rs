use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::{
    self, lint::LintArgs, progress::ProgressArgs, schema::SchemaArgs, simulate::SimulateArgs,
    visibility::VisibilityArgs,
};
use crate::{config, logging};

#[derive(Parser, Debug)]
#[command(
    name = "survey-engine",
    about = "Replay survey sessions and project respondent progress",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to a survey-engine.toml; defaults to the platform config directory
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which questions are visible for a set of responses
    Visibility(VisibilityArgs),
    /// Replay a list of session events against a survey
    Simulate(SimulateArgs),
    /// Project respondent progress rows for a creator dashboard
    Progress(ProgressArgs),
    /// Report advisory authoring warnings for a survey's rules
    Lint(LintArgs),
    /// Print the JSON Schema of survey documents
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    logging::init(config.log_filter.as_deref());
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Visibility(args) => cmd::visibility::run(args, &config),
        Commands::Simulate(args) => cmd::simulate::run(args, &config),
        Commands::Progress(args) => cmd::progress::run(args),
        Commands::Lint(args) => cmd::lint::run(args),
        Commands::Schema(args) => cmd::schema::run(args),
    }
}
