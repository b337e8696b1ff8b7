use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use survey_engine::lint;

use crate::cmd::{emit, load_survey};

#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    #[arg(long, value_name = "survey.json")]
    pub survey: PathBuf,
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: LintArgs) -> Result<()> {
    let survey = load_survey(&args.survey)?;
    let warnings = lint(&survey);
    emit(&warnings)?;
    if args.strict && !warnings.is_empty() {
        bail!(
            "survey-lint: {} warning(s) treated as errors (--strict)",
            warnings.len()
        );
    }
    Ok(())
}
