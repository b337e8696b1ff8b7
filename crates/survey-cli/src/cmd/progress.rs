use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use survey_engine::{ResponseRecord, build_dashboard, paginate};

use crate::cmd::{emit, load_json, load_survey};

#[derive(Args, Debug, Clone)]
pub struct ProgressArgs {
    /// Survey whose page count defines progress
    #[arg(long, value_name = "survey.json")]
    pub survey: PathBuf,
    /// JSON array of persisted response records
    #[arg(long, value_name = "records.json")]
    pub records: PathBuf,
    /// JSON array of invited respondent emails
    #[arg(long, value_name = "respondents.json")]
    pub respondents: Option<PathBuf>,
    /// 1-based page of rows to print; all rows when omitted
    #[arg(long)]
    pub page: Option<usize>,
    #[arg(long = "per-page", default_value_t = 20)]
    pub per_page: usize,
}

pub fn run(args: ProgressArgs) -> Result<()> {
    let survey = load_survey(&args.survey)?;
    let records: Vec<ResponseRecord> = load_json(&args.records, "records")?;
    let respondents: Vec<String> = match &args.respondents {
        Some(path) => load_json(path, "respondents")?,
        None => Vec::new(),
    };

    let rows = build_dashboard(survey.page_count(), &respondents, &records);
    tracing::debug!(rows = rows.len(), total_pages = survey.page_count(), "projected progress");
    match args.page {
        Some(page) => emit(&paginate(&rows, page, args.per_page)),
        None => emit(&rows),
    }
}
