use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use survey_engine::{ResponseMap, VisibilityMap, resolve_visibility};

use crate::cmd::{StrategyArg, emit, load_json, load_survey, strategy};
use crate::config::EngineConfig;

#[derive(Args, Debug, Clone)]
pub struct VisibilityArgs {
    #[arg(long, value_name = "survey.json")]
    pub survey: PathBuf,
    /// JSON object mapping question ids to answers
    #[arg(long, value_name = "responses.json")]
    pub responses: PathBuf,
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageVisibility {
    page_index: usize,
    visibility: VisibilityMap,
}

pub fn run(args: VisibilityArgs, config: &EngineConfig) -> Result<()> {
    let survey = load_survey(&args.survey)?;
    let responses: ResponseMap = load_json(&args.responses, "responses")?;
    let strategy = strategy(args.strategy, config);

    let pages: Vec<PageVisibility> = survey
        .pages
        .iter()
        .enumerate()
        .map(|(page_index, page)| PageVisibility {
            page_index,
            visibility: resolve_visibility(page, &responses, strategy),
        })
        .collect();
    emit(&pages)
}
