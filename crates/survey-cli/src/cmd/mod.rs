pub mod lint;
pub mod progress;
pub mod schema;
pub mod simulate;
pub mod visibility;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde::de::DeserializeOwned;
use survey_engine::{EvaluationStrategy, Survey};

use crate::config::EngineConfig;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    #[value(alias = "flat")]
    FlatSequential,
    #[value(alias = "grouped")]
    GroupedOr,
}

impl From<StrategyArg> for EvaluationStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::FlatSequential => EvaluationStrategy::FlatSequential,
            StrategyArg::GroupedOr => EvaluationStrategy::GroupedOr,
        }
    }
}

/// Command-line choice first, then the configured default.
pub fn strategy(arg: Option<StrategyArg>, config: &EngineConfig) -> EvaluationStrategy {
    arg.map(EvaluationStrategy::from).unwrap_or(config.strategy)
}

pub fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {what} {}", path.display()))
}

pub fn load_survey(path: &Path) -> Result<Survey> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read survey {}", path.display()))?;
    Survey::from_json_str(&raw).with_context(|| format!("failed to load survey {}", path.display()))
}

pub fn emit<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
