use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use survey_engine::EvaluationStrategy;

/// Settings read from `survey-engine.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strategy: EvaluationStrategy,
    pub log_filter: Option<String>,
    pub start_page: i64,
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "survey-engine").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads the explicit config file, else the platform default if it exists, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => parse_file(path),
        None => match default_path() {
            Some(path) if path.is_file() => parse_file(&path),
            _ => Ok(EngineConfig::default()),
        },
    }
}

fn parse_file(path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse(raw: &str) -> Result<EngineConfig> {
    Ok(toml::from_str(raw)?)
}
