use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use survey_engine::Survey;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(long, value_name = "schema.json")]
    pub out: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let schema = schemars::schema_for!(Survey);
    let rendered = serde_json::to_string_pretty(&schema)?;
    match &args.out {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write schema {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
