use std::{fs, path::PathBuf};

use clap::Parser;

use crate::{
    cli::esolar::EsolarArgs,
    core::{mapper::is_available, snapshot::Snapshot},
    prelude::*,
    tables::build_metrics_table,
};

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(flatten)]
    esolar: EsolarArgs,

    /// Save the raw snapshot to the JSON file, `show` can read it back.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl FetchArgs {
    pub async fn run(self) -> Result {
        let snapshot = self.esolar.api().refresh().await.context("failed to refresh")?;
        info!(is_available = is_available(&snapshot), "fetched");
        println!("{}", build_metrics_table(&snapshot));
        if let Some(path) = &self.output {
            save(&snapshot, path)?;
        }
        Ok(())
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
fn save(snapshot: &Snapshot, path: &PathBuf) -> Result {
    let contents = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!("saved");
    Ok(())
}
