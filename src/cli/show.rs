use std::{fs, path::PathBuf};

use clap::Parser;

use crate::{
    core::{mapper::is_available, snapshot::Snapshot},
    prelude::*,
    tables::build_metrics_table,
};

#[derive(Parser)]
pub struct ShowArgs {
    /// Snapshot saved by `fetch --output`.
    #[clap(long, env = "SAJ_SNAPSHOT_PATH")]
    snapshot: PathBuf,
}

impl ShowArgs {
    #[instrument(skip_all, fields(path = %self.snapshot.display()))]
    pub fn run(self) -> Result {
        let contents = fs::read_to_string(&self.snapshot)
            .with_context(|| format!("failed to read `{}`", self.snapshot.display()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&contents).context("failed to deserialize the snapshot")?;
        info!(is_available = is_available(&snapshot), "loaded");
        println!("{}", build_metrics_table(&snapshot));
        Ok(())
    }
}
