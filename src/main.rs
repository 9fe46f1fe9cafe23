#![allow(clippy::doc_markdown)]

mod api;
mod cli;
mod core;
mod prelude;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Fetch(args) => args.run().await?,
        Command::Show(args) => args.run()?,
        Command::Watch(args) => args.run().await?,
    }

    info!("done!");
    Ok(())
}
