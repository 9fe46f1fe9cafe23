mod esolar;
mod fetch;
mod heartbeat;
mod show;
mod watch;

use clap::{Parser, Subcommand};

use crate::cli::{fetch::FetchArgs, show::ShowArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in, fetch a single snapshot, and print the metrics.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),

    /// Print the metrics of a previously saved snapshot.
    #[clap(name = "show")]
    Show(ShowArgs),

    /// Keep refreshing on a fixed interval.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_ok() {
        Args::command().debug_assert();
    }
}
