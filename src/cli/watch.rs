use std::time::Duration;

use bon::Builder;
use chrono::{DateTime, Local};
use clap::Parser;
use tokio::{
    signal,
    time::{MissedTickBehavior, interval, timeout},
};

use crate::{
    api::esolar::{Api, FailureKind},
    cli::{esolar::EsolarArgs, heartbeat::HeartbeatArgs},
    core::{
        mapper::{is_available, resolve},
        metric::METRICS,
        snapshot::Snapshot,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    esolar: EsolarArgs,

    #[clap(
        long,
        env = "SAJ_POLLING_INTERVAL",
        default_value = "5min",
        value_parser = parse_interval
    )]
    interval: humantime::Duration,

    #[clap(flatten)]
    heartbeat: HeartbeatArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        Watcher::builder()
            .api(self.esolar.api())
            .interval(self.interval)
            .heartbeat(self.heartbeat)
            .build()
            .run()
            .await
    }
}

#[derive(Builder)]
struct Watcher {
    api: Api,
    heartbeat: HeartbeatArgs,

    #[builder(into)]
    interval: Duration,
}

impl Watcher {
    async fn run(self) -> Result {
        let mut interval = interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last: Option<(DateTime<Local>, Snapshot)> = None;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                result = signal::ctrl_c() => {
                    result.context("failed to listen for Ctrl+C")?;
                    info!("interrupted");
                    return Ok(());
                }
            }

            // Dropping the refresh future still closes the session.
            let Ok(result) = timeout(self.interval, self.api.refresh()).await else {
                warn!(interval = ?self.interval, "refresh did not complete in time");
                log_last(last.as_ref());
                continue;
            };

            match result {
                Ok(snapshot) => {
                    log_metrics(&snapshot);
                    self.heartbeat.send().await;
                    last = Some((Local::now(), snapshot));
                }
                Err(error) => match error.kind() {
                    FailureKind::Auth => {
                        return Err(error).context("the portal rejected the credentials");
                    }
                    FailureKind::Transport => {
                        warn!("transport failure, retrying on the next tick: {error:#}");
                        log_last(last.as_ref());
                    }
                    FailureKind::Data => {
                        error!("unexpected response, retrying on the next tick: {error:#}");
                        log_last(last.as_ref());
                    }
                },
            }
        }
    }
}

fn log_metrics(snapshot: &Snapshot) {
    for metric in METRICS {
        if let Some(value) = resolve(snapshot, metric.key) {
            debug!(key = metric.key, icon = metric.icon, unit = metric.unit, "{value}");
        }
    }
    info!(is_available = is_available(snapshot), "refreshed");
}

fn parse_interval(value: &str) -> Result<humantime::Duration> {
    let interval: humantime::Duration = value.parse()?;
    ensure!(!interval.is_zero(), "the polling interval must be positive");
    Ok(interval)
}

fn log_last(last: Option<&(DateTime<Local>, Snapshot)>) {
    if let Some((fetched_at, snapshot)) = last {
        info!(
            %fetched_at,
            is_available = is_available(snapshot),
            "keeping the last good snapshot",
        );
    }
}
