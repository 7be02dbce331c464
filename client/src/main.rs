#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use anyhow::Context;
use clap::Parser;

use crate::app_config::{AppConfig, CliArgs};
use crate::profile::{get_profile_path, Profile};
use crate::store::{LocalDb, RemoteStore};
use crate::sync::SyncClient;

mod app_config;
mod frontend;
mod notifier;
mod profile;
mod store;
mod sync;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let args = CliArgs::parse();

    let profile_path = get_profile_path(&args.profile_path);
    let profile = Profile::from_path(&profile_path)?;
    let config = AppConfig::from_args(&args, profile.as_ref());

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    let remote = RemoteStore::new(&config.server_url)?;
    let local = LocalDb::open(&config.db_path)?;

    let (handle, ui, task) = SyncClient::start(remote, local);

    let result = frontend::run(handle, ui).await;

    task.abort();

    result
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
