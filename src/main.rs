//! `pinchy`: list or archive the mixes on pinchyandfriends.com that aren't in
//! the local archive yet.
//!
//! Exits with status 1 if any mix failed to archive, and 2 if the run could
//! not start at all (bad configuration, unreachable or unreadable catalog).

mod cli;
mod error;
mod report;

use crate::cli::{Cli, Mode};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use futures::StreamExt;
use pinchy_config::Config;
use pinchy_fetch::{HttpSource, base_url};
use pinchy_library::{ArchiveEvent, Context, MixDescriptor, archive, pending};
use pinchy_storage::ArchiveRoot;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:?}");
            ExitCode::from(EXIT_FATAL)
        },
    }
}

/// `RUST_LOG` wins unless verbosity was asked for on the command line.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let default = format!("pinchy={level}");
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default)),
        _ => EnvFilter::new(&default),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    tracing::debug!(?config, "Configuration loaded");

    let root = std::path::absolute(&config.archive_root).or_raise(|| ErrorKind::Archive(config.archive_root.clone()))?;
    let root = ArchiveRoot::open(&root).or_raise(|| ErrorKind::Archive(root.clone()))?;
    let base = base_url(&config.base_url).or_raise(|| ErrorKind::Config)?;
    let source = HttpSource::new(config.http.user_agent.as_deref(), config.http.timeout()).or_raise(|| ErrorKind::Client)?;
    let ctx = Context::new(base, Arc::new(source), root);

    let mixes = pending(&ctx).await.or_raise(|| ErrorKind::Catalog)?;
    Ok(match cli.mode() {
        Mode::List => {
            println!("{}", report::format_mix_table(&mixes));
            ExitCode::SUCCESS
        },
        Mode::Download => download(&ctx, mixes, config.workers).await,
    })
}

/// Configuration file and environment, then command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(root) = &cli.root {
        config.archive_root = root.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    config.validate().or_raise(|| ErrorKind::Config)
}

async fn download(ctx: &Context, mixes: Vec<MixDescriptor>, workers: usize) -> ExitCode {
    let mut events = std::pin::pin!(archive(ctx, mixes, workers));
    let (mut archived, mut failed) = (0usize, 0usize);
    while let Some(event) = events.next().await {
        match event {
            ArchiveEvent::Started => {},
            ArchiveEvent::Planned(0) => tracing::info!("{}", report::NOTHING_NEW),
            ArchiveEvent::Planned(count) => tracing::info!(count, workers, "Archiving mixes"),
            ArchiveEvent::Archived(mix) => {
                archived += 1;
                tracing::debug!(
                    mix_id = %mix.descriptor.mix_id,
                    audio = mix.location(&mix.audio).as_deref(),
                    artwork = mix.location(&mix.artwork).as_deref(),
                    "Ready for cataloguing",
                );
            },
            ArchiveEvent::Failed(mix, e) => {
                failed += 1;
                tracing::error!(mix_id = %mix.mix_id, kind = %*e, "Could not archive {mix}: {e:?}");
            },
            ArchiveEvent::Complete => tracing::info!(archived, failed, "Finished"),
        }
    }
    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
