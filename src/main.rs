use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use scroll_banner::carousel::TracingIndicator;
use scroll_banner::carousel::render::RenderUpdate;
use scroll_banner::command::HostCommand;
use scroll_banner::config::Configuration;
use scroll_banner::events::{CarouselCommand, CarouselNotice};
use scroll_banner::tasks;

#[derive(Debug, Parser)]
#[command(
    name = "scroll-banner",
    version,
    about = "Headless infinite-loop image banner driven from stdin"
)]
struct Args {
    /// Path to YAML config; defaults apply when the file is absent
    #[arg(value_name = "CONFIG", default_value = "banner.yaml")]
    config: PathBuf,
    /// Override the auto-advance interval (e.g. "3s", "1500ms")
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    interval: Option<Duration>,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        interval,
        verbose,
    } = Args::parse();

    // RUST_LOG wins over -v.
    let default_filter = match verbose {
        0 => "info",
        1 => "scroll_banner=debug,info",
        _ => "scroll_banner=trace,debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .compact()
        .init();

    let mut cfg = if config.exists() {
        Configuration::from_yaml_file(&config)
            .with_context(|| format!("failed to load configuration from {}", config.display()))?
    } else {
        tracing::info!(path = %config.display(), "config not found; using defaults");
        Configuration::default()
    };
    if let Some(interval) = interval {
        cfg.auto_advance_interval = interval;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::debug!("configuration: {cfg:#?}");

    let items = tasks::files::discover_images(&cfg).context("failed to discover banner images")?;
    tracing::info!(count = items.len(), "banner images ready");

    let (command_tx, command_rx) = mpsc::channel::<CarouselCommand>(32); // Host -> Carousel
    let (notice_tx, mut notice_rx) = mpsc::channel::<CarouselNotice>(64); // Carousel -> Host
    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    tasks.spawn({
        let options = cfg.carousel_options();
        let cancel = cancel.clone();
        async move {
            tasks::carousel::run(
                options,
                TracingIndicator::default(),
                items,
                command_rx,
                notice_tx,
                cancel,
            )
            .await
            .context("carousel task failed")
        }
    });

    // Stdin commands; EOF or `quit` shuts everything down.
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            let mut lines = BufReader::new(io::stdin()).lines();
            loop {
                let line = tokio::select! {
                    _ = cancel.cancelled() => break,
                    line = lines.next_line() => line.context("failed to read stdin")?,
                };
                let Some(line) = line else {
                    tracing::info!("stdin closed; initiating shutdown");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<HostCommand>() {
                    Ok(HostCommand::Quit) => break,
                    Ok(HostCommand::Carousel(cmd)) => {
                        if command_tx.send(cmd).await.is_err() {
                            tracing::warn!("carousel stopped; dropping command");
                            break;
                        }
                    }
                    Err(err) => tracing::warn!("{err:#}"),
                }
            }
            cancel.cancel();
            Ok::<(), anyhow::Error>(())
        }
    });

    // Host side of the notices: this is where a real UI would repaint.
    while let Some(notice) = notice_rx.recv().await {
        match notice {
            CarouselNotice::CurrentPageChanged(page) => tracing::info!(page, "current page"),
            CarouselNotice::IndicatorPlaced(placement) => {
                tracing::info!(?placement, "indicator placed")
            }
            CarouselNotice::SlotsRepainted(updates) => {
                for update in updates {
                    match update {
                        RenderUpdate::Paint(paint) => tracing::debug!(
                            slot = paint.slot,
                            image = %paint.image.path().display(),
                            x = paint.frame.x,
                            width = paint.frame.width,
                            "paint slot"
                        ),
                        RenderUpdate::Remove(slot) => tracing::debug!(slot, "remove slot"),
                    }
                }
            }
        }
    }
    cancel.cancel();

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    Ok(())
}
