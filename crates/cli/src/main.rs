use anyhow::Context;
use clap::Parser;
use config::Config;
use flume::bounded;
use orchestrator::{ControlEvent, HttpSource, Services, SyncEngine, SystemClock};
use rbx_tracker::{
    cli::Cli,
    proxy::{self, ProxyState},
    render,
    signals::{SignalEvent, wait_for_signal},
};
use std::io::{self, Write};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbosity.log_level_filter().as_trace().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    debug!(config = ?cli);

    let mut config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => Config::new()?,
    };
    if let Some(category) = &cli.category {
        config.polling.default_category = category.clone();
    }
    if cli.no_proxy {
        config.proxy.enabled = false;
    }

    if cli.print_config {
        io::stdout().write_all(config.to_toml()?.as_bytes())?;
        return Ok(());
    }

    let services = Services {
        source: Box::new(HttpSource::new(&config.upstream)?),
        clock: Box::new(SystemClock),
    };
    let mut engine = SyncEngine::new(&config, services);

    if cli.once {
        let report = engine.tick().await;
        render::print(engine.state())?;
        if report.is_failure() {
            anyhow::bail!(
                "synchronization failed: {}",
                engine.state().error().unwrap_or_default()
            );
        }
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let handle = engine.spawn(cancel.child_token());
    let mut updates = handle.subscribe();

    let mut proxy_task = if config.proxy.enabled {
        let state = ProxyState::new(&config.upstream)?;
        Some(tokio::spawn(proxy::serve(
            config.proxy.bind,
            state,
            cancel.child_token(),
        )))
    } else {
        info!("proxy disabled");
        None
    };

    let (events_tx, events_rx) = bounded(8);
    let mut signals = tokio::spawn(async move { wait_for_signal(&events_tx).await });

    let outcome: anyhow::Result<()> = loop {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(err) = res.context("Failed to listen for Ctrl-C") {
                    break Err(err);
                }
                info!("interrupted, shutting down");
                break Ok(());
            }
            joined = &mut signals => {
                let err = match joined {
                    Ok(Err(err)) => anyhow::Error::from(err),
                    Ok(Ok(())) => anyhow::anyhow!("signal listener exited"),
                    Err(err) => anyhow::Error::from(err),
                };
                error!(error = ?err, "Error while waiting for signal");
                break Err(err);
            }
            joined = wait_proxy(&mut proxy_task) => {
                proxy_task = None;
                let err = match joined {
                    Ok(Err(err)) => anyhow::Error::from(err),
                    Ok(Ok(())) => anyhow::anyhow!("proxy exited"),
                    Err(err) => anyhow::Error::from(err),
                };
                error!(error = ?err, "Proxy server failed");
                break Err(err);
            }
            Ok(event) = events_rx.recv_async() => {
                debug!(?event, "Received signal event");
                match event {
                    SignalEvent::DumpView => {
                        if let Err(err) = render::print(&updates.borrow()) {
                            break Err(err.into());
                        }
                    }
                    SignalEvent::Refresh => {
                        if !handle.send(ControlEvent::Refresh) {
                            warn!("synchronization loop is not running");
                        }
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("synchronization loop exited");
                    break Ok(());
                }
                if let Err(err) = render::print(&updates.borrow_and_update()) {
                    break Err(err.into());
                }
            }
        }
    };

    cancel.cancel();
    signals.abort();
    handle.join().await?;
    if let Some(task) = proxy_task {
        task.await??;
    }
    outcome
}

/// Resolves when the proxy task ends. Never resolves when the proxy is disabled.
async fn wait_proxy(
    task: &mut Option<JoinHandle<Result<(), rbx_tracker::error::Error>>>,
) -> Result<Result<(), rbx_tracker::error::Error>, JoinError> {
    match task {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}
