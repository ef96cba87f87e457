#![forbid(unsafe_code)]

use crate::clock::Clock;
use crate::error::Error;
use crate::fingerprint::Fingerprint;
use crate::source::RemoteSource;
use crate::view::ViewState;
use config::Config;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, info, warn};

pub struct Services {
    pub source: Box<dyn RemoteSource + Send + Sync>,
    pub clock: Box<dyn Clock + Send + Sync>,
}

/// User intents fed back into the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    SelectCategory(String),
    OpenDetail(String),
    CloseDetail,
    /// Run a tick now instead of waiting for the interval.
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    Applied { records: usize },
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    Changed,
    Unchanged,
    Failed(String),
    /// Not attempted because the listing fetch failed.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick_id: u64,
    pub listing: ListingOutcome,
    pub versions: VersionOutcome,
}

impl TickReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.listing, ListingOutcome::Failed(_))
    }
}

pub struct SyncEngine {
    interval: Duration,
    services: Services,
    state: ViewState,
    tick_id: u64,
    updates: watch::Sender<ViewState>,
}

impl SyncEngine {
    /// Create an engine in the loading state. Nothing is fetched yet.
    pub fn new(config: &Config, services: Services) -> Self {
        let state = ViewState::new(config.polling.default_category.clone());
        let (updates, _) = watch::channel(state.clone());
        Self {
            interval: config.polling.interval,
            services,
            state,
            tick_id: 0,
            updates,
        }
    }

    /// Receiver of view snapshots, notified whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.updates.subscribe()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Execute a single fetch/compare/apply cycle without sleeping.
    pub async fn tick(&mut self) -> TickReport {
        self.tick_id = self.tick_id.saturating_add(1);
        let span = debug_span!("tick", id = self.tick_id);
        self.tick_inner().instrument(span).await
    }

    async fn tick_inner(&mut self) -> TickReport {
        let tick_id = self.tick_id;

        let records = match self.services.source.fetch_listings().await {
            Ok(payload) => payload.into_records(),
            Err(err) => {
                warn!(%err, "listing fetch failed");
                let message = err.to_string();
                if self.state.fail(message.clone()) {
                    self.publish();
                }
                return TickReport {
                    tick_id,
                    listing: ListingOutcome::Failed(message),
                    versions: VersionOutcome::Skipped,
                };
            }
        };

        let mut changed = self.state.clear_error();
        let fingerprint = Fingerprint::of_listing(&records);
        let listing_changed = self.state.listing_fingerprint() != Some(&fingerprint);

        let versions = match self.services.source.fetch_versions().await {
            Ok(snapshot) => {
                let version_fingerprint = Fingerprint::of_versions(&snapshot);
                if self.state.version_fingerprint() == Some(&version_fingerprint) {
                    VersionOutcome::Unchanged
                } else {
                    self.state.apply_versions(snapshot, version_fingerprint);
                    changed = true;
                    info!("client versions changed");
                    VersionOutcome::Changed
                }
            }
            Err(err) => {
                warn!(%err, "version fetch failed, keeping previous snapshot");
                VersionOutcome::Failed(err.to_string())
            }
        };

        // The first successful tick applies even if the fingerprint matches.
        let listing = if listing_changed || self.state.is_loading() {
            let count = records.len();
            let now = self.services.clock.utc_now();
            self.state.apply_listing(records, fingerprint, now);
            changed = true;
            info!(records = count, "listing applied");
            ListingOutcome::Applied { records: count }
        } else {
            debug!("listing unchanged");
            ListingOutcome::Unchanged
        };

        if changed {
            self.publish();
        }

        TickReport {
            tick_id,
            listing,
            versions,
        }
    }

    /// Run ticks until the cancellation token is triggered.
    ///
    /// The first tick fires immediately. A tick that has started always
    /// completes; cancellation only prevents the next one.
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    ) {
        let mut control_open = true;

        'ticks: while !cancel.is_cancelled() {
            let tick_start = self.services.clock.now();
            let report = self.tick().await;
            debug!(?report, "tick finished");

            loop {
                let elapsed = self
                    .services
                    .clock
                    .now()
                    .saturating_duration_since(tick_start);
                let Some(remaining) = self
                    .interval
                    .checked_sub(elapsed)
                    .filter(|remaining| !remaining.is_zero())
                else {
                    continue 'ticks;
                };

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break 'ticks,
                    event = control_rx.recv(), if control_open => match event {
                        Some(event) => {
                            if self.handle_control(event) {
                                continue 'ticks;
                            }
                        }
                        None => control_open = false,
                    },
                    _ = self.services.clock.sleep(remaining) => continue 'ticks,
                }
            }
        }

        info!("synchronization stopped");
    }

    /// Move the engine onto its own task.
    pub fn spawn(mut self, cancel: CancellationToken) -> SyncHandle {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let updates = self.subscribe();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            self.run_until(task_cancel, control_rx).await;
        });
        SyncHandle {
            cancel,
            control: control_tx,
            updates,
            task,
        }
    }

    /// Apply a user intent. Returns `true` when a tick was requested.
    fn handle_control(&mut self, event: ControlEvent) -> bool {
        debug!(?event, "control event");
        let changed = match event {
            ControlEvent::Refresh => return true,
            ControlEvent::SelectCategory(category) => self.state.select_category(category),
            ControlEvent::OpenDetail(id) => {
                let opened = self.state.open_detail(&id);
                if !opened {
                    warn!(%id, "no card with this id");
                }
                opened
            }
            ControlEvent::CloseDetail => self.state.close_detail(),
        };
        if changed {
            self.publish();
        }
        false
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

/// Control surface of a spawned [`SyncEngine`].
pub struct SyncHandle {
    cancel: CancellationToken,
    control: mpsc::UnboundedSender<ControlEvent>,
    updates: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Prevent any further tick. A tick in flight still completes.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns `false` once the loop has exited.
    pub fn send(&self, event: ControlEvent) -> bool {
        self.control.send(event).is_ok()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.updates.clone()
    }

    pub async fn join(self) -> Result<(), Error> {
        self.task.await?;
        Ok(())
    }
}
