//! Background refresher for polling consumers.
//!
//! Every tick starts an independent fetch-and-derive cycle tagged with a
//! generation number. Cycles may overlap when the feed is slow; the watch
//! channel only ever moves forward, so a cycle that finishes after a newer
//! one has been published is dropped. A failed cycle publishes nothing and
//! the previous snapshot stays current.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cmm_core::config::MaturityConfig;
use cmm_core::derive::Projections;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{fetch_records, FeedSource};

/// Every projection of one successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    pub record_count: usize,
    pub projections: Projections,
}

pub type SnapshotReceiver = watch::Receiver<Option<Arc<Snapshot>>>;
type SnapshotSender = watch::Sender<Option<Arc<Snapshot>>>;

/// Handle to a running poll loop.
pub struct Poller {
    snapshots: SnapshotReceiver,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Poller {
    /// Start polling `source` every `interval`. The first cycle starts
    /// immediately. Cancelling `cancel` (or calling [`Poller::shutdown`])
    /// stops the loop and aborts cycles still in flight.
    pub fn spawn(
        source: Arc<dyn FeedSource>,
        interval: Duration,
        maturity: MaturityConfig,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, snapshots) = watch::channel(None);
        let task = tokio::spawn(run(source, interval, maturity, Arc::new(tx), cancel.clone()));
        Self {
            snapshots,
            cancel,
            task,
        }
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.snapshots.clone()
    }

    /// The most recently published snapshot, if any cycle has succeeded.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.borrow().clone()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(error) = self.task.await {
            tracing::warn!(%error, "poll loop ended abnormally");
        }
    }
}

async fn run(
    source: Arc<dyn FeedSource>,
    interval: Duration,
    maturity: MaturityConfig,
    tx: Arc<SnapshotSender>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cycles = JoinSet::new();
    let mut generation: u64 = 0;

    tracing::info!(source = source.describe(), ?interval, "poller started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                generation += 1;
                cycles.spawn(cycle(
                    generation,
                    Arc::clone(&source),
                    maturity.clone(),
                    Arc::clone(&tx),
                ));
            }
            Some(joined) = cycles.join_next(), if !cycles.is_empty() => {
                if let Err(error) = joined {
                    tracing::warn!(%error, "poll cycle panicked");
                }
            }
        }
    }

    cycles.shutdown().await;
    tracing::info!(generations = generation, "poller stopped");
}

async fn cycle(
    generation: u64,
    source: Arc<dyn FeedSource>,
    maturity: MaturityConfig,
    tx: Arc<SnapshotSender>,
) {
    let records = match fetch_records(source.as_ref()).await {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!(generation, %error, "poll cycle failed, keeping previous snapshot");
            return;
        }
    };

    let fetched_at = Utc::now();
    let snapshot = Arc::new(Snapshot {
        generation,
        fetched_at,
        record_count: records.len(),
        projections: Projections::compute(&records, fetched_at, &maturity),
    });

    if publish(&tx, snapshot) {
        tracing::debug!(generation, records = records.len(), "snapshot published");
    } else {
        tracing::debug!(generation, "discarding superseded poll result");
    }
}

/// Replace the current snapshot unless it is newer than `snapshot`.
fn publish(tx: &SnapshotSender, snapshot: Arc<Snapshot>) -> bool {
    tx.send_if_modified(|current| match current {
        Some(existing) if existing.generation > snapshot.generation => false,
        _ => {
            *current = Some(snapshot);
            true
        }
    })
}
