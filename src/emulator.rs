//! The emulation loop.
//!
//! One iteration: sleep a random interval, draw one shared random offset,
//! fetch one row per table kind, serialize each, dispatch every surviving
//! record to every configured destination, and go idle again. No component
//! returns data upstream; this is a fire-and-forget producer.

use crate::config::DestinationNames;
use emulator_core::{serialize_record, RecordSource, TableKind};
use emulator_sink::Sink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Default upper bound (inclusive) for the random sampling offset.
pub const DEFAULT_MAX_OFFSET: u64 = 11_000;

/// Default upper bound (exclusive) for the random idle sleep.
pub const DEFAULT_MAX_SLEEP: Duration = Duration::from_secs(2);

/// One configured streaming destination: a transport client plus the
/// per-kind stream or topic names it serves.
pub struct Destination {
    /// Transport client.
    pub sink: Box<dyn Sink>,
    /// Stream or topic name per record kind.
    pub names: DestinationNames,
}

/// The top-level emulation driver.
///
/// Owns the record source handle, the destinations, and an explicitly seeded
/// random generator so a given seed reproduces the same offset and sleep
/// sequence in tests and in production runs.
pub struct Emulator {
    source: Arc<dyn RecordSource>,
    destinations: Vec<Destination>,
    rng: StdRng,
    max_sleep: Duration,
    max_offset: u64,
    concurrent_dispatch: bool,
    max_iterations: Option<u64>,
}

impl Emulator {
    /// Create an emulator with default cadence bounds.
    pub fn new(source: Arc<dyn RecordSource>, destinations: Vec<Destination>, seed: u64) -> Self {
        Self {
            source,
            destinations,
            rng: StdRng::seed_from_u64(seed),
            max_sleep: DEFAULT_MAX_SLEEP,
            max_offset: DEFAULT_MAX_OFFSET,
            concurrent_dispatch: false,
            max_iterations: None,
        }
    }

    /// Set the upper bound (exclusive) for the random idle sleep.
    pub fn with_max_sleep(mut self, max_sleep: Duration) -> Self {
        self.max_sleep = max_sleep;
        self
    }

    /// Set the upper bound (inclusive) for the random sampling offset.
    pub fn with_max_offset(mut self, max_offset: u64) -> Self {
        self.max_offset = max_offset;
        self
    }

    /// Dispatch the kinds of one iteration concurrently. All dispatches of
    /// an iteration still complete before the next iteration samples.
    pub fn with_concurrent_dispatch(mut self, concurrent: bool) -> Self {
        self.concurrent_dispatch = concurrent;
        self
    }

    /// Stop after this many iterations instead of running unbounded.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Run until shutdown is signalled or the iteration cap is reached.
    ///
    /// A shutdown during the idle sleep means no further sampling or
    /// dispatch; a shutdown during an iteration lets it finish first, so no
    /// envelope is ever abandoned mid-send. Returns the number of completed
    /// iterations.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> anyhow::Result<u64> {
        let mut iterations = 0u64;

        loop {
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                break;
            }

            let pause = self.random_pause();
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(pause) => {}
            }

            let offset = self.rng.gen_range(0..=self.max_offset);
            tracing::debug!(iteration = iterations, offset, "sampling one row per table");

            let batch = self.sample(offset).await;
            self.dispatch(&batch).await;

            iterations += 1;
        }

        tracing::info!(iterations, "emulator stopped");
        Ok(iterations)
    }

    fn random_pause(&mut self) -> Duration {
        let max_ms = self.max_sleep.as_millis() as u64;
        if max_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(self.rng.gen_range(0..max_ms))
        }
    }

    /// Fetch and serialize one record per kind at the shared offset.
    ///
    /// A kind whose offset lies beyond the table, whose fetch fails, or
    /// whose record cannot be serialized is skipped for this iteration only;
    /// nothing is carried over from earlier iterations.
    async fn sample(&self, offset: u64) -> Vec<(TableKind, serde_json::Value)> {
        let mut batch = Vec::with_capacity(TableKind::ALL.len());
        for kind in TableKind::ALL {
            match self.source.fetch_one(kind, offset).await {
                Ok(Some(record)) => match serialize_record(&record) {
                    Ok(json) => batch.push((kind, json)),
                    Err(e) => {
                        tracing::warn!(%kind, offset, error = %e, "record failed to serialize, skipping kind this iteration");
                    }
                },
                Ok(None) => {
                    tracing::warn!(%kind, offset, "offset beyond table size, skipping kind this iteration");
                }
                Err(e) => {
                    tracing::warn!(%kind, offset, error = %e, "fetch failed, skipping kind this iteration");
                }
            }
        }
        batch
    }

    /// Attempt one delivery per (kind, destination) pair. Dispatches are
    /// independent: a failed pair never blocks the others.
    async fn dispatch(&self, batch: &[(TableKind, serde_json::Value)]) {
        if self.concurrent_dispatch {
            let sends = self.destinations.iter().flat_map(|destination| {
                batch
                    .iter()
                    .map(move |(kind, record)| dispatch_one(destination, *kind, record))
            });
            futures::future::join_all(sends).await;
        } else {
            for destination in &self.destinations {
                for (kind, record) in batch {
                    dispatch_one(destination, *kind, record).await;
                }
            }
        }
    }
}

async fn dispatch_one(destination: &Destination, kind: TableKind, record: &serde_json::Value) {
    let name = destination.names.for_kind(kind);
    let transport = destination.sink.transport();
    match destination.sink.send(name, record).await {
        Ok(()) => {
            tracing::debug!(%kind, destination = name, transport, "record delivered");
        }
        Err(e) => {
            tracing::warn!(%kind, destination = name, transport, error = %e, "delivery failed");
        }
    }
}

/// Install a Ctrl+C handler and return the receiver the loop selects on.
pub fn setup_shutdown_handler() -> broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("Received interrupt signal (Ctrl+C)");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}
