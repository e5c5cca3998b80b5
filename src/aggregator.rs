// Fan-out of snapshot building across a bounded worker pool.
//
// Workers claim listing indices from a shared cursor and send back (index, snapshot);
// results land in a pre-sized buffer at their index, so output order is listing order
// no matter which worker finishes first.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::instrument;

use crate::docker_repo::{ContainerRuntime, RuntimeError};
use crate::health::HealthProber;
use crate::models::{ContainerRecord, ContainerSnapshot};
use crate::snapshot::{SnapshotBuilder, fallback_snapshot};

/// Default ceiling on containers processed at once.
pub const DEFAULT_MAX_WORKERS: usize = 8;

pub struct Aggregator {
    runtime: Arc<dyn ContainerRuntime>,
    builder: SnapshotBuilder,
    max_workers: usize,
}

impl Aggregator {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        prober: HealthProber,
        max_workers: usize,
    ) -> Self {
        Self {
            builder: SnapshotBuilder::new(runtime.clone(), prober),
            runtime,
            max_workers: max_workers.max(1),
        }
    }

    /// Pool size for a listing of `containers` entries.
    pub fn worker_count(&self, containers: usize) -> usize {
        self.max_workers.min(containers)
    }

    /// One snapshot per container, in listing order. Only a failed listing is an error;
    /// everything that goes wrong for a single container is folded into its snapshot.
    #[instrument(skip(self), fields(operation = "aggregate"))]
    pub async fn aggregate(&self) -> Result<Vec<ContainerSnapshot>, RuntimeError> {
        let records = self.runtime.list_containers().await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.fan_out(records).await)
    }

    async fn fan_out(&self, records: Vec<ContainerRecord>) -> Vec<ContainerSnapshot> {
        let total = records.len();
        let workers = self.worker_count(total);
        let records = Arc::new(records);
        let cursor = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, ContainerSnapshot)>();

        let mut set = JoinSet::new();
        for _ in 0..workers {
            let records = records.clone();
            let cursor = cursor.clone();
            let builder = self.builder.clone();
            let tx = tx.clone();
            set.spawn(async move {
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(record) = records.get(index) else {
                        break;
                    };
                    // A panic stays with its container; the worker moves on to the next index.
                    let snapshot = match AssertUnwindSafe(builder.build(record))
                        .catch_unwind()
                        .await
                    {
                        Ok(snapshot) => snapshot,
                        Err(_) => {
                            tracing::warn!(
                                operation = "build_snapshot",
                                container = %record.name,
                                "snapshot build panicked, using fallback"
                            );
                            fallback_snapshot(record)
                        }
                    };
                    if tx.send((index, snapshot)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        while let Some(joined) = set.join_next().await {
            if let Err(e) = joined {
                tracing::warn!(error = %e, operation = "aggregate", "snapshot worker died");
            }
        }

        let mut slots: Vec<Option<ContainerSnapshot>> = vec![None; total];
        while let Some((index, snapshot)) = rx.recv().await {
            slots[index] = Some(snapshot);
        }

        tracing::debug!(containers = total, workers, "aggregation complete");

        slots
            .into_iter()
            .zip(records.iter())
            .map(|(slot, record)| slot.unwrap_or_else(|| fallback_snapshot(record)))
            .collect()
    }
}
