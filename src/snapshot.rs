// Builds one container's snapshot: metrics, uptime, merged health.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::docker_repo::ContainerRuntime;
use crate::health::{self, HealthProber, ProbeOutcome};
use crate::metrics;
use crate::models::{ContainerRecord, ContainerSnapshot, Health, NOT_APPLICABLE};

/// Elapsed time as `H:MM:SS`, prefixed with `N day, ` / `N days, ` past 24 hours.
/// Negative durations (start time ahead of our clock) clamp to zero.
pub fn format_uptime(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Uptime display for a running container started at `started_at` (RFC 3339), or "-".
pub fn uptime(started_at: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = started_at else {
        return NOT_APPLICABLE.to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(start) => format_uptime(now.signed_duration_since(start.with_timezone(&Utc))),
        Err(e) => {
            tracing::debug!(error = %e, started_at = raw, "unparseable start time");
            NOT_APPLICABLE.to_string()
        }
    }
}

/// Snapshot for a container whose build never completed: no metrics, no health signal.
pub fn fallback_snapshot(record: &ContainerRecord) -> ContainerSnapshot {
    ContainerSnapshot::new(
        record.name.clone(),
        record.status.clone(),
        NOT_APPLICABLE.to_string(),
        0.0,
        0.0,
        record.restart_count,
        Health::none(),
    )
}

#[derive(Clone)]
pub struct SnapshotBuilder {
    runtime: Arc<dyn ContainerRuntime>,
    prober: HealthProber,
}

impl SnapshotBuilder {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, prober: HealthProber) -> Self {
        Self { runtime, prober }
    }

    pub async fn build(&self, record: &ContainerRecord) -> ContainerSnapshot {
        self.build_at(record, Utc::now()).await
    }

    /// Stopped containers are never sampled or probed: zero metrics, uptime "-".
    pub async fn build_at(
        &self,
        record: &ContainerRecord,
        now: DateTime<Utc>,
    ) -> ContainerSnapshot {
        let running = record.is_running();

        let (cpu, mem) = if running {
            self.resource_usage(record).await
        } else {
            (0.0, 0.0)
        };

        let uptime = if running {
            uptime(record.started_at.as_deref(), now)
        } else {
            NOT_APPLICABLE.to_string()
        };

        let probe = if running {
            self.prober.probe(&record.name).await
        } else {
            ProbeOutcome::NotConfigured
        };
        let health = health::merge(record.health.as_deref(), probe);

        ContainerSnapshot::new(
            record.name.clone(),
            record.status.clone(),
            uptime,
            cpu,
            mem,
            record.restart_count,
            health,
        )
    }

    /// (cpu %, mem MiB); a failed stats call reads as zero usage.
    async fn resource_usage(&self, record: &ContainerRecord) -> (f64, f64) {
        match self.runtime.fetch_stats(&record.id).await {
            Ok(sample) => (metrics::cpu_percent(&sample), metrics::mem_megabytes(&sample)),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    operation = "fetch_stats",
                    container = %record.name,
                    "stats unavailable, reporting zero usage"
                );
                (0.0, 0.0)
            }
        }
    }
}
