// Conversions from raw Docker API responses into runtime-neutral models.

use crate::models::{ContainerRecord, CpuReading, RawResourceSample};
use bollard::models::{
    ContainerCpuStats, ContainerInspectResponse, ContainerStatsResponse, ContainerSummary,
};

fn cpu_reading(stats: Option<&ContainerCpuStats>) -> CpuReading {
    let Some(stats) = stats else {
        return CpuReading::default();
    };
    let usage = stats.cpu_usage.as_ref();
    CpuReading {
        total_usage: usage.and_then(|u| u.total_usage).unwrap_or(0),
        percpu_usage: usage
            .and_then(|u| u.percpu_usage.clone())
            .unwrap_or_default(),
        system_usage: stats.system_cpu_usage.unwrap_or(0),
        online_cpus: stats.online_cpus,
    }
}

/// Process a raw Docker stats response into a RawResourceSample. Missing sections read as zero.
pub(crate) fn sample_from_response(s: &ContainerStatsResponse) -> RawResourceSample {
    RawResourceSample {
        cpu: cpu_reading(s.cpu_stats.as_ref()),
        precpu: cpu_reading(s.precpu_stats.as_ref()),
        memory_usage_bytes: s.memory_stats.as_ref().and_then(|m| m.usage),
    }
}

fn trim_name(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

/// Record built from list data only (inspect failed or raced with removal).
pub(crate) fn record_from_summary(c: &ContainerSummary) -> ContainerRecord {
    let id = c.id.clone().unwrap_or_default();
    let name = c
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| trim_name(n))
        .unwrap_or_else(|| id.clone());
    ContainerRecord {
        id,
        name,
        status: c.state.as_ref().map(|s| s.to_string()).unwrap_or_default(),
        restart_count: 0,
        started_at: None,
        health: None,
    }
}

pub(crate) fn record_from_inspect(
    summary: &ContainerSummary,
    details: &ContainerInspectResponse,
) -> ContainerRecord {
    let fallback = record_from_summary(summary);
    let state = details.state.as_ref();
    let status = state
        .and_then(|s| s.status.as_ref())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback.status);
    let health = state
        .and_then(|s| s.health.as_ref())
        .and_then(|h| h.status.as_ref())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty());
    ContainerRecord {
        id: details.id.clone().unwrap_or(fallback.id),
        name: details
            .name
            .as_deref()
            .map(trim_name)
            .unwrap_or(fallback.name),
        status,
        restart_count: details.restart_count.unwrap_or(0).max(0) as u64,
        started_at: state.and_then(|s| s.started_at.clone()),
        health,
    }
}
