// Shared test helpers: in-memory runtime and probe transport

#![allow(dead_code)]

use docker_status::aggregator::Aggregator;
use docker_status::config::HttpChecks;
use docker_status::docker_repo::{ContainerRuntime, RuntimeError};
use docker_status::health::{HealthProber, ProbeError, ProbeTransport};
use docker_status::models::{ContainerRecord, CpuReading, RawResourceSample};
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn running(name: &str) -> ContainerRecord {
    ContainerRecord {
        id: format!("{name}-id"),
        name: name.to_string(),
        status: "running".to_string(),
        restart_count: 0,
        started_at: Some("2020-01-01T00:00:00Z".to_string()),
        health: None,
    }
}

pub fn exited(name: &str) -> ContainerRecord {
    ContainerRecord {
        status: "exited".to_string(),
        started_at: Some("2020-01-01T00:00:00Z".to_string()),
        ..running(name)
    }
}

/// 100/1000 of system time across 4 cores = 40% CPU; 10 MiB memory.
pub fn busy_sample() -> RawResourceSample {
    RawResourceSample {
        cpu: CpuReading {
            total_usage: 1100,
            percpu_usage: vec![0; 4],
            system_usage: 2000,
            online_cpus: Some(4),
        },
        precpu: CpuReading {
            total_usage: 1000,
            percpu_usage: vec![0; 4],
            system_usage: 1000,
            online_cpus: Some(4),
        },
        memory_usage_bytes: Some(10_485_760),
    }
}

#[derive(Default)]
pub struct FakeRuntime {
    pub records: Vec<ContainerRecord>,
    /// Stats per container id; ids missing here fail the stats call.
    pub stats: HashMap<String, RawResourceSample>,
    pub delays: HashMap<String, Duration>,
    /// Ids whose stats call panics mid-flight.
    pub panics: HashSet<String>,
    pub fail_listing: bool,
    pub stats_calls: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeRuntime {
    pub fn new(records: Vec<ContainerRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn with_stats(mut self, id: &str, sample: RawResourceSample) -> Self {
        self.stats.insert(id.to_string(), sample);
        self
    }

    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub fn with_panic(mut self, id: &str) -> Self {
        self.panics.insert(id.to_string());
        self
    }

    pub fn stats_calls(&self) -> Vec<String> {
        self.stats_calls.lock().unwrap().clone()
    }
}

impl ContainerRuntime for FakeRuntime {
    fn list_containers(&self) -> BoxFuture<'_, Result<Vec<ContainerRecord>, RuntimeError>> {
        let result = if self.fail_listing {
            Err(RuntimeError::Other("daemon unreachable".into()))
        } else {
            Ok(self.records.clone())
        };
        async move { result }.boxed()
    }

    fn fetch_stats<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<RawResourceSample, RuntimeError>> {
        async move {
            self.stats_calls.lock().unwrap().push(id.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delays.get(id) {
                tokio::time::sleep(*delay).await;
            }
            if self.panics.contains(id) {
                panic!("stats decoder blew up for {id}");
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.stats
                .get(id)
                .cloned()
                .ok_or_else(|| RuntimeError::NoStats(id.to_string()))
        }
        .boxed()
    }
}

/// Answers probe URLs from a table; unknown URLs fail like a refused connection.
#[derive(Default)]
pub struct FakeTransport {
    pub statuses: HashMap<String, u16>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(statuses: &[(&str, u16)]) -> Self {
        Self {
            statuses: statuses
                .iter()
                .map(|(url, code)| (url.to_string(), *code))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProbeTransport for FakeTransport {
    fn get_status<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<u16, ProbeError>> {
        self.calls.lock().unwrap().push(url.to_string());
        let result = self
            .statuses
            .get(url)
            .copied()
            .ok_or_else(|| ProbeError::Other(format!("connection refused: {url}")));
        async move { result }.boxed()
    }
}

pub fn checks(entries: &[(&str, &str)]) -> Arc<HttpChecks> {
    Arc::new(
        entries
            .iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect(),
    )
}

pub fn aggregator(
    runtime: Arc<FakeRuntime>,
    transport: Arc<FakeTransport>,
    checks: Arc<HttpChecks>,
    max_workers: usize,
) -> Aggregator {
    Aggregator::new(
        runtime,
        HealthProber::new(transport, checks),
        max_workers,
    )
}
