// Container runtime capability and its Docker implementation via bollard

mod stats;

use crate::aggregator::DEFAULT_MAX_WORKERS;
use crate::models::{ContainerRecord, RawResourceSample};
use bollard::Docker;
use bollard::query_parameters::{InspectContainerOptions, ListContainersOptions, StatsOptions};
use futures_util::future::{BoxFuture, FutureExt};
use futures_util::{StreamExt, stream};
use std::future::Future;
use tracing::{instrument, warn};

/// Errors from the container runtime.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("docker api: {0}")]
    Docker(#[from] bollard::errors::Error),

    #[error("no stats sample returned for container {0}")]
    NoStats(String),

    #[error("runtime error: {0}")]
    Other(String),
}

/// What the status engine needs from a container runtime. Shared across workers, so
/// implementations must be reentrant.
pub trait ContainerRuntime: Send + Sync {
    /// All containers, stopped ones included, in the runtime's listing order.
    fn list_containers(&self) -> BoxFuture<'_, Result<Vec<ContainerRecord>, RuntimeError>>;

    /// One non-streaming resource sample for a container.
    fn fetch_stats<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<RawResourceSample, RuntimeError>>;
}

/// Runs `f` over `items` with at most `limit` calls in flight. Results keep input order.
async fn bounded_in_order<T, R, F, Fut>(
    items: impl IntoIterator<Item = T>,
    limit: usize,
    f: F,
) -> Vec<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
{
    stream::iter(items).map(f).buffered(limit.max(1)).collect().await
}

pub struct DockerRepo {
    docker: Docker,
    inspect_limit: usize,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self {
            docker,
            inspect_limit: DEFAULT_MAX_WORKERS,
        })
    }

    /// Cap on concurrent inspect calls while listing; matches the aggregator's worker ceiling.
    pub fn with_inspect_limit(mut self, limit: usize) -> Self {
        self.inspect_limit = limit.max(1);
        self
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "list_containers"))]
    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let summaries = self.docker.list_containers(Some(options)).await?;

        // Restart count, start time and health only come with inspect data.
        let ids: Vec<String> = summaries.iter().map(|s| s.id.clone().unwrap_or_default()).collect();
        let inspections = bounded_in_order(ids, self.inspect_limit, |id: String| {
            let docker = self.docker.clone();
            async move {
                docker
                    .inspect_container(&id, None::<InspectContainerOptions>)
                    .await
            }
        })
        .await;

        Ok(summaries
            .iter()
            .zip(inspections)
            .map(|(summary, inspected)| match inspected {
                Ok(details) => stats::record_from_inspect(summary, &details),
                Err(e) => {
                    let record = stats::record_from_summary(summary);
                    warn!(
                        error = %e,
                        operation = "inspect_container",
                        container = %record.name,
                        "inspect failed, using listing data"
                    );
                    record
                }
            })
            .collect())
    }

    async fn sample_stats(&self, id: &str) -> Result<RawResourceSample, RuntimeError> {
        // one_shot must stay false: Docker only fills precpu_stats after a second sample.
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(id, Some(options));
        match stream.next().await {
            Some(Ok(response)) => Ok(stats::sample_from_response(&response)),
            Some(Err(e)) => Err(e.into()),
            None => Err(RuntimeError::NoStats(id.to_string())),
        }
    }
}

impl ContainerRuntime for DockerRepo {
    fn list_containers(&self) -> BoxFuture<'_, Result<Vec<ContainerRecord>, RuntimeError>> {
        self.list_all().boxed()
    }

    fn fetch_stats<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<RawResourceSample, RuntimeError>> {
        self.sample_stats(id).boxed()
    }
}
