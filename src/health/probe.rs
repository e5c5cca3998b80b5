// HTTP probes against per-container URLs from the probe mapping.

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::config::{HttpChecks, ProbeConfig};
use crate::models::NOT_APPLICABLE;

/// Errors from a probe transport. Never leave [`HealthProber`]; they classify as a failed probe.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("probe transport: {0}")]
    Other(String),
}

/// Issues a GET and reports the response status code.
pub trait ProbeTransport: Send + Sync {
    fn get_status<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<u16, ProbeError>>;
}

/// Production transport: one shared reqwest client with short connect/read timeouts.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl ProbeTransport for ReqwestTransport {
    fn get_status<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<u16, ProbeError>> {
        async move {
            let response = self.client.get(url).send().await?;
            Ok(response.status().as_u16())
        }
        .boxed()
    }
}

/// Result of probing one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// No URL configured for the container (or it is not running); distinct from a failed probe.
    NotConfigured,
    Ok,
    Status(u16),
    Failed,
}

impl ProbeOutcome {
    pub fn from_status(code: u16) -> Self {
        if code == 200 {
            ProbeOutcome::Ok
        } else {
            ProbeOutcome::Status(code)
        }
    }

    pub fn display(&self) -> String {
        match self {
            ProbeOutcome::NotConfigured => NOT_APPLICABLE.to_string(),
            ProbeOutcome::Ok => "HTTP OK".to_string(),
            ProbeOutcome::Status(code) => format!("HTTP {code}"),
            ProbeOutcome::Failed => "HTTP FAIL".to_string(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ProbeOutcome::NotConfigured => "",
            ProbeOutcome::Ok => "healthy",
            ProbeOutcome::Status(_) | ProbeOutcome::Failed => "unhealthy",
        }
    }

    pub fn is_configured(&self) -> bool {
        *self != ProbeOutcome::NotConfigured
    }
}

#[derive(Clone)]
pub struct HealthProber {
    transport: Arc<dyn ProbeTransport>,
    checks: Arc<HttpChecks>,
}

impl HealthProber {
    pub fn new(transport: Arc<dyn ProbeTransport>, checks: Arc<HttpChecks>) -> Self {
        Self { transport, checks }
    }

    pub async fn probe(&self, name: &str) -> ProbeOutcome {
        let Some(url) = self.checks.url_for(name) else {
            return ProbeOutcome::NotConfigured;
        };
        match self.transport.get_status(url).await {
            Ok(code) => ProbeOutcome::from_status(code),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    operation = "http_probe",
                    container = name,
                    url,
                    "probe failed"
                );
                ProbeOutcome::Failed
            }
        }
    }
}
