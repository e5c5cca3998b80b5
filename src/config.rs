use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Env var holding a JSON object of container name -> probe URL.
pub const HTTP_CHECKS_ENV: &str = "DOCKER_HTTP_CHECKS";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    /// Raw `[http_checks]` table. Kept untyped so a malformed table cannot fail startup;
    /// see [`HttpChecks::from_toml`].
    #[serde(default)]
    pub http_checks: Option<toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    42679
}

fn default_host() -> String {
    "0.0.0.0".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_connect_timeout_ms() -> u64 {
    1000
}

fn default_read_timeout_ms() -> u64 {
    2000
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl ProbeConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorConfig {
    /// Upper bound on containers processed concurrently per poll.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

fn default_max_workers() -> usize {
    crate::aggregator::DEFAULT_MAX_WORKERS
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
        }
    }
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (or `config.toml`). A missing default file means all defaults;
    /// a missing file named explicitly through `CONFIG_FILE` is an error.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::info!("{} not found, using defaults", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Probe mapping: `DOCKER_HTTP_CHECKS` when set and non-blank, otherwise `[http_checks]`.
    pub fn http_checks(&self) -> HttpChecks {
        match std::env::var(HTTP_CHECKS_ENV) {
            Ok(raw) if !raw.trim().is_empty() => HttpChecks::from_json(&raw),
            _ => self
                .http_checks
                .as_ref()
                .map(HttpChecks::from_toml)
                .unwrap_or_default(),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.probe.connect_timeout_ms > 0,
            "probe.connect_timeout_ms must be > 0, got {}",
            self.probe.connect_timeout_ms
        );
        anyhow::ensure!(
            self.probe.read_timeout_ms > 0,
            "probe.read_timeout_ms must be > 0, got {}",
            self.probe.read_timeout_ms
        );
        anyhow::ensure!(
            self.aggregator.max_workers > 0,
            "aggregator.max_workers must be > 0, got {}",
            self.aggregator.max_workers
        );
        Ok(())
    }
}

/// Container name -> probe URL. Immutable once built; containers without an entry are
/// never probed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpChecks {
    urls: HashMap<String, String>,
}

impl HttpChecks {
    pub fn new(urls: HashMap<String, String>) -> Self {
        Self { urls }
    }

    /// Parses a JSON object of string values. Anything else is treated as "no probes".
    pub fn from_json(raw: &str) -> Self {
        let parsed = serde_json::from_str::<HashMap<String, String>>(raw.trim());
        match parsed {
            Ok(urls) => Self::new(urls),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = "load_http_checks",
                    source = HTTP_CHECKS_ENV,
                    "malformed probe mapping, no HTTP probes configured"
                );
                Self::default()
            }
        }
    }

    /// Same contract as [`HttpChecks::from_json`], for the `[http_checks]` TOML table.
    pub fn from_toml(value: &toml::Value) -> Self {
        match value.clone().try_into::<HashMap<String, String>>() {
            Ok(urls) => Self::new(urls),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = "load_http_checks",
                    source = "http_checks",
                    "malformed probe mapping, no HTTP probes configured"
                );
                Self::default()
            }
        }
    }

    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.urls.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl FromIterator<(String, String)> for HttpChecks {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
