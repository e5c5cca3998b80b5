// Container models as reported by the runtime

/// Docker container state, parsed from the runtime's status token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

impl ContainerState {
    /// Parse from Docker API state string (e.g. "running", "exited").
    pub fn from_docker(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "exited" => ContainerState::Exited,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Unknown,
        }
    }

    pub fn is_running(self) -> bool {
        self == ContainerState::Running
    }
}

/// One container from the runtime listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    /// Container name without the leading `/` Docker puts in front of it.
    pub name: String,
    /// Status token exactly as the runtime reported it.
    pub status: String,
    pub restart_count: u64,
    /// RFC 3339 start time, if the container was ever started.
    pub started_at: Option<String>,
    /// Native health-check status ("healthy", "starting", ...); `None` without a health check.
    pub health: Option<String>,
}

impl ContainerRecord {
    pub fn state(&self) -> ContainerState {
        ContainerState::from_docker(&self.status)
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }
}

/// Cumulative CPU counters taken at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuReading {
    pub total_usage: u64,
    pub percpu_usage: Vec<u64>,
    pub system_usage: u64,
    pub online_cpus: Option<u32>,
}

/// A single non-streaming stats sample: two CPU readings plus memory usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResourceSample {
    pub cpu: CpuReading,
    pub precpu: CpuReading,
    pub memory_usage_bytes: Option<u64>,
}
