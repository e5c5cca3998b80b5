// Per-container status snapshot served to the dashboard

use serde::{Deserialize, Serialize};

/// Placeholder used for every "not applicable" display value.
pub const NOT_APPLICABLE: &str = "-";

/// Merged health signal: what to show and how to style it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub display: String,
    pub class: String,
}

impl Health {
    pub fn none() -> Self {
        Self {
            display: NOT_APPLICABLE.to_string(),
            class: NOT_APPLICABLE.to_string(),
        }
    }
}

/// Field names are consumed as-is by the dashboard widget; keep them snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub name: String,
    pub status: String,
    pub uptime: String,
    pub cpu: f64,
    pub mem: f64,
    pub restarts: u64,
    pub health: String,
    pub health_class: String,
}

impl ContainerSnapshot {
    pub(crate) fn new(
        name: String,
        status: String,
        uptime: String,
        cpu: f64,
        mem: f64,
        restarts: u64,
        health: Health,
    ) -> Self {
        Self {
            name,
            status,
            uptime,
            cpu,
            mem,
            restarts,
            health: health.display,
            health_class: health.class,
        }
    }
}
