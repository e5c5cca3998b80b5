// Domain models: runtime inputs and per-container snapshots

mod container;
mod snapshot;

pub use container::{ContainerRecord, ContainerState, CpuReading, RawResourceSample};
pub use snapshot::{ContainerSnapshot, Health, NOT_APPLICABLE};
