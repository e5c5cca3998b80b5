// Health classification: our own HTTP probes merged with the runtime's health checks

mod merge;
mod probe;

pub use merge::merge;
pub use probe::{HealthProber, ProbeError, ProbeOutcome, ProbeTransport, ReqwestTransport};
