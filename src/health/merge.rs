// Precedence between our HTTP probe and the runtime's native health check.

use super::ProbeOutcome;
use crate::models::Health;
use crate::models::NOT_APPLICABLE;

/// A configured probe wins outright, failed or not; otherwise the native status is used for
/// both display and class. A missing or empty native status reads as "-".
pub fn merge(native: Option<&str>, probe: ProbeOutcome) -> Health {
    if probe.is_configured() {
        return Health {
            display: probe.display(),
            class: probe.class().to_string(),
        };
    }
    let native = native
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_APPLICABLE);
    Health {
        display: native.to_string(),
        class: native.to_string(),
    }
}
