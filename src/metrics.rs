// CPU and memory figures from a raw Docker stats sample.

use crate::models::RawResourceSample;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of cores the CPU delta is spread over. Hosts on cgroup v2 report no per-core
/// entries, so fall back to the online CPU count there.
fn core_count(sample: &RawResourceSample) -> u32 {
    match sample.cpu.percpu_usage.len() {
        0 => sample.cpu.online_cpus.unwrap_or(0),
        n => u32::try_from(n).unwrap_or(u32::MAX),
    }
}

/// CPU utilisation between the previous and current reading, in percent of one core.
/// Degenerate samples (counter reset, no elapsed system time) yield 0.0.
pub fn cpu_percent(sample: &RawResourceSample) -> f64 {
    let cpu_delta = sample.cpu.total_usage as i128 - sample.precpu.total_usage as i128;
    let system_delta = sample.cpu.system_usage as i128 - sample.precpu.system_usage as i128;
    if system_delta > 0 && cpu_delta > 0 {
        let cores = core_count(sample) as f64;
        round2((cpu_delta as f64 / system_delta as f64) * cores * 100.0)
    } else {
        0.0
    }
}

/// Memory usage in megabytes (MiB); a missing usage counter counts as zero.
pub fn mem_megabytes(sample: &RawResourceSample) -> f64 {
    let usage = sample.memory_usage_bytes.unwrap_or(0);
    round2(usage as f64 / BYTES_PER_MEGABYTE)
}
