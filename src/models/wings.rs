use serde::Deserialize;

/// Resource utilization as reported by one Wings daemon. Individual metrics
/// may be absent from the payload; a missing metric is reported as
/// unavailable while the node itself stays healthy. Only a connection
/// failure, a malformed body, or a fully empty structure marks the node
/// unhealthy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UtilizationSample {
    pub cpu_percent: Option<f64>,
    pub memory_used: Option<u64>,
    pub memory_total: Option<u64>,
    pub disk_used: Option<u64>,
    pub disk_total: Option<u64>,
}

impl UtilizationSample {
    pub fn memory_percent(&self) -> Option<f64> {
        ratio_percent(self.memory_used, self.memory_total)
    }

    pub fn disk_percent(&self) -> Option<f64> {
        ratio_percent(self.disk_used, self.disk_total)
    }

    /// An empty utilization structure carries no telemetry at all and is
    /// treated as a probe failure, not a healthy node.
    pub fn is_empty(&self) -> bool {
        self.cpu_percent.is_none()
            && self.memory_used.is_none()
            && self.memory_total.is_none()
            && self.disk_used.is_none()
            && self.disk_total.is_none()
    }
}

// A missing or zero total means the metric is unavailable, not that usage
// is zero.
fn ratio_percent(used: Option<u64>, total: Option<u64>) -> Option<f64> {
    match (used, total) {
        (Some(used), Some(total)) if total > 0 => Some(used as f64 / total as f64 * 100.0),
        _ => None,
    }
}
