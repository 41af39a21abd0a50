use serde::Serialize;

/// Fleet-wide roll-up returned by `/api/status/summary`.
///
/// The average fields are `None` only when resource display is filtered off;
/// with no healthy nodes they are reported as `0.0`, matching the panel's
/// public JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub overall_status: OverallStatus,
    pub healthy_nodes: usize,
    pub total_nodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cpu_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_memory_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Operational,
    Degraded,
    Down,
}

impl OverallStatus {
    /// `down` iff nothing is healthy in a non-empty fleet; `operational` iff
    /// everything is (vacuously true for an empty fleet).
    pub fn from_counts(healthy: usize, total: usize) -> Self {
        if total > 0 && healthy == 0 {
            OverallStatus::Down
        } else if healthy == total {
            OverallStatus::Operational
        } else {
            OverallStatus::Degraded
        }
    }
}

/// Per-node entry returned by `/api/status/nodes`. Metric fields serialize as
/// explicit `null` when the probe failed or resource display is filtered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStatus {
    pub name: String,
    pub location: Option<String>,
    pub status: NodeHealth,
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
    pub disk_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeHealth {
    Healthy,
    Unhealthy,
}
