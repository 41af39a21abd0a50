use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::warn;

use crate::config::{DisplayFilters, NodeDescriptor};
use crate::models::views::{FleetSummary, NodeHealth, NodeStatus, OverallStatus};
use crate::models::wings::UtilizationSample;

use super::{ProbeError, Prober};

/// Outcome of a single node probe. Errors never cross this boundary; an
/// unreachable node is a `Down` value, not a poll failure.
#[derive(Debug)]
pub enum ProbeOutcome {
    Up(UtilizationSample),
    Down(ProbeError),
}

/// Polls every node concurrently and reduces the outcomes into a fleet
/// verdict plus a per-node detail list. Holds no state between polls.
pub struct Aggregator {
    prober: Arc<dyn Prober>,
}

impl Aggregator {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    /// One poll cycle: fan out one bounded probe per descriptor, wait for all
    /// of them, reduce, then apply the display filters. The returned list
    /// preserves descriptor order regardless of probe completion order.
    pub async fn poll(
        &self,
        nodes: &[NodeDescriptor],
        filters: &DisplayFilters,
        timeout: Duration,
    ) -> (FleetSummary, Vec<NodeStatus>) {
        let mut handles = Vec::with_capacity(nodes.len());

        for node in nodes {
            let fut = self.prober.probe(node, timeout);
            let name = node.name.clone();
            handles.push(tokio::spawn(async move {
                match time::timeout(timeout, fut).await {
                    Ok(Ok(sample)) => ProbeOutcome::Up(sample),
                    Ok(Err(e)) => {
                        warn!("probe of {} failed: {}", name, e);
                        ProbeOutcome::Down(e)
                    }
                    Err(_) => {
                        warn!("probe of {} timed out after {:?}", name, timeout);
                        ProbeOutcome::Down(ProbeError::Timeout(timeout))
                    }
                }
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await.unwrap_or(ProbeOutcome::Down(ProbeError::Cancelled)));
        }

        reduce(nodes, &outcomes, filters)
    }
}

fn reduce(
    nodes: &[NodeDescriptor],
    outcomes: &[ProbeOutcome],
    filters: &DisplayFilters,
) -> (FleetSummary, Vec<NodeStatus>) {
    let total_nodes = nodes.len();
    let mut healthy_nodes = 0;
    let mut cpu_sum = 0.0;
    let mut memory_sum = 0.0;
    let mut entries = Vec::with_capacity(total_nodes);

    for (node, outcome) in nodes.iter().zip(outcomes) {
        let name = if filters.show_node_names {
            node.name.clone()
        } else {
            // numbered over entries emitted so far
            format!("Node {}", entries.len() + 1)
        };

        let location = if filters.show_locations {
            node.location.clone()
        } else {
            None
        };

        let mut entry = NodeStatus {
            name,
            location,
            status: NodeHealth::Unhealthy,
            cpu_percent: None,
            memory_percent: None,
            disk_percent: None,
            error: None,
        };

        match outcome {
            ProbeOutcome::Up(sample) => {
                healthy_nodes += 1;
                entry.status = NodeHealth::Healthy;

                // a healthy node missing a metric contributes nothing to
                // that metric's sum but still counts in the divisor
                if let Some(cpu) = sample.cpu_percent {
                    cpu_sum += cpu;
                }
                if let Some(mem) = sample.memory_percent() {
                    memory_sum += mem;
                }

                if filters.show_resource_usage {
                    entry.cpu_percent = sample.cpu_percent.map(round2);
                    entry.memory_percent = sample.memory_percent().map(round2);
                    entry.disk_percent = sample.disk_percent().map(round2);
                }
            }
            ProbeOutcome::Down(_) => {
                entry.error = Some("Connection failed".to_string());
            }
        }

        entries.push(entry);
    }

    let (avg_cpu, avg_memory) = if healthy_nodes > 0 {
        (
            round2(cpu_sum / healthy_nodes as f64),
            round2(memory_sum / healthy_nodes as f64),
        )
    } else {
        (0.0, 0.0)
    };

    let summary = FleetSummary {
        overall_status: OverallStatus::from_counts(healthy_nodes, total_nodes),
        healthy_nodes,
        total_nodes,
        avg_cpu_percent: filters.show_resource_usage.then_some(avg_cpu),
        avg_memory_percent: filters.show_resource_usage.then_some(avg_memory),
    };

    (summary, entries)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
