pub mod aggregator;

use futures_util::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::NodeDescriptor;
use crate::models::wings::UtilizationSample;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("daemon returned {0}")]
    Status(reqwest::StatusCode),
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
    #[error("empty utilization payload")]
    Empty,
    #[error("probe task cancelled")]
    Cancelled,
}

/// Fetches one utilization sample for one node. Injected into the aggregator
/// so tests can substitute a deterministic fake.
pub trait Prober: Send + Sync {
    fn probe(
        &self,
        node: &NodeDescriptor,
        timeout: Duration,
    ) -> BoxFuture<'static, Result<UtilizationSample, ProbeError>>;
}

/// Real prober: one authenticated GET against the node's Wings daemon.
pub struct WingsProber {
    http: Client,
}

impl WingsProber {
    pub fn new() -> Result<Self, reqwest::Error> {
        // No client-wide timeout; each probe carries its own per-request bound.
        let http = Client::builder().build()?;
        Ok(Self { http })
    }
}

impl Prober for WingsProber {
    fn probe(
        &self,
        node: &NodeDescriptor,
        timeout: Duration,
    ) -> BoxFuture<'static, Result<UtilizationSample, ProbeError>> {
        let url = format!(
            "{}://{}:{}/api/system/utilization",
            node.scheme, node.fqdn, node.daemon_port
        );
        let req = self
            .http
            .get(url)
            .bearer_auth(&node.daemon_token)
            .header("Accept", "application/json")
            .timeout(timeout);

        Box::pin(async move {
            let resp = req.send().await?;
            if !resp.status().is_success() {
                return Err(ProbeError::Status(resp.status()));
            }
            let sample = resp.json::<UtilizationSample>().await?;
            if sample.is_empty() {
                return Err(ProbeError::Empty);
            }
            Ok(sample)
        })
    }
}
