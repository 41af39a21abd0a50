use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;
use crate::models::views::{FleetSummary, NodeStatus};

#[derive(Serialize)]
struct SummaryResponse {
    summary: FleetSummary,
    generated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct NodesResponse {
    nodes: Vec<NodeStatus>,
    generated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct ConfigResponse {
    config: PublicStatusConfig,
}

/// Public-safe slice of the status page configuration. Node descriptors and
/// daemon tokens never appear here.
#[derive(Serialize)]
struct PublicStatusConfig {
    title: String,
    company_name: String,
    support_email: Option<String>,
    auto_refresh_enabled: bool,
    auto_refresh_interval: u32,
    show_node_names: bool,
    show_resource_usage: bool,
    show_locations: bool,
}

fn inactive() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "status page is not active").into_response()
}

pub async fn handle_status_summary(State(state): State<AppState>) -> Response {
    let page = &state.config.status_page;
    if !page.is_active {
        return inactive();
    }

    let (summary, _) = state
        .aggregator
        .poll(&state.config.nodes, &page.filters(), state.config.probe_timeout())
        .await;

    Json(SummaryResponse {
        summary,
        generated_at: Utc::now(),
    })
    .into_response()
}

pub async fn handle_status_nodes(State(state): State<AppState>) -> Response {
    let page = &state.config.status_page;
    if !page.is_active {
        return inactive();
    }

    let (_, nodes) = state
        .aggregator
        .poll(&state.config.nodes, &page.filters(), state.config.probe_timeout())
        .await;

    Json(NodesResponse {
        nodes,
        generated_at: Utc::now(),
    })
    .into_response()
}

pub async fn handle_status_config(State(state): State<AppState>) -> Response {
    let page = &state.config.status_page;
    if !page.is_active {
        return inactive();
    }

    Json(ConfigResponse {
        config: PublicStatusConfig {
            title: page.title.clone(),
            company_name: page.company_name.clone(),
            support_email: page.support_email.clone(),
            auto_refresh_enabled: page.auto_refresh_enabled,
            auto_refresh_interval: page.auto_refresh_interval,
            show_node_names: page.show_node_names,
            show_resource_usage: page.show_resource_usage,
            show_locations: page.show_locations,
        },
    })
    .into_response()
}

pub async fn handle_healthz() -> &'static str {
    "ok\n"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::to_bytes;
    use axum::http::Request;
    use futures_util::future::BoxFuture;
    use tower::ServiceExt;

    use crate::clients::aggregator::Aggregator;
    use crate::clients::{ProbeError, Prober};
    use crate::config::{Config, NodeDescriptor, Scheme, StatusPageConfig};
    use crate::models::wings::UtilizationSample;
    use crate::routes::build_router;
    use crate::AppState;

    /// Answers every probe with the same sample, or fails every probe.
    struct StaticProber(Option<UtilizationSample>);

    impl Prober for StaticProber {
        fn probe(
            &self,
            _node: &NodeDescriptor,
            _timeout: Duration,
        ) -> BoxFuture<'static, Result<UtilizationSample, ProbeError>> {
            let sample = self.0.clone();
            Box::pin(async move { sample.ok_or(ProbeError::Cancelled) })
        }
    }

    fn page_config() -> StatusPageConfig {
        StatusPageConfig {
            is_active: true,
            title: "Service Status".to_string(),
            company_name: "Example Inc".to_string(),
            support_email: None,
            auto_refresh_enabled: true,
            auto_refresh_interval: 30,
            show_node_names: true,
            show_resource_usage: true,
            show_locations: true,
        }
    }

    fn state(nodes: Vec<NodeDescriptor>, page: StatusPageConfig, prober: StaticProber) -> AppState {
        AppState {
            aggregator: Arc::new(Aggregator::new(Arc::new(prober))),
            config: Arc::new(Config {
                listen_port: 0,
                probe_timeout_secs: 5,
                nodes,
                status_page: page,
            }),
        }
    }

    fn node(name: &str) -> NodeDescriptor {
        NodeDescriptor {
            name: name.to_string(),
            fqdn: format!("{}.example.com", name),
            daemon_port: 8080,
            scheme: Scheme::Https,
            daemon_token: "token".to_string(),
            location: None,
        }
    }

    fn sample() -> UtilizationSample {
        UtilizationSample {
            cpu_percent: Some(40.0),
            memory_used: Some(1024),
            memory_total: Some(4096),
            disk_used: Some(10),
            disk_total: Some(100),
        }
    }

    async fn get_json(state: AppState, uri: &str) -> (u16, serde_json::Value) {
        let resp = build_router(state)
            .oneshot(Request::get(uri).body(axum::body::Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status().as_u16();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn inactive_page_returns_503_everywhere() {
        for uri in ["/api/status/summary", "/api/status/nodes", "/api/status/config"] {
            let mut page = page_config();
            page.is_active = false;
            let st = state(vec![node("a")], page, StaticProber(Some(sample())));
            let (status, _) = get_json(st, uri).await;
            assert_eq!(status, 503, "{} should be gated", uri);
        }
    }

    #[tokio::test]
    async fn summary_reports_operational_fleet() {
        let st = state(
            vec![node("a"), node("b")],
            page_config(),
            StaticProber(Some(sample())),
        );
        let (status, body) = get_json(st, "/api/status/summary").await;

        assert_eq!(status, 200);
        assert_eq!(body["summary"]["overall_status"], "operational");
        assert_eq!(body["summary"]["healthy_nodes"], 2);
        assert_eq!(body["summary"]["total_nodes"], 2);
        assert_eq!(body["summary"]["avg_cpu_percent"], 40.0);
        assert_eq!(body["summary"]["avg_memory_percent"], 25.0);
        assert!(body["generated_at"].is_string());
    }

    #[tokio::test]
    async fn nodes_anonymized_when_names_hidden() {
        let mut page = page_config();
        page.show_node_names = false;
        let st = state(vec![node("oslo"), node("tokyo")], page, StaticProber(None));
        let (status, body) = get_json(st, "/api/status/nodes").await;

        assert_eq!(status, 200);
        assert_eq!(body["nodes"][0]["name"], "Node 1");
        assert_eq!(body["nodes"][1]["name"], "Node 2");
        assert_eq!(body["nodes"][0]["status"], "unhealthy");
        assert_eq!(body["nodes"][0]["error"], "Connection failed");
    }

    #[tokio::test]
    async fn config_exposes_public_fields_only() {
        let st = state(vec![node("a")], page_config(), StaticProber(Some(sample())));
        let (status, body) = get_json(st, "/api/status/config").await;

        assert_eq!(status, 200);
        assert_eq!(body["config"]["title"], "Service Status");
        assert_eq!(body["config"]["auto_refresh_interval"], 30);
        // nothing node- or token-shaped leaks
        assert!(body["config"].get("nodes").is_none());
        assert!(body["config"].get("daemon_token").is_none());
    }
}
