use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    pub status_page: StatusPageConfig,
}

/// One Wings daemon to probe. Supplied by configuration; the service never
/// creates or removes nodes itself.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    pub fqdn: String,
    #[serde(default = "default_daemon_port")]
    pub daemon_port: u16,
    #[serde(default)]
    pub scheme: Scheme,
    pub daemon_token: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusPageConfig {
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default = "default_true")]
    pub auto_refresh_enabled: bool,
    #[serde(default = "default_auto_refresh_interval")]
    pub auto_refresh_interval: u32,
    #[serde(default = "default_true")]
    pub show_node_names: bool,
    #[serde(default = "default_true")]
    pub show_resource_usage: bool,
    #[serde(default = "default_true")]
    pub show_locations: bool,
}

impl StatusPageConfig {
    pub fn filters(&self) -> DisplayFilters {
        DisplayFilters {
            show_node_names: self.show_node_names,
            show_resource_usage: self.show_resource_usage,
            show_locations: self.show_locations,
        }
    }
}

/// Display flags applied by the aggregator after reduction, so consumers
/// receive already-filtered values.
#[derive(Debug, Clone, Copy)]
pub struct DisplayFilters {
    pub show_node_names: bool,
    pub show_resource_usage: bool,
    pub show_locations: bool,
}

fn default_listen_port() -> u16 {
    8088
}

// Deliberately short: the public status page must stay responsive even when
// several nodes are unreachable.
fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_daemon_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Service Status".to_string()
}

fn default_company_name() -> String {
    "FeatherPanel".to_string()
}

fn default_auto_refresh_interval() -> u32 {
    30
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("reading config {}: {}", path.display(), e))?;
        let mut cfg: Config =
            serde_yaml::from_str(&data).map_err(|e| format!("parsing config: {}", e))?;

        // 5s..5min, same bounds the panel enforces on stored settings
        cfg.status_page.auto_refresh_interval = cfg.status_page.auto_refresh_interval.clamp(5, 300);

        Ok(cfg)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }

    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.probe_timeout_secs)
    }
}
