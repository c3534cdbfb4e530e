use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `BREW_CRM__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub loyalty: LoyaltyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Populate the store with the demo cafe on start-up.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    #[serde(default = "default_activity_capacity")]
    pub activity_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyConfig {
    #[serde(default = "default_loyalty_enabled")]
    pub enabled: bool,
}

// Default functions
fn default_node_id() -> String {
    "brew-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_seed_demo_data() -> bool {
    true
}
fn default_activity_capacity() -> usize {
    500
}
fn default_loyalty_enabled() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
            activity_capacity: default_activity_capacity(),
        }
    }
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            enabled: default_loyalty_enabled(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            store: StoreConfig::default(),
            loyalty: LoyaltyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("BREW_CRM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let loaded: AppConfig = config.try_deserialize()?;
        tracing::debug!(node_id = %loaded.node_id, "Configuration resolved");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.http_port, 8080);
        assert_eq!(config.metrics.port, 9091);
        assert!(config.store.seed_demo_data);
        assert!(config.loyalty.enabled);
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let raw = r#"{"api": {"http_port": 3000}, "store": {"seed_demo_data": false}}"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.api.http_port, 3000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert!(!config.store.seed_demo_data);
        assert_eq!(config.store.activity_capacity, 500);
    }
}
