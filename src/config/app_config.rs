use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::sparql::{PropertyIds, SparqlEndpoints, WIKIDATA_SERVICE};
use crate::domain::DomainError;
use crate::infrastructure::cache::InMemoryCacheConfig;
use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub properties: PropertiesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Upstream services the gateway forwards to
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Wikibase action API (`.../w/api.php`)
    #[serde(default)]
    pub wikibase_api_url: String,
    /// Wikibase query service endpoint
    #[serde(default)]
    pub wikibase_sparql_url: String,
    #[serde(default = "default_wikidata_sparql_url")]
    pub wikidata_sparql_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Upper bound on cached results; unbounded when absent
    #[serde(default)]
    pub max_entries: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
}

/// Wikibase property IDs used by the entity properties query
#[derive(Debug, Clone, Deserialize)]
pub struct PropertiesConfig {
    #[serde(default = "default_residence_property")]
    pub residence: String,
    #[serde(default = "default_place_property")]
    pub place: String,
    #[serde(default = "default_wikidata_item_property")]
    pub wikidata_item: String,
}

fn default_wikidata_sparql_url() -> String {
    WIKIDATA_SERVICE.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!(
        "charters-gateway/{} (medieval charters map; SPARQL proxy)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    600
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_residence_property() -> String {
    "P10".to_string()
}

fn default_place_property() -> String {
    "P11".to_string()
}

fn default_wikidata_item_property() -> String {
    "P2".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            wikibase_api_url: String::new(),
            wikibase_sparql_url: String::new(),
            wikidata_sparql_url: default_wikidata_sparql_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            max_entries: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: false,
        }
    }
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            residence: default_residence_property(),
            place: default_place_property(),
            wikidata_item: default_wikidata_item_property(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Checks the values the gateway cannot run without
    pub fn validate(&self) -> Result<(), DomainError> {
        require_present("upstream.wikibase_api_url", &self.upstream.wikibase_api_url)?;
        require_present("upstream.wikibase_sparql_url", &self.upstream.wikibase_sparql_url)?;
        require_present("upstream.wikidata_sparql_url", &self.upstream.wikidata_sparql_url)?;

        if self.upstream.timeout_secs == 0 {
            return Err(DomainError::configuration("upstream.timeout_secs must be positive"));
        }

        if self.cache.ttl_secs == 0 || self.cache.sweep_interval_secs == 0 {
            return Err(DomainError::configuration(
                "cache.ttl_secs and cache.sweep_interval_secs must be positive",
            ));
        }

        if self.cache.max_entries == Some(0) {
            return Err(DomainError::configuration(
                "cache.max_entries must be positive when set",
            ));
        }

        self.cors.validate()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, DomainError> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            DomainError::configuration(format!("Invalid server.host '{}': {}", self.server.host, e))
        })?;

        Ok(SocketAddr::from((ip, self.server.port)))
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sparql_endpoints(&self) -> SparqlEndpoints {
        SparqlEndpoints::new(&self.wikibase_sparql_url, &self.wikidata_sparql_url)
    }
}

impl CacheConfig {
    pub fn to_cache_config(&self) -> InMemoryCacheConfig {
        let config = InMemoryCacheConfig::default()
            .with_ttl(Duration::from_secs(self.ttl_secs))
            .with_sweep_interval(Duration::from_secs(self.sweep_interval_secs));

        match self.max_entries {
            Some(max) => config.with_max_capacity(max),
            None => config,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.allowed_origins.is_empty() {
            return Err(DomainError::configuration(
                "cors.allowed_origins must list at least one origin (or \"*\")",
            ));
        }

        if self.allow_credentials && self.allows_any_origin() {
            return Err(DomainError::configuration(
                "cors.allow_credentials cannot be combined with a wildcard origin",
            ));
        }

        Ok(())
    }
}

impl PropertiesConfig {
    pub fn property_ids(&self) -> PropertyIds {
        PropertyIds {
            residence: self.residence.clone(),
            place: self.place.clone(),
            wikidata_item: self.wikidata_item.clone(),
        }
    }
}

fn require_present(name: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::configuration(format!("{} is not set", name)));
    }

    Ok(())
}
