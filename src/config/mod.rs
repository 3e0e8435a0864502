//! Configuration loading and validation

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, CorsConfig, LogFormat, LoggingConfig, PropertiesConfig, ServerConfig,
    UpstreamConfig,
};
