//! Charters Gateway
//!
//! HTTP proxy between the medieval charters map and its knowledge bases:
//! - SPARQL queries routed to the project Wikibase or to Wikidata
//! - Time-expiring result cache keyed by query text
//! - Upstream failures classified into distinct HTTP responses
//! - Keyword search and entity property lookups against the Wikibase

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    cache::InMemoryResultCache, http::HttpUpstreamClient, sparql::QueryExecutor,
    wikibase::WikibaseSearchService,
};
use tokio::task::JoinHandle;
use tracing::info;

/// Builds the shared services and starts the cache sweeper.
///
/// The returned handle belongs to the sweeper task; abort it on shutdown.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<(AppState, JoinHandle<()>)> {
    let client = Arc::new(HttpUpstreamClient::new(
        config.upstream.timeout(),
        &config.upstream.user_agent,
    )?);

    let cache = Arc::new(InMemoryResultCache::with_config(
        config.cache.to_cache_config(),
    ));
    let sweeper = cache.spawn_sweeper();

    let endpoints = config.upstream.sparql_endpoints();
    info!(
        wikibase = %endpoints.wikibase,
        wikidata = %endpoints.wikidata,
        ttl_secs = config.cache.ttl_secs,
        max_entries = ?config.cache.max_entries,
        "Query executor configured"
    );

    let executor = QueryExecutor::new(client.clone(), cache, endpoints);
    let search = WikibaseSearchService::new(client, &config.upstream.wikibase_api_url);

    let state = AppState::new(
        Arc::new(executor),
        Arc::new(search),
        config.properties.property_ids(),
    );

    Ok((state, sweeper))
}
