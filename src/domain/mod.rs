//! Domain layer - query routing, caching contracts and error taxonomy

pub mod cache;
pub mod error;
pub mod search;
pub mod sparql;

pub use cache::{QueryCacheKey, ResultCache};
pub use error::DomainError;
pub use search::SearchParams;
pub use sparql::{
    select_endpoint, EndpointId, EntityId, ExecutionError, PropertyIds, QueryText,
    SparqlEndpoints, UpstreamClient, UpstreamError, UpstreamRequest,
};
