//! SPARQL domain - endpoint routing, query text, and execution failures

mod endpoint;
mod error;
mod properties;
mod query;
mod upstream;

pub use endpoint::{select_endpoint, EndpointId, SparqlEndpoints};
pub use error::ExecutionError;
pub use properties::{build_properties_query, EntityId, PropertyIds, WIKIDATA_SERVICE};
pub use query::{excerpt, QueryText, QUERY_EXCERPT_CHARS};
pub use upstream::{
    UpstreamClient, UpstreamError, UpstreamRequest, APPLICATION_JSON, SPARQL_RESULTS_JSON,
};

#[cfg(test)]
pub use upstream::MockUpstreamClient;
