//! Infrastructure layer - External service implementations

pub mod cache;
pub mod http;
pub mod logging;
pub mod observability;
pub mod sparql;
pub mod wikibase;
