//! API middleware components

pub mod cors;
pub mod logging;
pub mod metrics;
pub mod security;

pub use cors::build_cors_layer;
pub use logging::{logging_middleware, truncate_for_log, REQUEST_ID_HEADER};
pub use metrics::metrics_middleware;
pub use security::{security_headers_middleware, MAX_BODY_SIZE};
