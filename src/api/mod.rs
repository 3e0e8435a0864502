//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod properties;
pub mod router;
pub mod search;
pub mod sparql;
pub mod state;
pub mod types;

pub use router::{create_api_router, create_router};
pub use state::AppState;
