//! Cache domain - query result caching abstraction

mod key;
mod repository;

pub use key::QueryCacheKey;
pub use repository::ResultCache;
