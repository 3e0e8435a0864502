//! Wikibase infrastructure - action API services

mod search;

pub use search::WikibaseSearchService;
