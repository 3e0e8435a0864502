//! SPARQL infrastructure - cached query execution

mod executor;

pub use executor::{QueryExecutor, QueryResult, ResultSource};
