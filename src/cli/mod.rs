//! CLI module for the charters gateway
//!
//! - `serve`: run the HTTP gateway
//! - `query`: run a single SPARQL query through the executor and print it

pub mod query;
pub mod serve;

use clap::{Parser, Subcommand};

/// Charters Gateway - SPARQL and search proxy for the medieval charters Wikibase
#[derive(Parser)]
#[command(name = "charters-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway
    Serve,

    /// Run one SPARQL query and print the results
    Query(query::QueryArgs),
}
