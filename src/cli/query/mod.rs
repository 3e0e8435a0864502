//! Query command - runs one SPARQL query through the executor

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::sparql::{select_endpoint, QueryText};
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct QueryArgs {
    /// SPARQL query text
    pub text: Option<String>,

    /// Read the query from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl QueryArgs {
    fn read_query(&self) -> anyhow::Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read query file {}", path.display())),
            (None, None) => anyhow::bail!("Either a query or --file is required"),
        }
    }
}

/// Run the query and print the chosen endpoint and the results
pub async fn run(args: QueryArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);
    config.validate()?;

    let query = QueryText::new(args.read_query()?)?;
    let endpoint = select_endpoint(query.as_str());

    let (state, sweeper) = crate::create_app_state(&config)?;
    let outcome = state.executor.execute_query(&query).await;
    sweeper.abort();

    let result = outcome?;
    info!(endpoint = %endpoint, cached = result.is_cached(), "Query completed");

    println!("# endpoint: {} ({})", endpoint, state.executor.endpoints().url_for(endpoint));
    println!("{}", serde_json::to_string_pretty(result.body.as_ref())?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_query_from_text() {
        let args = QueryArgs {
            text: Some("SELECT * WHERE { ?s ?p ?o }".to_string()),
            file: None,
        };

        assert_eq!(args.read_query().unwrap(), "SELECT * WHERE { ?s ?p ?o }");
    }

    #[test]
    fn test_read_query_missing_file() {
        let args = QueryArgs {
            text: None,
            file: Some(PathBuf::from("/nonexistent/query.rq")),
        };

        let error = args.read_query().unwrap_err();
        assert!(error.to_string().contains("/nonexistent/query.rq"));
    }
}
