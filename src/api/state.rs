//! Application state shared by the handlers

use std::sync::Arc;

use crate::domain::sparql::PropertyIds;
use crate::infrastructure::sparql::QueryExecutor;
use crate::infrastructure::wikibase::WikibaseSearchService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub executor: Arc<QueryExecutor>,
    pub search: Arc<WikibaseSearchService>,
    pub properties: PropertyIds,
}

impl AppState {
    pub fn new(
        executor: Arc<QueryExecutor>,
        search: Arc<WikibaseSearchService>,
        properties: PropertyIds,
    ) -> Self {
        Self {
            executor,
            search,
            properties,
        }
    }
}
