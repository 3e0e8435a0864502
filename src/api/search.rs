//! Wikibase keyword search endpoint

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Query};
use crate::domain::search::SearchParams;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub language: Option<String>,
    pub limit: Option<u32>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

impl SearchQuery {
    fn into_params(self) -> Result<SearchParams, ApiError> {
        let params = SearchParams::new(self.query)?
            .with_language(self.language)?
            .with_limit(self.limit)?
            .with_entity_type(self.entity_type)?;

        Ok(params)
    }
}

/// GET /api/search
pub async fn search_entities(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let params = query.into_params()?;

    debug!(search = %params.query(), language = %params.language(), "Searching entities");

    let body = state.search.search(&params).await?;

    Ok(Json(body))
}
