//! Entity properties endpoint

use axum::{
    extract::{Path, State},
    response::Response,
};
use tracing::{debug, warn};

use crate::api::sparql::query_response;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::sparql::{build_properties_query, EntityId, ExecutionError};

/// GET /api/searchProperties/{entity_id}
pub async fn search_properties(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Result<Response, ApiError> {
    let entity = EntityId::parse(&entity_id)?;
    let query = build_properties_query(&entity, &state.properties);

    debug!(entity = %entity.as_str(), "Fetching entity properties");

    let result = state
        .executor
        .execute(&query)
        .await
        .map_err(|e| properties_error(&entity, e))?;

    Ok(query_response(&result))
}

// Every execution failure surfaces as 500 on this route
fn properties_error(entity: &EntityId, error: ExecutionError) -> ApiError {
    warn!(entity = %entity.as_str(), kind = error.kind(), error = %error, "Properties query failed");

    ApiError::internal(format!(
        "Failed to fetch properties for entity {}",
        entity.as_str()
    ))
    .with_details(error.to_string())
    .with_code(error.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_upstream_rejection_becomes_500() {
        let entity = EntityId::parse("Q42").unwrap();
        let error = properties_error(
            &entity,
            ExecutionError::UpstreamRejected {
                status: 400,
                message: "Parse error".to_string(),
                query_excerpt: Some("SELECT".to_string()),
            },
        );

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.response.error.message.contains("Q42"));
        assert_eq!(error.response.error.code.as_deref(), Some("upstream_rejected"));
    }

    #[test]
    fn test_unreachable_becomes_500() {
        let entity = EntityId::parse("Q7").unwrap();
        let error = properties_error(&entity, ExecutionError::unreachable("timed out"));

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
