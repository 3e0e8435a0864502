//! JSON extractor that answers rejections with the API error envelope

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Drop-in for `axum::Json` whose rejections use the API error format
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Body extraction failure
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl JsonRejection {
    /// The body was not JSON-typed, or parsed but did not fit the target type
    pub fn is_unusable_body(&self) -> bool {
        matches!(
            self.status,
            StatusCode::UNSUPPORTED_MEDIA_TYPE | StatusCode::UNPROCESSABLE_ENTITY
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status, ApiErrorType::InvalidRequestError, rejection.message)
            .with_code("json_parse_error")
    }
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                status: rejection.status(),
                message: rejection_message(&rejection),
            }),
        }
    }
}

fn rejection_message(rejection: &AxumJsonRejection) -> String {
    match rejection {
        AxumJsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        AxumJsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        AxumJsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        AxumJsonRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
