//! Shared API request/response types

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use json::{Json, JsonRejection};
pub use query::Query;
