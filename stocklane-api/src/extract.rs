/// Request extractors aligned with the error taxonomy
///
/// Axum's stock `Json` extractor answers a missing field or malformed
/// body with its own plain-text 422 before the handler runs. Handlers
/// use this wrapper instead, so extraction failures produce the same
/// 400 [`ErrorResponse`](crate::error::ErrorResponse) envelope as every
/// other bad input.

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

/// JSON body extractor whose rejection is an [`ApiError`]
///
/// Also usable in responses; serialization delegates to `axum::Json`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
