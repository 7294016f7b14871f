//! JSON request bodies that treat an empty body as an empty object.

use axum::{
    Json,
    body::Body,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::Error;

/// A JSON request body, read as `T::default()` when the request has no body.
///
/// Malformed JSON, JSON of the wrong shape, and non-empty bodies sent without
/// a JSON content type are rejected with [Error::InvalidRequest].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|error| {
                Error::InvalidRequest(format!("Could not read request body: {error}"))
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let request = Request::from_parts(parts, Body::from(bytes));
        let Json(value) = Json::<T>::from_request(request, state).await?;

        Ok(Self(value))
    }
}
