//! Validate a request body or query string against a shape and hand the typed value to the handler.
//!
//! A failing shape short-circuits the request with a 400 listing every violated field;
//! the handler never runs.

use crate::error::AppError;
use crate::service::Shape;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// JSON body validated as `T`. An empty body is treated as `{}`.
#[derive(Clone, Debug)]
pub struct ValidatedJson<T>(pub T);

/// Query string validated as `T`. All values arrive as strings.
#[derive(Clone, Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Shape,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::malformed(e.status(), e.body_text()))?;
        let payload = body_to_map(&bytes)?;
        T::from_payload(payload).map(ValidatedJson)
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: Shape,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::malformed(e.status(), e.body_text()))?;
        let payload: Map<String, Value> = raw.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        T::from_payload(payload).map(ValidatedQuery)
    }
}

fn body_to_map(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(AppError::malformed(
            StatusCode::BAD_REQUEST,
            "body must be a JSON object",
        )),
        Err(e) => Err(AppError::malformed(StatusCode::BAD_REQUEST, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_empty_object() {
        assert!(body_to_map(b"").unwrap().is_empty());
        assert!(body_to_map(b" \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_body_is_malformed() {
        assert!(matches!(
            body_to_map(b"[1, 2]"),
            Err(AppError::Malformed { status: StatusCode::BAD_REQUEST, .. })
        ));
        assert!(matches!(body_to_map(b"{oops"), Err(AppError::Malformed { .. })));
    }
}
