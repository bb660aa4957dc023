//! Extract the `:id` path segment as an external UUID.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;
use uuid::Uuid;

/// External id taken from the `id` path parameter. A segment that is not a UUID
/// cannot name any row, so it is rejected as not found.
#[derive(Clone, Copy, Debug)]
pub struct ExternalId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ExternalId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::MalformedInput(e.body_text()))?;
        let raw = params
            .get("id")
            .ok_or_else(|| AppError::MalformedInput("missing id path parameter".into()))?;
        Uuid::parse_str(raw)
            .map(ExternalId)
            .map_err(|_| AppError::not_found("resource", raw))
    }
}
