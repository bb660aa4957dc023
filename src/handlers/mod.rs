//! HTTP handlers for roasteries and beans.

pub mod bean;
pub mod roastery;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;

/// Unwrap a JSON body, turning every decode failure into `MalformedInput`.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::MalformedInput(rejection.body_text()))
}
