//! Roastery handlers, including the nested bean collection of one roastery.

use crate::error::AppError;
use crate::extractors::ExternalId;
use crate::handlers::json_body;
use crate::model::{NewBeanWithoutRoasteryId, NewRoastery};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let roasteries = state.roasteries.list().await?;
    Ok(success_many(roasteries))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewRoastery>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?;
    RequestValidator::roastery(&input)?;
    let roastery = state.roasteries.create(&input).await?;
    Ok(success_one(roastery))
}

pub async fn read(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
) -> Result<impl IntoResponse, AppError> {
    let roastery = state
        .roasteries
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("roastery", id))?;
    Ok(success_one_ok(roastery))
}

pub async fn update(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
    payload: Result<Json<NewRoastery>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?;
    RequestValidator::roastery(&input)?;
    let roastery = state.roasteries.update(&input, id).await?;
    Ok(success_one_ok(roastery))
}

pub async fn delete(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
) -> Result<impl IntoResponse, AppError> {
    state.roasteries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_beans(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
) -> Result<impl IntoResponse, AppError> {
    let beans = state.beans.list_for_roastery(id).await?;
    Ok(success_many(beans))
}

pub async fn create_bean(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
    payload: Result<Json<NewBeanWithoutRoasteryId>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?.into_new_bean(id);
    RequestValidator::bean(&input)?;
    let bean = state.beans.create_for_roastery(id, &input).await?;
    Ok(success_one(bean))
}
