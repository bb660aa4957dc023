use crate::error::AppError;
use crate::extractors::ExternalId;
use crate::handlers::json_body;
use crate::model::NewBean;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let beans = state.beans.list().await?;
    Ok(success_many(beans))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewBean>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?;
    RequestValidator::bean(&input)?;
    let bean = state.beans.create(&input).await?;
    Ok(success_one(bean))
}

pub async fn read(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
) -> Result<impl IntoResponse, AppError> {
    let bean = state
        .beans
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("bean", id))?;
    Ok(success_one_ok(bean))
}

pub async fn update(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
    payload: Result<Json<NewBean>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?;
    RequestValidator::bean(&input)?;
    let bean = state.beans.update(&input, id).await?;
    Ok(success_one_ok(bean))
}

pub async fn delete(
    State(state): State<AppState>,
    ExternalId(id): ExternalId,
) -> Result<impl IntoResponse, AppError> {
    state.beans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
