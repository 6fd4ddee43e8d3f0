/*
 * Responsibility
 * - /actors 系 CRUD handler
 * - PATCH は送られた項目だけ上書き (空文字 = 未送信扱い)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    api::{
        dto::actors::{ActorListResponse, ActorResponse, CreateActorRequest, UpdateActorRequest},
        extractors::{Claims, ResourceId},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_actors(State(state): State<AppState>) -> Result<Json<ActorListResponse>, AppError> {
    let rows = state.actors.list().await?;

    Ok(Json(ActorListResponse {
        actors: rows.into_iter().map(ActorResponse::from).collect(),
    }))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Claims(claims): Claims,
    payload: Result<Json<CreateActorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActorResponse>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    req.validate().map_err(AppError::bad_request)?;

    let name = req.name.as_deref().map(str::trim).unwrap_or_default();
    let gender = req.gender.as_deref().map(str::trim).filter(|g| !g.is_empty());

    let row = state.actors.create(name, req.age, gender).await?;
    tracing::info!(actor_id = row.id, subject = ?claims.subject(), "actor created");

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_actor(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<ActorResponse>, AppError> {
    let row = state.actors.get(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(row.into()))
}

pub async fn update_actor(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    payload: Result<Json<UpdateActorRequest>, JsonRejection>,
) -> Result<Json<ActorResponse>, AppError> {
    // 存在しない id なら body の検証より先に 404
    if state.actors.get(id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .actors
        .update(id, req.fields())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(row.into()))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    Claims(claims): Claims,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, AppError> {
    if !state.actors.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(actor_id = id, subject = ?claims.subject(), "actor deleted");

    Ok(Json(json!({ "deleted": id })))
}
