/*
 * Responsibility
 * - /movies 系 CRUD handler
 * - 認可は route layer で済んでいる (ここに来た時点で permission は確認済み)
 * - title は title-case で保存、重複は 422
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    api::{
        dto::movies::{CreateMovieRequest, MovieListResponse, MovieResponse, UpdateMovieRequest},
        extractors::{Claims, ResourceId},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_movies(State(state): State<AppState>) -> Result<Json<MovieListResponse>, AppError> {
    let rows = state.movies.list().await?;

    Ok(Json(MovieListResponse {
        movies: rows.into_iter().map(MovieResponse::from).collect(),
    }))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Claims(claims): Claims,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let title = req.validate().map_err(AppError::bad_request)?;

    let row = state.movies.create(&title, req.release_date).await?;
    tracing::info!(movie_id = row.id, subject = ?claims.subject(), "movie created");

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_movie(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MovieResponse>, AppError> {
    let row = state.movies.get(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(row.into()))
}

pub async fn update_movie(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> Result<Json<MovieResponse>, AppError> {
    // 存在しない id なら body の検証より先に 404
    if state.movies.get(id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let title = req.validate().map_err(AppError::bad_request)?;

    let row = state
        .movies
        .update(id, title.as_deref(), req.release_date)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(row.into()))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Claims(claims): Claims,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, AppError> {
    if !state.movies.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(movie_id = id, subject = ?claims.subject(), "movie deleted");

    Ok(Json(json!({ "deleted": id })))
}
