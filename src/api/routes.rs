/*
 * Responsibility
 * - API の URL 構造
 * - 各 method に必要な permission は route の隣でここに宣言する
 * - /health は認可なし
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::api::handlers::{
    actors::{create_actor, delete_actor, get_actor, list_actors, update_actor},
    health::health,
    movies::{create_movie, delete_movie, get_movie, list_movies, update_movie},
};
use crate::middleware::auth::requires;
use crate::services::auth::permissions::{
    DELETE_ACTORS, DELETE_MOVIES, GET_ACTORS, GET_MOVIES, PATCH_ACTORS, PATCH_MOVIES,
    POST_ACTORS, POST_MOVIES,
};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let auth = &state.auth;

    Router::new()
        .route("/health", get(health))
        .route(
            "/movies",
            requires(get(list_movies), auth, GET_MOVIES)
                .merge(requires(post(create_movie), auth, POST_MOVIES)),
        )
        .route(
            "/movies/{id}",
            requires(get(get_movie), auth, GET_MOVIES)
                .merge(requires(patch(update_movie), auth, PATCH_MOVIES))
                .merge(requires(delete(delete_movie), auth, DELETE_MOVIES)),
        )
        .route(
            "/actors",
            requires(get(list_actors), auth, GET_ACTORS)
                .merge(requires(post(create_actor), auth, POST_ACTORS)),
        )
        .route(
            "/actors/{id}",
            requires(get(get_actor), auth, GET_ACTORS)
                .merge(requires(patch(update_actor), auth, PATCH_ACTORS))
                .merge(requires(delete(delete_actor), auth, DELETE_ACTORS)),
        )
}
