/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - movie / actor の repo、bearer 検証用の Authorizer
 * - Clone 前提で持つ (内部は Arc なので cheap)
 */
use std::sync::Arc;

use crate::repos::{ActorRepo, MovieRepo};
use crate::services::auth::Authorizer;

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieRepo>,
    pub actors: Arc<dyn ActorRepo>,
    pub auth: Arc<Authorizer>,
}

impl AppState {
    pub fn new(movies: Arc<dyn MovieRepo>, actors: Arc<dyn ActorRepo>, auth: Arc<Authorizer>) -> Self {
        Self {
            movies,
            actors,
            auth,
        }
    }
}
