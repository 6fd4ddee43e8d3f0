/*
 * Responsibility
 * - handler が使う永続化の境界 (movies / actors)
 * - Postgres 実装は各 trait の隣に置く
 */
pub mod actor_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod movie_repo;

pub use actor_repo::{ActorRepo, PgActorRepo};
pub use movie_repo::{MovieRepo, PgMovieRepo};
