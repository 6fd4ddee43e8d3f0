/*
 * Responsibility
 * - HTTP の入口: routes / handlers / DTO / extractors
 * - app.rs から見えるのは routes() だけ
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
