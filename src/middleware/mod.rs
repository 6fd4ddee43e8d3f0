/*
 * Responsibility
 * - Router 全体にかける middleware (cors / http / security_headers) と route 単位の permission gate (auth)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
