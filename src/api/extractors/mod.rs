/*!
 * handler 共通の extractor
 *
 * Public API:
 * - Claims: permission middleware が extensions に入れた検証済み claims
 * - ResourceId: Path の `{id}` (数値)
 */
mod claims;
mod resource_id;

pub use claims::Claims;
pub use resource_id::ResourceId;
