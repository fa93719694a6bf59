/*
 * Responsibility
 * - handler 向け extractor の公開ポイント
 */
pub mod auth_ctx;
pub mod json_body;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::{Validate, extract_validated_json};
pub use public_id::PublicNoteId;
