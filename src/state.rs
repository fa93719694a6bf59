/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - notes: NoteStore, id_codec: IdCodec, auth: TokenAuthenticator, access: AccessPolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::NoteStore;
use crate::services::{access_guard::AccessPolicy, auth::TokenAuthenticator, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteStore>,
    pub id_codec: IdCodec,
    pub auth: Arc<TokenAuthenticator>,
    pub access: AccessPolicy,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn NoteStore>,
        id_codec: IdCodec,
        auth: Arc<TokenAuthenticator>,
        access: AccessPolicy,
    ) -> Self {
        Self {
            notes,
            id_codec,
            auth,
            access,
        }
    }
}
