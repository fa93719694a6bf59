/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use crate::services::auth::IdentityClaim;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `identity` は検証済み credential の `user` claim
/// - note の所有者チェックは access_guard で別途行う
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub identity: IdentityClaim,
}

impl AuthCtx {
    pub fn new(identity: IdentityClaim) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}
