//! `auth-token` header verification → AuthCtx を extensions に入れる
//!
//! - header 取得 → TokenAuthenticator::authenticate → 成功時のみ next へ
//! - 失敗理由は log にだけ残し、response は常に同じ 401 (AppError::Unauthenticated)
//! - note 単位の認可 (所有者チェック) は handler 側で access_guard を使う

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, authenticator::credential_fingerprint};
use crate::state::AppState;

pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// note 系 router に認証を掛ける。
///
/// `route_layer` なので、存在しない path は認証前に 404 になる。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 非 ASCII などで to_str() に失敗した header は「不正な credential」として扱う
    let raw = req.headers().get(AUTH_TOKEN_HEADER);
    let credential = match raw.map(|v| v.to_str()) {
        None => None,
        Some(Ok(v)) => Some(v),
        Some(Err(_)) => Some(""),
    };

    let identity = match state.auth.authenticate(credential) {
        Ok(identity) => identity,
        Err(err @ AuthError::MissingCredential) if raw.is_none() => {
            tracing::debug!(error = %err, "request without auth-token");
            return Err(err.into());
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                token_fp = %credential.map(credential_fingerprint).unwrap_or_default(),
                "auth-token verification failed"
            );
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(identity));

    Ok(next.run(req).await)
}
