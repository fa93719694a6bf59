/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / body)
 * - RepoError / AuthError / AccessError / IdCodecError を統一的に変換
 *
 * 認証失敗は理由に関わらず同じ 401 / 同じ本文を返す (どちらの失敗かを漏らさない)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::repos::RepoError;
use crate::services::access_guard::AccessError;
use crate::services::auth::AuthError;
use crate::services::id_codec::IdCodecError;

pub const UNAUTHENTICATED_MESSAGE: &str = "Please authenticate using a valid token";
pub const NOT_FOUND_MESSAGE: &str = "Note not found!";
pub const FORBIDDEN_MESSAGE: &str = "Not Allowed!";
pub const INTERNAL_MESSAGE: &str = "Internal server error!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": UNAUTHENTICATED_MESSAGE })),
            )
                .into_response(),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response(),
            AppError::Forbidden => (StatusCode::FORBIDDEN, FORBIDDEN_MESSAGE).into_response(),
            AppError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE).into_response()
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        AppError::Unauthenticated
    }
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound => AppError::NotFound,
            AccessError::Forbidden => AppError::Forbidden,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "note store failure");
        AppError::Internal
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // A path id that does not decode names no note at all.
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::NotFound
            }
            // These indicate server-side config / programming errors
            _ => {
                tracing::error!(error = %e, "public id codec failure");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::services::auth::CredentialRejection;

    async fn parts(err: AppError) -> (StatusCode, String) {
        let res = err.into_response();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn auth_failures_are_indistinguishable() {
        let missing = parts(AuthError::MissingCredential.into()).await;
        let invalid = parts(AuthError::InvalidCredential(CredentialRejection::EmptyUserId).into()).await;

        assert_eq!(missing, invalid);
        assert_eq!(missing.0, StatusCode::UNAUTHORIZED);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&missing.1).unwrap(),
            json!({ "error": "Please authenticate using a valid token" })
        );
    }

    #[tokio::test]
    async fn access_errors_map_to_plain_text() {
        assert_eq!(
            parts(AccessError::NotFound.into()).await,
            (StatusCode::NOT_FOUND, "Note not found!".to_string())
        );
        assert_eq!(
            parts(AccessError::Forbidden.into()).await,
            (StatusCode::FORBIDDEN, "Not Allowed!".to_string())
        );
    }

    #[tokio::test]
    async fn storage_failure_is_generic() {
        let (status, body) = parts(RepoError::Db(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal server error!");
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let (status, body) = parts(AppError::Validation(vec![FieldError::new(
            "title",
            "Enter a valid title",
        )]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({ "errors": [{ "field": "title", "message": "Enter a valid title" }] })
        );
    }
}
