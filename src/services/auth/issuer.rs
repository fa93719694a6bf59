use jsonwebtoken::{Algorithm, EncodingKey, Header};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::services::auth::claims::{IdentityClaim, TokenClaims};

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("ttl of {0} seconds overflows the expiry timestamp")]
    TtlOverflow(u64),

    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Signs credentials with the shared secret.
///
/// Real issuance belongs to the identity provider; this exists for the
/// `token-gen` CLI and for tests that need a credential the authenticator accepts.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: Option<u64>,
}

impl TokenIssuer {
    /// `ttl_seconds = None` issues tokens without `exp`.
    pub fn new(secret: &[u8], ttl_seconds: Option<u64>) -> Result<Self, IssueError> {
        if secret.is_empty() {
            return Err(IssueError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds,
        })
    }

    pub fn ttl_seconds(&self) -> Option<u64> {
        self.ttl_seconds
    }

    pub fn issue(&self, user_id: &str) -> Result<String, IssueError> {
        if user_id.trim().is_empty() {
            return Err(IssueError::EmptyUserId);
        }

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let exp = self
            .ttl_seconds
            .map(|ttl| now.checked_add(ttl).ok_or(IssueError::TtlOverflow(ttl)))
            .transpose()?;

        let claims = TokenClaims {
            user: IdentityClaim::new(user_id),
            exp,
            iat: Some(now),
            jti: Some(Uuid::new_v4().to_string()),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign token");
            IssueError::Sign(e)
        })
    }
}
