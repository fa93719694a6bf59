use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::services::auth::claims::{IdentityClaim, TokenClaims};

/// Why a presented credential was rejected. Only ever logged; the HTTP layer
/// answers every variant with the same 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,

    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] CredentialRejection),
}

#[derive(Debug, Error)]
pub enum CredentialRejection {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("empty 'user.id' claim")]
    EmptyUserId,
}

#[derive(Debug, Error)]
pub enum AuthSetupError {
    #[error("signing secret must not be empty")]
    EmptySecret,
}

/// HS256 credential verifier.
///
/// - Holds the process-wide shared secret; read-only after construction.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenAuthenticator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenAuthenticator {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Result<Self, AuthSetupError> {
        if secret.is_empty() {
            return Err(AuthSetupError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is honoured when present but not demanded.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Verify the raw `auth-token` header value and return the identity it carries.
    ///
    /// An absent or blank value is `MissingCredential`; anything that fails
    /// signature, expiry or claim-shape checks is `InvalidCredential`.
    pub fn authenticate(&self, credential: Option<&str>) -> Result<IdentityClaim, AuthError> {
        let token = credential
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(CredentialRejection::from)?;

        let user = data.claims.user;
        if user.id.trim().is_empty() {
            return Err(CredentialRejection::EmptyUserId.into());
        }

        Ok(user)
    }
}

/// Short, non-reversible handle for a credential so rejected tokens can be
/// correlated in logs without writing the token itself.
pub fn credential_fingerprint(credential: &str) -> String {
    let digest = Sha256::digest(credential.as_bytes());
    digest[..6].iter().map(|b| format!("{b:02x}")).collect()
}
