use serde::{Deserialize, Serialize};

/// Identity carried by a verified credential (`{ "user": { "id": ... } }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub id: String,
}

impl IdentityClaim {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Credential payload (HS256 JWT claims).
///
/// - `user` is required; a token without it does not deserialize and is rejected.
/// - `exp` is optional. When present it is enforced by `jsonwebtoken::Validation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user: IdentityClaim,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}
