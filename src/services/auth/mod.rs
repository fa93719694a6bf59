pub mod authenticator;
pub mod claims;
pub mod factory;
pub mod issuer;

pub use authenticator::{AuthError, AuthSetupError, CredentialRejection, TokenAuthenticator};
pub use claims::{IdentityClaim, TokenClaims};
pub use factory::build_token_authenticator;
pub use issuer::{IssueError, TokenIssuer};
