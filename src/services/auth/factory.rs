/// Factory: build the credential verifier from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthSetupError, TokenAuthenticator};

pub fn build_token_authenticator(
    config: &Config,
) -> Result<Arc<TokenAuthenticator>, AuthSetupError> {
    let auth = TokenAuthenticator::new(config.jwt_secret.as_bytes(), config.token_leeway_seconds)?;

    Ok(Arc::new(auth))
}
