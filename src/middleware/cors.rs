//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: any origin, WITHOUT credentials.
//! - Production: allowlist from `CORS_ALLOWED_ORIGINS` (exact match). An empty
//!   allowlist allows no cross-origin callers.
//!
//! The credential travels in the custom `auth-token` header, so it must be
//! listed in the allowed request headers or preflights fail.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::auth::AUTH_TOKEN_HEADER;
use crate::middleware::http::REQUEST_ID_HEADER;

pub fn apply(router: Router, config: &Config) -> Router {
    let cors = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter(|s| s.as_str() != "*")
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(AUTH_TOKEN_HEADER),
        HeaderName::from_static(REQUEST_ID_HEADER),
    ])
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
