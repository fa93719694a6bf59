/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: auth-token の検証, http: request-id / trace / limit / timeout, cors
 */
pub mod auth;
pub mod cors;
pub mod http;
