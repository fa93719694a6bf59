/*
 * Responsibility
 * - handler から使う domain service 群 (認証 / 認可 / 公開 ID)
 */
pub mod access_guard;
pub mod auth;
pub mod id_codec;
