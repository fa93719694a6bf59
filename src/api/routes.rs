/*
 * Responsibility
 * - URL 構造を定義
 * - /notes 以下は全て auth-token 必須 (route_layer で適用)
 * - /health は app.rs 側で認証の外に置く
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::handlers::notes::{add_note, delete_note, fetch_all_notes, fetch_note, update_note};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let notes = Router::new()
        .route("/fetchallnotes", get(fetch_all_notes))
        .route("/fetchnote/{note_id}", get(fetch_note))
        .route("/addnotes", post(add_note))
        .route("/updatenote/{note_id}", put(update_note))
        .route("/deletenote/{note_id}", delete(delete_note));

    Router::new().nest("/notes", middleware::auth::apply(notes, state))
}
