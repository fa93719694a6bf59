/*
 * Responsibility
 * - /notes 系 CRUD handler
 * - 認証は middleware 済み: AuthCtxExtractor で identity を受け取る
 * - Path の公開 ID は PublicNoteId extractor で内部 ID に変換して受け取る
 * - 単体の read / update / delete の直前で必ず access_guard を通す (キャッシュしない)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    api::{
        dto::notes::{
            CreateNoteRequest, DeleteNoteResponse, NoteResponse, UpdateNoteRequest,
            UpdateNoteResponse,
        },
        extractors::{AuthCtx, AuthCtxExtractor, PublicNoteId, extract_validated_json},
    },
    error::AppError,
    repos::NoteRow,
    state::AppState,
};

const DELETED_MESSAGE: &str = "Note has been deleted.";

fn row_to_response(state: &AppState, row: NoteRow) -> Result<NoteResponse, AppError> {
    Ok(NoteResponse {
        id: state.id_codec.encode(row.note_id)?,
        owner: row.owner,
        title: row.title,
        description: row.description,
        tag: row.tag,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Load a note and run the ownership check against the caller.
async fn load_authorized(
    state: &AppState,
    ctx: &AuthCtx,
    note_id: i64,
) -> Result<NoteRow, AppError> {
    let note = state.notes.get(note_id).await?;
    let note = state.access.authorize(&ctx.identity, note.as_ref()).map_err(|e| {
        tracing::debug!(note_id, user_id = ctx.user_id(), error = %e, "note access denied");
        e
    })?;
    Ok(note.clone())
}

pub async fn fetch_all_notes(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let rows = state.notes.list_by_owner(ctx.user_id()).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn fetch_note(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    note_id: PublicNoteId,
) -> Result<Json<NoteResponse>, AppError> {
    let note = load_authorized(&state, &ctx, note_id.id).await?;
    Ok(Json(row_to_response(&state, note)?))
}

pub async fn add_note(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    body: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Json<NoteResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let row = state
        .notes
        .create(
            ctx.user_id(),
            &req.title,
            &req.description,
            req.tag.as_deref(),
        )
        .await?;

    tracing::info!(note_id = row.note_id, user_id = ctx.user_id(), "note created");
    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_note(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    note_id: PublicNoteId,
    body: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<UpdateNoteResponse>, AppError> {
    let note = load_authorized(&state, &ctx, note_id.id).await?;
    let req = extract_validated_json(body)?;

    // owner-scoped update; None means the note vanished after the check
    let row = state
        .notes
        .update(
            note.note_id,
            ctx.user_id(),
            req.title.as_deref(),
            req.description.as_deref(),
            req.tag.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(UpdateNoteResponse {
        note: row_to_response(&state, row)?,
    }))
}

pub async fn delete_note(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    note_id: PublicNoteId,
) -> Result<Json<DeleteNoteResponse>, AppError> {
    let note = load_authorized(&state, &ctx, note_id.id).await?;

    let row = state
        .notes
        .delete(note.note_id, ctx.user_id())
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(note_id = row.note_id, user_id = ctx.user_id(), "note deleted");
    Ok(Json(DeleteNoteResponse {
        success: DELETED_MESSAGE.to_string(),
        note: row_to_response(&state, row)?,
    }))
}
