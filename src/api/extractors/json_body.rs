/*
 * Responsibility
 * - JSON body の取り出しと validate() をまとめる
 * - axum の JsonRejection (415 / 422 plain text) をそのまま返さず、400 { errors } に揃える
 */
use axum::{Json, extract::rejection::JsonRejection};

use crate::error::{AppError, FieldError};

pub const BODY_FIELD: &str = "body";
pub const BODY_MESSAGE: &str = "Request body must be a JSON object";

/// Request DTOs that check their own field rules after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(v)| v).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        AppError::Validation(vec![FieldError::new(BODY_FIELD, BODY_MESSAGE)])
    })
}

pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}
