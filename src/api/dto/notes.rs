/*
 * Responsibility
 * - Notes の request/response DTO
 * - validate() は形式チェックのみ (空でない title / description)
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{api::extractors::Validate, error::FieldError};

const TITLE_MESSAGE: &str = "Enter a valid title";
const DESCRIPTION_MESSAGE: &str = "Enter a valid description";

// null / non-string text counts as blank so it surfaces as a field error
fn text_or_blank<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

// null means "not provided"; any other non-string is kept as a blank edit
fn patch_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        _ => Some(String::new()),
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    // missing fields are treated as blank so they surface as validation errors
    #[serde(default, deserialize_with = "text_or_blank")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_blank")]
    pub description: String,
    pub tag: Option<String>,
}

impl Validate for CreateNoteRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", TITLE_MESSAGE));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", DESCRIPTION_MESSAGE));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, deserialize_with = "patch_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "patch_text")]
    pub description: Option<String>,
    pub tag: Option<String>,
}

impl Validate for UpdateNoteRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            errors.push(FieldError::new("title", TITLE_MESSAGE));
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            errors.push(FieldError::new("description", DESCRIPTION_MESSAGE));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: String, // encoded
    pub owner: String,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNoteResponse {
    pub note: NoteResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteNoteResponse {
    #[serde(rename = "Success")]
    pub success: String,
    pub note: NoteResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_description() {
        let req: CreateNoteRequest = serde_json::from_str(r#"{ "tag": "x" }"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.iter().map(|e| e.field).collect::<Vec<_>>(),
            ["title", "description"]
        );

        let req: CreateNoteRequest =
            serde_json::from_str(r#"{ "title": "Groceries", "description": "  " }"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            vec![FieldError::new("description", DESCRIPTION_MESSAGE)]
        );

        let req: CreateNoteRequest =
            serde_json::from_str(r#"{ "title": "Groceries", "description": "Buy milk" }"#)
                .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.tag.is_none());
    }

    #[test]
    fn update_accepts_any_subset_but_not_blank_text() {
        assert!(UpdateNoteRequest::default().validate().is_ok());

        let req: UpdateNoteRequest = serde_json::from_str(r#"{ "tag": "" }"#).unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateNoteRequest = serde_json::from_str(r#"{ "title": "" }"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            vec![FieldError::new("title", TITLE_MESSAGE)]
        );
    }

    #[test]
    fn null_or_mistyped_text_is_blank() {
        let req: CreateNoteRequest =
            serde_json::from_str(r#"{ "title": null, "description": 5 }"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            vec![
                FieldError::new("title", TITLE_MESSAGE),
                FieldError::new("description", DESCRIPTION_MESSAGE),
            ]
        );

        let req: UpdateNoteRequest =
            serde_json::from_str(r#"{ "title": null, "description": "ok" }"#).unwrap();
        assert!(req.title.is_none());
        assert!(req.validate().is_ok());

        let req: UpdateNoteRequest = serde_json::from_str(r#"{ "title": 5 }"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            vec![FieldError::new("title", TITLE_MESSAGE)]
        );
    }
}
