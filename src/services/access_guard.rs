/*
 * Responsibility
 * - 認証済み identity と対象 note の所有者を突き合わせる (note 単位の認可)
 * - 存在チェック → 所有者チェックの順で判定する
 * - CONCEAL_FOREIGN_NOTES 有効時は Forbidden を NotFound として返す (AccessPolicy)
 */
use thiserror::Error;

use crate::repos::NoteRow;
use crate::services::auth::IdentityClaim;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("note not found")]
    NotFound,
    #[error("note belongs to another user")]
    Forbidden,
}

/// Grant access to `note` only when it exists and is owned by `identity`.
pub fn authorize_access<'a>(
    identity: &IdentityClaim,
    note: Option<&'a NoteRow>,
) -> Result<&'a NoteRow, AccessError> {
    let note = note.ok_or(AccessError::NotFound)?;
    if note.owner != identity.id {
        return Err(AccessError::Forbidden);
    }
    Ok(note)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy {
    pub conceal_foreign_notes: bool,
}

impl AccessPolicy {
    pub fn new(conceal_foreign_notes: bool) -> Self {
        Self {
            conceal_foreign_notes,
        }
    }

    pub fn authorize<'a>(
        &self,
        identity: &IdentityClaim,
        note: Option<&'a NoteRow>,
    ) -> Result<&'a NoteRow, AccessError> {
        match authorize_access(identity, note) {
            Err(AccessError::Forbidden) if self.conceal_foreign_notes => {
                Err(AccessError::NotFound)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn note_owned_by(owner: &str) -> NoteRow {
        let now = Utc::now();
        NoteRow {
            note_id: 7,
            owner: owner.to_string(),
            title: "Groceries".to_string(),
            description: "Buy milk".to_string(),
            tag: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_is_granted() {
        let note = note_owned_by("u1");
        let granted = authorize_access(&IdentityClaim::new("u1"), Some(&note)).unwrap();
        assert_eq!(granted.note_id, 7);
    }

    #[test]
    fn other_identity_is_forbidden() {
        let note = note_owned_by("u1");
        for other in ["u2", "U1", "", "u1 "] {
            assert_eq!(
                authorize_access(&IdentityClaim::new(other), Some(&note)).err(),
                Some(AccessError::Forbidden),
                "identity {other:?}"
            );
        }
    }

    #[test]
    fn missing_note_is_not_found_for_everyone() {
        assert_eq!(
            authorize_access(&IdentityClaim::new("u1"), None).err(),
            Some(AccessError::NotFound)
        );
    }

    #[test]
    fn concealing_policy_hides_foreign_notes() {
        let note = note_owned_by("u1");
        let policy = AccessPolicy::new(true);

        assert_eq!(
            policy.authorize(&IdentityClaim::new("u2"), Some(&note)).err(),
            Some(AccessError::NotFound)
        );
        assert!(policy.authorize(&IdentityClaim::new("u1"), Some(&note)).is_ok());
        assert_eq!(
            AccessPolicy::default()
                .authorize(&IdentityClaim::new("u2"), Some(&note))
                .err(),
            Some(AccessError::Forbidden)
        );
    }
}
