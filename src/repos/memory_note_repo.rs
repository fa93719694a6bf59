use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::repos::error::RepoResult;
use crate::repos::note_repo::{NoteRow, NoteStore};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    // BTreeMap keeps iteration in id (= creation) order
    notes: BTreeMap<i64, NoteRow>,
}

/// In-memory NoteStore for development (no DATABASE_URL) and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryNoteRepo {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryNoteRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteRepo {
    async fn list_by_owner(&self, owner: &str) -> RepoResult<Vec<NoteRow>> {
        let inner = self.inner.lock();
        Ok(inner
            .notes
            .values()
            .filter(|n| n.owner == owner)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        owner: &str,
        title: &str,
        description: &str,
        tag: Option<&str>,
    ) -> RepoResult<NoteRow> {
        let mut inner = self.inner.lock();
        inner.last_id += 1;

        let now = Utc::now();
        let row = NoteRow {
            note_id: inner.last_id,
            owner: owner.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            tag: tag.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        inner.notes.insert(row.note_id, row.clone());

        Ok(row)
    }

    async fn get(&self, note_id: i64) -> RepoResult<Option<NoteRow>> {
        Ok(self.inner.lock().notes.get(&note_id).cloned())
    }

    async fn update(
        &self,
        note_id: i64,
        owner: &str,
        title: Option<&str>,
        description: Option<&str>,
        tag: Option<&str>,
    ) -> RepoResult<Option<NoteRow>> {
        let mut inner = self.inner.lock();
        let Some(note) = inner
            .notes
            .get_mut(&note_id)
            .filter(|n| n.owner == owner)
        else {
            return Ok(None);
        };

        if let Some(title) = title {
            note.title = title.to_string();
        }
        if let Some(description) = description {
            note.description = description.to_string();
        }
        if let Some(tag) = tag {
            note.tag = Some(tag.to_string());
        }
        note.updated_at = Utc::now();

        Ok(Some(note.clone()))
    }

    async fn delete(&self, note_id: i64, owner: &str) -> RepoResult<Option<NoteRow>> {
        let mut inner = self.inner.lock();
        let owned = inner
            .notes
            .get(&note_id)
            .is_some_and(|n| n.owner == owner);

        Ok(if owned {
            inner.notes.remove(&note_id)
        } else {
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_follow_creation_order() {
        let repo = MemoryNoteRepo::new();
        let a = repo.create("u1", "a", "first", None).await.unwrap();
        let b = repo.create("u2", "b", "second", None).await.unwrap();
        let c = repo.create("u1", "c", "third", Some("work")).await.unwrap();

        assert!(a.note_id < b.note_id && b.note_id < c.note_id);

        let mine = repo.list_by_owner("u1").await.unwrap();
        assert_eq!(
            mine.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(),
            ["a", "c"]
        );
        assert_eq!(mine[1].tag.as_deref(), Some("work"));
    }

    #[tokio::test]
    async fn update_is_partial_and_owner_scoped() {
        let repo = MemoryNoteRepo::new();
        let note = repo.create("u1", "t", "d", None).await.unwrap();

        assert!(
            repo.update(note.note_id, "u2", Some("stolen"), None, None)
                .await
                .unwrap()
                .is_none()
        );

        let updated = repo
            .update(note.note_id, "u1", None, Some("d2"), Some("home"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "t");
        assert_eq!(updated.description, "d2");
        assert_eq!(updated.tag.as_deref(), Some("home"));
        assert_eq!(updated.owner, "u1");
    }

    #[tokio::test]
    async fn delete_is_owner_scoped_and_not_repeatable() {
        let repo = MemoryNoteRepo::new();
        let note = repo.create("u1", "t", "d", None).await.unwrap();

        assert!(repo.delete(note.note_id, "u2").await.unwrap().is_none());
        assert!(repo.get(note.note_id).await.unwrap().is_some());

        assert_eq!(
            repo.delete(note.note_id, "u1").await.unwrap(),
            Some(note.clone())
        );
        assert!(repo.delete(note.note_id, "u1").await.unwrap().is_none());
        assert!(repo.get(note.note_id).await.unwrap().is_none());
    }
}
