/*
 * Responsibility
 * - notes CRUD の契約 (NoteStore) と Postgres 実装
 * - update / delete は owner で絞り込む (guard と store の二重チェック)
 * - owner 列は作成時にだけ書き込み、以降は更新しない
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::Config;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct NoteRow {
    pub note_id: i64,
    pub owner: String,

    pub title: String,
    pub description: String,
    pub tag: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage seam for notes.
///
/// - `list_by_owner` returns notes in creation order.
/// - `update` / `delete` return `None` when no note with that id belongs to `owner`.
/// - `None` in an `update` field means "leave unchanged".
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn list_by_owner(&self, owner: &str) -> RepoResult<Vec<NoteRow>>;

    async fn create(
        &self,
        owner: &str,
        title: &str,
        description: &str,
        tag: Option<&str>,
    ) -> RepoResult<NoteRow>;

    async fn get(&self, note_id: i64) -> RepoResult<Option<NoteRow>>;

    async fn update(
        &self,
        note_id: i64,
        owner: &str,
        title: Option<&str>,
        description: Option<&str>,
        tag: Option<&str>,
    ) -> RepoResult<Option<NoteRow>>;

    async fn delete(&self, note_id: i64, owner: &str) -> RepoResult<Option<NoteRow>>;
}

#[derive(Clone, Debug)]
pub struct PgNoteRepo {
    pool: PgPool,
}

impl PgNoteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from `DATABASE_URL` and bring the schema up to date.
    pub async fn connect(config: &Config, database_url: &str) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(RepoError::from)?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl NoteStore for PgNoteRepo {
    async fn list_by_owner(&self, owner: &str) -> RepoResult<Vec<NoteRow>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT
                note_id, owner, title, description, tag, created_at, updated_at
            FROM notes
            WHERE owner = $1
            ORDER BY note_id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(
        &self,
        owner: &str,
        title: &str,
        description: &str,
        tag: Option<&str>,
    ) -> RepoResult<NoteRow> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO notes (owner, title, description, tag)
            VALUES ($1, $2, $3, $4)
            RETURNING
                note_id, owner, title, description, tag, created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(title)
        .bind(description)
        .bind(tag)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, note_id: i64) -> RepoResult<Option<NoteRow>> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT
                note_id, owner, title, description, tag, created_at, updated_at
            FROM notes
            WHERE note_id = $1
            "#,
        )
        .bind(note_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        note_id: i64,
        owner: &str,
        title: Option<&str>,
        description: Option<&str>,
        tag: Option<&str>,
    ) -> RepoResult<Option<NoteRow>> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            UPDATE notes
            SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                tag = COALESCE($5, tag),
                updated_at = now()
            WHERE note_id = $1 AND owner = $2
            RETURNING
                note_id, owner, title, description, tag, created_at, updated_at
            "#,
        )
        .bind(note_id)
        .bind(owner)
        .bind(title)
        .bind(description)
        .bind(tag)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, note_id: i64, owner: &str) -> RepoResult<Option<NoteRow>> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            DELETE FROM notes
            WHERE note_id = $1 AND owner = $2
            RETURNING
                note_id, owner, title, description, tag, created_at, updated_at
            "#,
        )
        .bind(note_id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
