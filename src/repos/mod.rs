/*
 * Responsibility
 * - note の永続化 (NoteStore trait と、その Postgres / in-memory 実装)
 */
pub mod error;
pub mod memory_note_repo;
pub mod note_repo;

pub use error::{RepoError, RepoResult};
pub use memory_note_repo::MemoryNoteRepo;
pub use note_repo::{NoteRow, NoteStore, PgNoteRepo};
