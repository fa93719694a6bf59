/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 */
use super::core::PublicId;

// notes
pub enum NoteTag {}
pub type PublicNoteId = PublicId<NoteTag>;
