//! CRUD operations over the notes document.
//!
//! Each mutating operation is one [`NoteStore::mutate`] call: a single load and,
//! on success, a single save.

use super::errors::NotesError;
use super::store::NoteStore;
use chrono::Utc;
use notes_types::{Note, NoteInput};
use uuid::Uuid;

pub const TITLE_OR_CONTENT_REQUIRED: &str = "Title or content required";

/// All notes, most recently created first
pub fn list(store: &NoteStore) -> Result<Vec<Note>, NotesError> {
    Ok(store.load()?.notes)
}

pub fn get(store: &NoteStore, id: &str) -> Result<Note, NotesError> {
    store
        .load()?
        .find(id)
        .cloned()
        .ok_or_else(|| NotesError::NotFound(id.to_string()))
}

/// Create a note at the front of the collection.
///
/// Absent fields count as empty; at least one must be non-blank.
pub fn create(store: &NoteStore, input: NoteInput) -> Result<Note, NotesError> {
    let title = input.title.as_deref().unwrap_or("").trim().to_string();
    let content = input.content.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() && content.is_empty() {
        return Err(NotesError::InvalidInput(TITLE_OR_CONTENT_REQUIRED.to_string()));
    }

    store.mutate(|doc| {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        doc.notes.insert(0, note.clone());
        Ok(note)
    })
}

/// Replace a note's title and content in place.
///
/// Absent fields keep the stored value. Unlike [`create`], an all-blank
/// result is accepted.
pub fn update(store: &NoteStore, id: &str, input: NoteInput) -> Result<Note, NotesError> {
    store.mutate(|doc| {
        let idx = doc
            .position(id)
            .ok_or_else(|| NotesError::NotFound(id.to_string()))?;
        let note = &mut doc.notes[idx];

        let title = input.title.unwrap_or_else(|| note.title.clone());
        let content = input.content.unwrap_or_else(|| note.content.clone());
        note.title = title.trim().to_string();
        note.content = content.trim().to_string();
        // Never move backwards, even if the wall clock does
        note.updated_at = Utc::now().max(note.updated_at);

        Ok(note.clone())
    })
}

pub fn delete(store: &NoteStore, id: &str) -> Result<(), NotesError> {
    store.mutate(|doc| {
        let idx = doc
            .position(id)
            .ok_or_else(|| NotesError::NotFound(id.to_string()))?;
        doc.notes.remove(idx);
        Ok(())
    })
}
