//! Validated note operations over an injected [`NoteStore`].

use crate::{BlocknotesError, Note, NoteStore, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Orderings offered by the note list.
///
/// Serialized as PascalCase strings (`"TitleAsc"`, `"UpdatedDesc"`, …) in
/// the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SortOption {
    /// Title A→Z, ignoring case.
    TitleAsc,
    /// Title Z→A, ignoring case.
    TitleDesc,
    /// Least recently updated first.
    UpdatedAsc,
    /// Most recently updated first.
    #[default]
    UpdatedDesc,
    /// Oldest first.
    CreatedAsc,
    /// Newest first.
    CreatedDesc,
}

/// Sorts `notes` in place. Ties keep their existing relative order.
pub fn sort_notes(notes: &mut [Note], sort: SortOption) {
    match sort {
        SortOption::TitleAsc => notes.sort_by_cached_key(|n| n.title.to_lowercase()),
        SortOption::TitleDesc => notes.sort_by_cached_key(|n| Reverse(n.title.to_lowercase())),
        SortOption::UpdatedAsc => notes.sort_by_key(|n| n.updated_at),
        SortOption::UpdatedDesc => notes.sort_by_key(|n| Reverse(n.updated_at)),
        SortOption::CreatedAsc => notes.sort_by_key(|n| n.created_at),
        SortOption::CreatedDesc => notes.sort_by_key(|n| Reverse(n.created_at)),
    }
}

/// Note operations for the application layer.
///
/// Validates notes before they are written, stamps `updated_at` on every
/// update, and turns "no row affected" into [`BlocknotesError::NoteNotFound`].
pub struct NoteRepository<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores a new note and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`BlocknotesError::ValidationFailed`] if the title is blank, or
    /// any error from the store.
    pub fn insert_note(&mut self, note: &Note) -> Result<i64> {
        validate(note)?;
        let id = self.store.insert(note)?;
        log::debug!("Note inserted with id {id}");
        Ok(id)
    }

    /// Writes `note` back with a fresh `updated_at` and returns what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`BlocknotesError::ValidationFailed`] if the title is blank,
    /// [`BlocknotesError::NoteNotFound`] if no note has `note.id`, or any
    /// error from the store.
    pub fn update_note(&mut self, note: &Note) -> Result<Note> {
        validate(note)?;
        let updated = Note {
            updated_at: chrono::Utc::now().timestamp_millis(),
            ..note.clone()
        };
        if self.store.update(&updated)? == 0 {
            return Err(BlocknotesError::NoteNotFound(note.id));
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`BlocknotesError::NoteNotFound`] if no note has `id`.
    pub fn delete_note(&mut self, id: i64) -> Result<()> {
        if self.store.delete(id)? == 0 {
            return Err(BlocknotesError::NoteNotFound(id));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`BlocknotesError::NoteNotFound`] if no note has `id`.
    pub fn get_note_by_id(&self, id: i64) -> Result<Note> {
        self.store
            .get_by_id(id)?
            .ok_or(BlocknotesError::NoteNotFound(id))
    }

    /// All notes, most recently updated first.
    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        let notes = self.store.get_all()?;
        log::debug!("Retrieved {} notes", notes.len());
        Ok(notes)
    }

    /// Notes matching `query`; a blank query returns every note.
    pub fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        if query.trim().is_empty() {
            return self.get_all_notes();
        }
        self.store.search(query)
    }

    pub fn notes_count(&self) -> Result<usize> {
        self.store.count()
    }

    /// The stored editor JSON of a note.
    ///
    /// # Errors
    ///
    /// Returns [`BlocknotesError::NoteNotFound`] if no note has `id`.
    pub fn export_note_as_json(&self, id: i64) -> Result<String> {
        Ok(self.get_note_by_id(id)?.content)
    }

    /// Creates a note from editor JSON produced elsewhere and returns its id.
    ///
    /// The JSON is stored as given; it is decoded leniently when read.
    ///
    /// # Errors
    ///
    /// Same as [`insert_note`](Self::insert_note).
    pub fn import_note_from_json(&mut self, title: &str, json: &str, tags: &str) -> Result<i64> {
        self.insert_note(&Note::new(title, json, tags))
    }
}

fn validate(note: &Note) -> Result<()> {
    if note.is_valid() {
        Ok(())
    } else {
        Err(BlocknotesError::ValidationFailed(
            "Note title must not be empty".to_string(),
        ))
    }
}
