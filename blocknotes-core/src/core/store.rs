//! Note persistence: the [`NoteStore`] interface and its SQLite implementation.

use crate::{Note, Result, Storage};
use rusqlite::OptionalExtension;
use std::path::Path;

/// Persistence operations the repository needs from a backing store.
///
/// Implementations store notes verbatim; validation and timestamp handling
/// belong to [`NoteRepository`](crate::NoteRepository).
pub trait NoteStore {
    /// Inserts `note` ignoring its `id` and returns the id the store assigned.
    fn insert(&mut self, note: &Note) -> Result<i64>;

    /// Overwrites title, content, tags and `updated_at` of the row with
    /// `note.id`. Returns the number of rows changed.
    fn update(&mut self, note: &Note) -> Result<usize>;

    /// Returns the number of rows removed.
    fn delete(&mut self, id: i64) -> Result<usize>;

    fn get_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// All notes, most recently updated first.
    fn get_all(&self) -> Result<Vec<Note>>;

    /// Notes whose title, tags or raw content contain `text`, most recently
    /// updated first.
    fn search(&self, text: &str) -> Result<Vec<Note>>;

    fn count(&self) -> Result<usize>;
}

const NOTE_COLUMNS: &str = "id, title, content, tags, created_at, updated_at";

/// [`NoteStore`] backed by the `notes` table of a SQLite database.
pub struct SqliteNoteStore {
    storage: Storage,
}

impl SqliteNoteStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Opens the database at `path`, creating it and its schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Storage::create(path)?))
    }
}

impl NoteStore for SqliteNoteStore {
    fn insert(&mut self, note: &Note) -> Result<i64> {
        let conn = self.storage.connection();
        conn.execute(
            "INSERT INTO notes (title, content, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![note.title, note.content, note.tags, note.created_at, note.updated_at],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Inserted note {id}");
        Ok(id)
    }

    fn update(&mut self, note: &Note) -> Result<usize> {
        let changed = self.storage.connection().execute(
            "UPDATE notes SET title = ?1, content = ?2, tags = ?3, updated_at = ?4 WHERE id = ?5",
            rusqlite::params![note.title, note.content, note.tags, note.updated_at, note.id],
        )?;
        log::debug!("Updated note {}, rows affected: {changed}", note.id);
        Ok(changed)
    }

    fn delete(&mut self, id: i64) -> Result<usize> {
        let changed = self
            .storage
            .connection()
            .execute("DELETE FROM notes WHERE id = ?1", [id])?;
        log::debug!("Deleted note {id}, rows affected: {changed}");
        Ok(changed)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Note>> {
        let note = self
            .storage
            .connection()
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                [id],
                map_note_row,
            )
            .optional()?;
        Ok(note)
    }

    fn get_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self.storage.connection().prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY updated_at DESC, id DESC"
        ))?;
        let notes = stmt
            .query_map([], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn search(&self, text: &str) -> Result<Vec<Note>> {
        let pattern = format!("%{}%", escape_like(text));
        let mut stmt = self.storage.connection().prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE title LIKE ?1 ESCAPE '\\'
                OR tags LIKE ?1 ESCAPE '\\'
                OR content LIKE ?1 ESCAPE '\\'
             ORDER BY updated_at DESC, id DESC"
        ))?;
        let notes = stmt
            .query_map([&pattern], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        log::debug!("Search for '{text}' matched {} notes", notes.len());
        Ok(notes)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .storage
            .connection()
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Row-mapping closure for `SELECT {NOTE_COLUMNS}` queries.
fn map_note_row(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tags: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Escapes `LIKE` wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
