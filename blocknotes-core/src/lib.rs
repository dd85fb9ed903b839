//! Core library for Blocknotes, a local note-taking library whose note bodies
//! are Editor.js-compatible block documents.
//!
//! The document model lives in [`Block`], [`Document`] and the [`codec`]
//! module. Codec functions are total: malformed content is read back as a
//! plain-text paragraph instead of failing, so a damaged note stays editable.
//! Persistence goes through a [`NoteStore`]; [`NoteRepository`] adds
//! validation and timestamps on top of any store.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

pub use core::codec;
pub use core::settings;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    block::{
        is_valid_block_type, Block, CodeData, HeaderData, ListData, ListStyle, ParagraphData,
        QuoteData, WarningData, DEFAULT_ALIGNMENT, DEFAULT_HEADER_LEVEL,
    },
    document::{Document, EDITOR_VERSION},
    error::{BlocknotesError, Result},
    note::Note,
    repository::{sort_notes, NoteRepository, SortOption},
    settings::AppSettings,
    storage::Storage,
    store::{NoteStore, SqliteNoteStore},
};
