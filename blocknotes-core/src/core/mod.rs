//! Internal domain modules for the Blocknotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod block;
pub mod codec;
pub mod document;
pub mod error;
pub mod note;
pub mod repository;
pub mod settings;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use block::{
    is_valid_block_type, Block, CodeData, HeaderData, ListData, ListStyle, ParagraphData,
    QuoteData, WarningData, DEFAULT_ALIGNMENT, DEFAULT_HEADER_LEVEL,
};
#[doc(inline)]
pub use document::{Document, EDITOR_VERSION};
#[doc(inline)]
pub use error::{BlocknotesError, Result};
#[doc(inline)]
pub use note::Note;
#[doc(inline)]
pub use repository::{sort_notes, NoteRepository, SortOption};
#[doc(inline)]
pub use settings::AppSettings;
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use store::{NoteStore, SqliteNoteStore};
