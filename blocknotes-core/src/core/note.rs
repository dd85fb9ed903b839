use crate::core::codec;
use crate::Block;
use serde::{Deserialize, Serialize};

/// A stored note: metadata plus an editor document held as JSON.
///
/// `id` is `0` until the note store assigns one on insert. `content` is
/// opaque to the note itself; it is decoded on demand and falls back to a
/// plain-text paragraph when it is not a valid editor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Comma-separated tag list as stored.
    pub tags: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

impl Note {
    /// Creates an unsaved note stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            tags: tags.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A note is valid when its title is not blank.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Case-insensitive substring match against the title, each tag, and
    /// the plain-text rendering of the content.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .tags_list()
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
            || self.plain_text_content().to_lowercase().contains(&query)
    }

    /// Tags split on commas, trimmed, with empty entries dropped.
    pub fn tags_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns a copy whose tags are `tags` joined with `", "`.
    pub fn with_tags_list<S: AsRef<str>>(&self, tags: &[S]) -> Self {
        let tags = tags
            .iter()
            .map(|tag| tag.as_ref().trim())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            tags,
            ..self.clone()
        }
    }

    /// Decodes the content; never fails and never returns an empty list.
    pub fn content_as_blocks(&self) -> Vec<Block> {
        codec::json_to_blocks(&self.content)
    }

    /// Returns a copy whose content is `blocks` encoded as an editor document.
    pub fn with_content_from_blocks(&self, blocks: &[Block]) -> Self {
        Self {
            content: codec::blocks_to_json(blocks),
            ..self.clone()
        }
    }

    /// Plain-text rendering of the content, as used for search and previews.
    pub fn plain_text_content(&self) -> String {
        codec::extract_plain_text(&self.content)
    }
}
