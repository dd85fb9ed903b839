//! The Editor.js JSON envelope a note body is stored as.

use crate::{Block, BlocknotesError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Editor.js release whose block schema this crate reads and writes.
pub const EDITOR_VERSION: &str = "2.28.2";

/// An ordered list of blocks plus the envelope metadata.
///
/// Serializes as `{ "time": <epoch-millis>, "blocks": [...], "version": "2.28.2" }`.
/// `blocks` is required. `time` and `version` are optional and read
/// leniently: a `time` that is null or not a number becomes 0, and a
/// `version` that is not a string becomes [`EDITOR_VERSION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: i64,
    pub blocks: Vec<Block>,
    #[serde(default = "default_version", deserialize_with = "lenient_version")]
    pub version: String,
}

fn default_version() -> String {
    EDITOR_VERSION.to_string()
}

/// Accepts integers, floats (truncated) and numeric strings.
fn lenient_time<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let time = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };
    Ok(time.unwrap_or(0))
}

fn lenient_version<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => default_version(),
    })
}

impl Document {
    /// Wraps `blocks` in a fresh envelope stamped with the current time.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            time: chrono::Utc::now().timestamp_millis(),
            blocks,
            version: default_version(),
        }
    }

    /// A document holding one empty paragraph.
    pub fn empty() -> Self {
        Self::new(vec![Block::empty_paragraph()])
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Appends `block` at the end.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Removes and returns the block at `index`.
    ///
    /// If that leaves the document without blocks, an empty paragraph is
    /// inserted so a document is never blank.
    ///
    /// # Errors
    ///
    /// Returns [`BlocknotesError::OutOfRange`] if `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<Block> {
        self.check_index(index)?;
        let removed = self.blocks.remove(index);
        if self.blocks.is_empty() {
            self.blocks.push(Block::empty_paragraph());
        }
        Ok(removed)
    }

    /// Replaces the block at `index` and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`BlocknotesError::OutOfRange`] if `index` is past the end.
    pub fn replace(&mut self, index: usize, block: Block) -> Result<Block> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.blocks[index], block))
    }

    /// Moves the block at `from` so it ends up at `to`, shifting the blocks
    /// in between. Equal indices leave the document untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BlocknotesError::OutOfRange`] if either index is past the end.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let block = self.blocks.remove(from);
            self.blocks.insert(to, block);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(BlocknotesError::OutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
