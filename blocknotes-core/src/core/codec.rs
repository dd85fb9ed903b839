//! Conversions between stored note content and blocks.
//!
//! Every public function here is total: whatever string it is handed, it
//! returns a usable value and never an error. Content that is not a valid
//! envelope is treated as plain text, so a corrupted note stays readable and
//! editable. The fallible parser underneath is [`parse_document`].

use crate::{Block, BlocknotesError, Document, ListStyle, Result};
use regex::Regex;
use std::sync::LazyLock;

/// `1. `, `23. ` … at the start of a plain-text line.
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").unwrap());

/// Separator placed between blocks in the plain-text projection.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Parses `json` as an editor envelope.
///
/// # Errors
///
/// Returns [`BlocknotesError::MalformedDocument`] if `json` is not valid JSON
/// or lacks the `blocks` array.
pub fn parse_document(json: &str) -> Result<Document> {
    serde_json::from_str(json).map_err(|e| BlocknotesError::MalformedDocument(e.to_string()))
}

/// Encodes `blocks` as an envelope stamped with the current time.
pub fn blocks_to_json(blocks: &[Block]) -> String {
    match serde_json::to_string(&Document::new(blocks.to_vec())) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode blocks, storing an empty document: {e}");
            empty_editor_json()
        }
    }
}

/// An envelope holding a single empty paragraph.
pub fn empty_editor_json() -> String {
    serde_json::to_string(&Document::empty()).unwrap_or_default()
}

/// Decodes stored content into blocks. Always returns at least one block.
///
/// Blank input and envelopes without blocks yield one empty paragraph.
/// Anything that is not an envelope becomes a single paragraph whose text is
/// the input itself.
pub fn json_to_blocks(json: &str) -> Vec<Block> {
    if json.trim().is_empty() {
        return vec![Block::empty_paragraph()];
    }
    match parse_document(json) {
        Ok(doc) if doc.is_empty() => vec![Block::empty_paragraph()],
        Ok(doc) => doc.blocks,
        Err(e) => {
            log::warn!("Content is not an editor document, reading it as plain text: {e}");
            vec![Block::paragraph(json)]
        }
    }
}

/// Returns `true` only for a parseable envelope holding at least one block.
pub fn validate_editor_json(json: &str) -> bool {
    match parse_document(json) {
        Ok(doc) => !doc.is_empty(),
        Err(e) => {
            log::debug!("Invalid editor JSON: {e}");
            false
        }
    }
}

/// Number of blocks the content decodes to.
pub fn block_count(json: &str) -> usize {
    json_to_blocks(json).len()
}

/// Appends `block` to the document in `json`.
pub fn add_block_to_json(json: &str, block: Block) -> String {
    edit_json(json, "add block", |doc| {
        doc.push(block);
        Ok(())
    })
}

/// Removes the block at `index`; out-of-range indices leave the blocks as they were.
pub fn remove_block_from_json(json: &str, index: usize) -> String {
    edit_json(json, "remove block", |doc| doc.remove(index).map(drop))
}

/// Replaces the block at `index`; out-of-range indices leave the blocks as they were.
pub fn update_block_in_json(json: &str, index: usize, block: Block) -> String {
    edit_json(json, "update block", |doc| doc.replace(index, block).map(drop))
}

/// Moves the block at `from` to `to`; out-of-range or equal indices leave
/// the blocks as they were.
pub fn move_block(json: &str, from: usize, to: usize) -> String {
    edit_json(json, "move block", |doc| doc.move_block(from, to))
}

/// Decodes `json`, applies `edit`, and re-encodes. An edit that fails is
/// logged and skipped; if re-encoding fails the input is returned as is.
fn edit_json<F>(json: &str, action: &str, edit: F) -> String
where
    F: FnOnce(&mut Document) -> Result<()>,
{
    let mut doc = Document::new(json_to_blocks(json));
    if let Err(e) = edit(&mut doc) {
        log::debug!("Skipped {action}: {e}");
    }
    match serde_json::to_string(&doc) {
        Ok(out) => out,
        Err(e) => {
            log::warn!("Failed to {action}: {e}");
            json.to_string()
        }
    }
}

// ── Plain text ────────────────────────────────────────────────────

/// Plain-text projection of stored content.
pub fn extract_plain_text(json: &str) -> String {
    blocks_to_plain_text(&json_to_blocks(json))
}

/// Renders each block as text and joins them with blank lines.
pub fn blocks_to_plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(block_to_plain_text)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
        .trim()
        .to_string()
}

fn block_to_plain_text(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => p.text.clone(),
        Block::Header(h) => format!("# {}", h.text),
        Block::Quote(q) => format!("\"{}\"", q.text),
        Block::List(l) => l
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| match l.style {
                ListStyle::Ordered => format!("{}. {item}", i + 1),
                ListStyle::Unordered => format!("• {item}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Code(c) => format!("```\n{}\n```", c.code),
        Block::Warning(w) => format!("{}: {}", w.title, w.message),
        Block::Delimiter => "---".to_string(),
    }
}

/// Parses free text into blocks and encodes them as an envelope.
pub fn import_from_plain_text(text: &str) -> String {
    blocks_to_json(&plain_text_to_blocks(text))
}

/// Line-oriented parse of free text into blocks.
///
/// Consecutive ordinary lines are joined with spaces into one paragraph.
/// Headers, quotes, delimiters, list lines and blank lines end the current
/// paragraph. Each list line, bulleted or numbered, becomes its own
/// single-item unordered list.
pub fn plain_text_to_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph = String::new();

    for line in text.split('\n').map(str::trim) {
        if line.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        let block = if let Some(rest) = line.strip_prefix('#') {
            Block::header(rest.trim(), crate::DEFAULT_HEADER_LEVEL)
        } else if line.starts_with('"') && line.ends_with('"') {
            let text = line
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(line);
            Block::quote(text, "")
        } else if line == "---" {
            Block::delimiter()
        } else if let Some(rest) = line.strip_prefix('•').or_else(|| line.strip_prefix('-')) {
            Block::list(ListStyle::Unordered, vec![rest.trim().to_string()])
        } else if let Some(m) = ORDERED_ITEM_RE.find(line) {
            Block::list(ListStyle::Unordered, vec![line[m.end()..].trim().to_string()])
        } else {
            if !paragraph.is_empty() {
                paragraph.push(' ');
            }
            paragraph.push_str(line);
            continue;
        };

        flush_paragraph(&mut paragraph, &mut blocks);
        blocks.push(block);
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    if blocks.is_empty() {
        blocks.push(Block::empty_paragraph());
    }
    blocks
}

fn flush_paragraph(paragraph: &mut String, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::paragraph(paragraph.trim()));
        paragraph.clear();
    }
}
