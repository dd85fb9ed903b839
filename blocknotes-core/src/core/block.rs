//! Editor blocks: the closed set of content units a note body is built from.
//!
//! Each [`Block`] variant carries its own payload struct. On the wire a block
//! is the Editor.js shape `{ "type": <tag>, "data": { ... } }`; decoding goes
//! through an untyped intermediate so that loosely typed producers (a header
//! `level` sent as `"3"` or `3.0`, a list without `items`) still yield a
//! well-formed block.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const TYPE_PARAGRAPH: &str = "paragraph";
pub const TYPE_HEADER: &str = "header";
pub const TYPE_QUOTE: &str = "quote";
pub const TYPE_LIST: &str = "list";
pub const TYPE_CODE: &str = "code";
pub const TYPE_DELIMITER: &str = "delimiter";
pub const TYPE_WARNING: &str = "warning";

/// Header level used when none is given or the given one is unusable.
pub const DEFAULT_HEADER_LEVEL: u8 = 2;

/// Quote alignment used when none is given.
pub const DEFAULT_ALIGNMENT: &str = "left";

/// Maximum number of code characters shown by [`Block::display_text`].
const CODE_PREVIEW_CHARS: usize = 50;

/// Returns `true` if `block_type` is one of the seven known wire tags.
pub fn is_valid_block_type(block_type: &str) -> bool {
    matches!(
        block_type,
        TYPE_PARAGRAPH
            | TYPE_HEADER
            | TYPE_QUOTE
            | TYPE_LIST
            | TYPE_CODE
            | TYPE_DELIMITER
            | TYPE_WARNING
    )
}

/// Bullet style of a [`Block::List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

impl ListStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Unordered => "unordered",
        }
    }

    /// Anything other than the exact string `"ordered"` is unordered.
    fn from_wire(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("ordered") => Self::Ordered,
            _ => Self::Unordered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
    pub text: String,
    level: u8,
}

impl HeaderData {
    /// Always within `1..=3`.
    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for HeaderData {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: DEFAULT_HEADER_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteData {
    pub text: String,
    pub caption: String,
    pub alignment: String,
}

impl Default for QuoteData {
    fn default() -> Self {
        Self {
            text: String::new(),
            caption: String::new(),
            alignment: DEFAULT_ALIGNMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListData {
    pub style: ListStyle,
    items: Vec<String>,
}

impl ListData {
    /// Never empty; a fresh list holds one blank item.
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl Default for ListData {
    fn default() -> Self {
        Self {
            style: ListStyle::Unordered,
            items: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeData {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WarningData {
    pub title: String,
    pub message: String,
}

/// One editable content unit of a note body.
///
/// Blocks are values: every `with_*` method returns a new block and leaves
/// the receiver untouched. A mutator that does not apply to the receiver's
/// variant (e.g. [`with_level`](Self::with_level) on a paragraph) returns an
/// unchanged copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub enum Block {
    Paragraph(ParagraphData),
    Header(HeaderData),
    Quote(QuoteData),
    List(ListData),
    Code(CodeData),
    Warning(WarningData),
    Delimiter,
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(ParagraphData { text: text.into() })
    }

    pub fn empty_paragraph() -> Self {
        Self::Paragraph(ParagraphData::default())
    }

    /// Creates a header; levels outside `1..=3` become [`DEFAULT_HEADER_LEVEL`].
    pub fn header(text: impl Into<String>, level: u8) -> Self {
        Self::Header(HeaderData {
            text: text.into(),
            level: normalize_level(i64::from(level)),
        })
    }

    /// Creates a left-aligned quote.
    pub fn quote(text: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::Quote(QuoteData {
            text: text.into(),
            caption: caption.into(),
            alignment: DEFAULT_ALIGNMENT.to_string(),
        })
    }

    /// Creates a list; an empty `items` becomes a single blank item.
    pub fn list(style: ListStyle, items: Vec<String>) -> Self {
        Self::List(ListData {
            style,
            items: non_empty_items(items),
        })
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(CodeData { code: code.into() })
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Warning(WarningData {
            title: title.into(),
            message: message.into(),
        })
    }

    pub fn delimiter() -> Self {
        Self::Delimiter
    }

    /// The Editor.js type tag of this block.
    pub fn block_type(&self) -> &'static str {
        match self {
            Self::Paragraph(_) => TYPE_PARAGRAPH,
            Self::Header(_) => TYPE_HEADER,
            Self::Quote(_) => TYPE_QUOTE,
            Self::List(_) => TYPE_LIST,
            Self::Code(_) => TYPE_CODE,
            Self::Warning(_) => TYPE_WARNING,
            Self::Delimiter => TYPE_DELIMITER,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Paragraph(p) => Some(&p.text),
            Self::Header(h) => Some(&h.text),
            Self::Quote(q) => Some(&q.text),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<u8> {
        match self {
            Self::Header(h) => Some(h.level),
            _ => None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Quote(q) => Some(&q.caption),
            _ => None,
        }
    }

    pub fn alignment(&self) -> Option<&str> {
        match self {
            Self::Quote(q) => Some(&q.alignment),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<ListStyle> {
        match self {
            Self::List(l) => Some(l.style),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[String]> {
        match self {
            Self::List(l) => Some(&l.items),
            _ => None,
        }
    }

    pub fn code_text(&self) -> Option<&str> {
        match self {
            Self::Code(c) => Some(&c.code),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Warning(w) => Some(&w.title),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Warning(w) => Some(&w.message),
            _ => None,
        }
    }

    // ── Mutators ──────────────────────────────────────────────────

    /// Sets the text of a paragraph, header or quote.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        let mut block = self.clone();
        match &mut block {
            Self::Paragraph(p) => p.text = text.into(),
            Self::Header(h) => h.text = text.into(),
            Self::Quote(q) => q.text = text.into(),
            _ => {}
        }
        block
    }

    /// Sets a header's level; levels outside `1..=3` become [`DEFAULT_HEADER_LEVEL`].
    pub fn with_level(&self, level: u8) -> Self {
        let mut block = self.clone();
        if let Self::Header(h) = &mut block {
            h.level = normalize_level(i64::from(level));
        }
        block
    }

    pub fn with_caption(&self, caption: impl Into<String>) -> Self {
        let mut block = self.clone();
        if let Self::Quote(q) = &mut block {
            q.caption = caption.into();
        }
        block
    }

    pub fn with_alignment(&self, alignment: impl Into<String>) -> Self {
        let mut block = self.clone();
        if let Self::Quote(q) = &mut block {
            q.alignment = alignment.into();
        }
        block
    }

    pub fn with_style(&self, style: ListStyle) -> Self {
        let mut block = self.clone();
        if let Self::List(l) = &mut block {
            l.style = style;
        }
        block
    }

    /// Replaces a list's items; an empty `items` becomes a single blank item.
    pub fn with_items(&self, items: Vec<String>) -> Self {
        let mut block = self.clone();
        if let Self::List(l) = &mut block {
            l.items = non_empty_items(items);
        }
        block
    }

    pub fn with_code(&self, code: impl Into<String>) -> Self {
        let mut block = self.clone();
        if let Self::Code(c) = &mut block {
            c.code = code.into();
        }
        block
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        let mut block = self.clone();
        if let Self::Warning(w) = &mut block {
            w.title = title.into();
        }
        block
    }

    pub fn with_message(&self, message: impl Into<String>) -> Self {
        let mut block = self.clone();
        if let Self::Warning(w) = &mut block {
            w.message = message.into();
        }
        block
    }

    /// Returns `true` when the block carries no visible content.
    ///
    /// A delimiter is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Paragraph(p) => is_blank(&p.text),
            Self::Header(h) => is_blank(&h.text),
            Self::Quote(q) => is_blank(&q.text) && is_blank(&q.caption),
            Self::List(l) => l.items.iter().all(|item| is_blank(item)),
            Self::Code(c) => is_blank(&c.code),
            Self::Warning(w) => is_blank(&w.title) && is_blank(&w.message),
            Self::Delimiter => false,
        }
    }

    /// One-line summary of the block for list and preview rows.
    pub fn display_text(&self) -> String {
        match self {
            Self::Paragraph(p) => p.text.clone(),
            Self::Header(h) => format!("H{}: {}", h.level, h.text),
            Self::Quote(q) => format!("\"{}\"", q.text),
            Self::List(l) => l.items.join(", "),
            Self::Code(c) => {
                let preview: String = c.code.chars().take(CODE_PREVIEW_CHARS).collect();
                if c.code.chars().count() > CODE_PREVIEW_CHARS {
                    format!("Code: {preview}...")
                } else {
                    format!("Code: {preview}")
                }
            }
            Self::Warning(w) => format!("{}: {}", w.title, w.message),
            Self::Delimiter => "---".to_string(),
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::empty_paragraph()
    }
}

/// Maps any integer onto a valid header level.
pub fn normalize_level(level: i64) -> u8 {
    match level {
        1..=3 => level as u8,
        _ => DEFAULT_HEADER_LEVEL,
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn non_empty_items(items: Vec<String>) -> Vec<String> {
    if items.is_empty() {
        vec![String::new()]
    } else {
        items
    }
}

// ── Wire representation ───────────────────────────────────────────

/// Untyped `{ type, data }` pair as it appears inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    data: Value,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let empty = Map::new();
        let data = raw.data.as_object().unwrap_or(&empty);

        match raw.block_type.as_str() {
            TYPE_PARAGRAPH => Block::Paragraph(ParagraphData {
                text: string_field(data, "text"),
            }),
            TYPE_HEADER => Block::Header(HeaderData {
                text: string_field(data, "text"),
                level: coerce_level(data.get("level")),
            }),
            TYPE_QUOTE => Block::Quote(QuoteData {
                text: string_field(data, "text"),
                caption: string_field(data, "caption"),
                alignment: data
                    .get("alignment")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_ALIGNMENT)
                    .to_string(),
            }),
            TYPE_LIST => Block::List(ListData {
                style: ListStyle::from_wire(data.get("style")),
                items: non_empty_items(string_items(data.get("items"))),
            }),
            TYPE_CODE => Block::Code(CodeData {
                code: string_field(data, "code"),
            }),
            TYPE_WARNING => Block::Warning(WarningData {
                title: string_field(data, "title"),
                message: string_field(data, "message"),
            }),
            TYPE_DELIMITER => Block::Delimiter,
            other => {
                log::warn!("Unknown block type '{other}', reading it as a paragraph");
                Block::Paragraph(ParagraphData {
                    text: string_field(data, "text"),
                })
            }
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let block_type = block.block_type().to_string();
        let data = match block {
            Block::Paragraph(p) => json!({ "text": p.text }),
            Block::Header(h) => json!({ "text": h.text, "level": h.level }),
            Block::Quote(q) => json!({
                "text": q.text,
                "caption": q.caption,
                "alignment": q.alignment,
            }),
            Block::List(l) => json!({ "style": l.style.as_str(), "items": l.items }),
            Block::Code(c) => json!({ "code": c.code }),
            Block::Warning(w) => json!({ "title": w.title, "message": w.message }),
            Block::Delimiter => json!({}),
        };
        RawBlock { block_type, data }
    }
}

fn string_field(data: &Map<String, Value>, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Reads a header level sent as an integer, a float or a numeric string.
fn coerce_level(value: Option<&Value>) -> u8 {
    let level = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };
    level.map_or(DEFAULT_HEADER_LEVEL, normalize_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Block {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_header_level_accepts_int_float_and_string() {
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":3}}"#).level(), Some(3));
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":1.0}}"#).level(), Some(1));
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":"3"}}"#).level(), Some(3));
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":"1.0"}}"#).level(), Some(1));
    }

    #[test]
    fn test_header_level_falls_back_to_two() {
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":"big"}}"#).level(), Some(2));
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a"}}"#).level(), Some(2));
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":7}}"#).level(), Some(2));
        assert_eq!(decode(r#"{"type":"header","data":{"text":"a","level":null}}"#).level(), Some(2));
    }

    #[test]
    fn test_missing_fields_decode_to_defaults() {
        let quote = decode(r#"{"type":"quote","data":{"text":"q"}}"#);
        assert_eq!(quote.caption(), Some(""));
        assert_eq!(quote.alignment(), Some("left"));

        let list = decode(r#"{"type":"list","data":{}}"#);
        assert_eq!(list.style(), Some(ListStyle::Unordered));
        assert_eq!(list.items(), Some(&[String::new()][..]));

        let para = decode(r#"{"type":"paragraph"}"#);
        assert_eq!(para, Block::empty_paragraph());
    }

    #[test]
    fn test_list_items_keep_only_strings() {
        let list = decode(r#"{"type":"list","data":{"style":"ordered","items":["a",1,null,"b"]}}"#);
        assert_eq!(list.style(), Some(ListStyle::Ordered));
        assert_eq!(list.items().unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_non_string_text_decodes_to_empty() {
        let para = decode(r#"{"type":"paragraph","data":{"text":42}}"#);
        assert_eq!(para.text(), Some(""));
    }

    #[test]
    fn test_unknown_type_becomes_paragraph() {
        let block = decode(r#"{"type":"image","data":{"text":"caption","url":"x.png"}}"#);
        assert_eq!(block, Block::paragraph("caption"));
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(Block::header("Hi", 1)).unwrap();
        assert_eq!(value, json!({ "type": "header", "data": { "text": "Hi", "level": 1 } }));

        let value = serde_json::to_value(Block::delimiter()).unwrap();
        assert_eq!(value, json!({ "type": "delimiter", "data": {} }));

        let value = serde_json::to_value(Block::list(ListStyle::Ordered, vec!["a".into()])).unwrap();
        assert_eq!(value, json!({ "type": "list", "data": { "style": "ordered", "items": ["a"] } }));
    }

    #[test]
    fn test_mutators_return_new_values() {
        let original = Block::paragraph("before");
        let edited = original.with_text("after");
        assert_eq!(original.text(), Some("before"));
        assert_eq!(edited.text(), Some("after"));
    }

    #[test]
    fn test_foreign_mutator_is_inapplicable() {
        let para = Block::paragraph("p");
        assert_eq!(para.with_level(1), para);
        assert_eq!(para.with_items(vec!["x".into()]), para);
        assert_eq!(Block::delimiter().with_text("x"), Block::Delimiter);
        assert_eq!(Block::code("c").with_title("t"), Block::code("c"));
    }

    #[test]
    fn test_with_level_normalizes() {
        let header = Block::header("h", 1);
        assert_eq!(header.with_level(3).level(), Some(3));
        assert_eq!(header.with_level(9).level(), Some(2));
        assert_eq!(Block::header("h", 0).level(), Some(2));
    }

    #[test]
    fn test_payload_accessors_hold_invariants() {
        let Block::Header(h) = Block::header("h", 9) else { panic!("not a header") };
        assert_eq!(h.level(), 2);
        assert_eq!(HeaderData::default().level(), DEFAULT_HEADER_LEVEL);

        let Block::List(l) = Block::list(ListStyle::Ordered, vec![]) else { panic!("not a list") };
        assert_eq!(l.items(), &[String::new()]);
        assert_eq!(ListData::default().items(), &[String::new()]);
    }

    #[test]
    fn test_list_items_never_empty() {
        let list = Block::list(ListStyle::Unordered, vec![]);
        assert_eq!(list.items().unwrap().len(), 1);
        assert_eq!(list.with_items(vec![]).items().unwrap().len(), 1);
    }

    #[test]
    fn test_is_empty_per_variant() {
        assert!(Block::paragraph("  ").is_empty());
        assert!(!Block::paragraph("x").is_empty());
        assert!(Block::header("", 2).is_empty());
        assert!(Block::quote(" ", "").is_empty());
        assert!(!Block::quote("", "caption").is_empty());
        assert!(Block::list(ListStyle::Ordered, vec!["".into(), "  ".into()]).is_empty());
        assert!(!Block::list(ListStyle::Ordered, vec!["".into(), "a".into()]).is_empty());
        assert!(Block::code("\n").is_empty());
        assert!(Block::warning("", "").is_empty());
        assert!(!Block::warning("", "careful").is_empty());
        assert!(!Block::delimiter().is_empty());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(Block::header("Intro", 1).display_text(), "H1: Intro");
        assert_eq!(Block::quote("q", "").display_text(), "\"q\"");
        assert_eq!(
            Block::list(ListStyle::Unordered, vec!["a".into(), "b".into()]).display_text(),
            "a, b"
        );
        assert_eq!(Block::warning("Note", "hot").display_text(), "Note: hot");
        assert_eq!(Block::delimiter().display_text(), "---");

        let long = "x".repeat(60);
        assert_eq!(Block::code(&long).display_text(), format!("Code: {}...", "x".repeat(50)));
        assert_eq!(Block::code("short").display_text(), "Code: short");
    }

    #[test]
    fn test_is_valid_block_type() {
        for tag in ["paragraph", "header", "quote", "list", "code", "delimiter", "warning"] {
            assert!(is_valid_block_type(tag));
        }
        assert!(!is_valid_block_type("image"));
        assert!(!is_valid_block_type("Paragraph"));
    }
}
