//! Input classification
//!
//! Ordered heuristics deciding which codec should handle a paste.
//! First match wins: explicit header tags bypass JSON entirely;
//! JSON-shaped input carries its parsed document to the JSON codec;
//! otherwise content keywords pick a text codec.

use serde_json::Value;
use tracing::debug;

use super::sanitize::{clean_json_string, parse_sanitized_json};
use super::{BEAN_HEADER, METHOD_HEADER, NOTE_HEADER};

/// Outcome of sniffing a paste
#[derive(Debug)]
pub enum Classification {
    ExplicitMethodText,
    ExplicitBeanText,
    ExplicitNoteText,
    /// Sanitized input parsed as a JSON object; shape disambiguation
    /// happens in the JSON codec
    Json(Value),
    /// Content keywords matched one record kind without an explicit tag
    AmbiguousText(TextKind),
    Unrecognized,
}

/// Record kind hint for text-mode decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Method,
    Bean,
    Note,
}

/// Classify raw input. Never fails; unclassifiable input is a
/// legitimate [`Classification::Unrecognized`] outcome.
pub fn classify(text: &str) -> Classification {
    let trimmed = text.trim();

    if trimmed.starts_with(METHOD_HEADER) {
        return Classification::ExplicitMethodText;
    }
    if trimmed.starts_with(BEAN_HEADER) {
        return Classification::ExplicitBeanText;
    }
    if trimmed.starts_with(NOTE_HEADER) {
        return Classification::ExplicitNoteText;
    }

    let cleaned = clean_json_string(trimmed);
    match parse_sanitized_json(&cleaned) {
        Ok(value) if value.is_object() => {
            debug!("input classified as json object");
            return Classification::Json(value);
        }
        Ok(_) => debug!("input parsed as non-object json, trying text heuristics"),
        Err(error) => debug!(%error, "input is not json, trying text heuristics"),
    }

    match text_kind_by_keywords(&cleaned) {
        Some(kind) => {
            debug!(?kind, "input classified by content keywords");
            Classification::AmbiguousText(kind)
        }
        None => Classification::Unrecognized,
    }
}

/// Content-keyword heuristics, checked note → bean → method; the first
/// category whose keyword set matches wins.
fn text_kind_by_keywords(text: &str) -> Option<TextKind> {
    let note_keywords = ["冲煮记录", "设备:", "方法:", "咖啡豆:", "参数设置:", "风味评分:"];
    if note_keywords.iter().any(|k| text.contains(k)) {
        return Some(TextKind::Note);
    }

    if text.contains("咖啡豆")
        || text.contains("烘焙度:")
        || (text.contains("产地:") && text.contains("处理法:"))
        || text.contains("风味标签:")
    {
        return Some(TextKind::Bean);
    }

    if text.contains("冲煮方案")
        || text.contains("步骤 1:")
        || text.contains("冲煮步骤")
        || text.contains("分钟")
        || (text.contains("咖啡粉量:") && text.contains("水量:") && text.contains("水温:"))
    {
        return Some(TextKind::Method);
    }

    None
}
