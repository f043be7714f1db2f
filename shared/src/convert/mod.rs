//! Record conversion engine
//!
//! Single entry point for turning raw pasted text into a structured
//! record, plus the encoders that render records back out as machine
//! JSON or annotated share text.
//!
//! Control flow: [`extract_record_from_text`] → [`sniff::classify`] →
//! the matching codec. Classification failure is an expected outcome
//! and is reported as `None`, never as an error.

pub mod bean_text;
pub mod extract;
pub mod json_codec;
pub mod method_text;
pub mod note_text;
pub mod sanitize;
pub mod sniff;

use serde::Serialize;
use tracing::debug;

use crate::models::{BrewingNote, CoffeeBean, Method};
pub use json_codec::{generate_optimization_json, method_to_json, OptimizationContext};
pub use sanitize::{clean_json_for_optimization, clean_json_string, parse_sanitized_json};
pub use sniff::{Classification, TextKind};

// ============================================================================
// Text format constants
// ============================================================================
// Stable wire surface: changing any of these requires a version bump in
// the hidden @DATA_TYPE tags.

pub const METHOD_HEADER: &str = "【冲煮方案】";
pub const BEAN_HEADER: &str = "【咖啡豆】";
pub const NOTE_HEADER: &str = "【冲煮记录】";

/// Hidden machine-readable type tags appended to share text
pub const METHOD_DATA_TAG: &str = "@DATA_TYPE:BREWING_METHOD@";
pub const BEAN_DATA_TAG: &str = "@DATA_TYPE:COFFEE_BEAN@";
pub const NOTE_DATA_TAG: &str = "@DATA_TYPE:BREWING_NOTE@";

/// Embedded method identifier tag, `@METHOD_ID:<id>@`
pub const METHOD_ID_TAG: &str = "@METHOD_ID:";

/// Rendered placeholder for params the sender never filled in
pub const NOT_SET: &str = "未设置";
/// Rendered placeholder for an unknown roast level
pub const UNKNOWN_ROAST: &str = "未知";

/// Fixed trailer sentence on every share text
pub const SHARE_TRAILER: &str = "复制此文本即可导入或分享这条记录";

// Recipe parameter labels (method text and note text)
pub const LABEL_COFFEE: &str = "咖啡粉量:";
pub const LABEL_WATER: &str = "水量:";
pub const LABEL_RATIO: &str = "比例:";
pub const LABEL_GRIND: &str = "研磨度:";
pub const LABEL_TEMP: &str = "水温:";

// Bean field labels
pub const LABEL_CAPACITY: &str = "容量:";
pub const LABEL_REMAINING: &str = "剩余:";
pub const LABEL_ROAST_LEVEL: &str = "烘焙度:";
pub const LABEL_ROAST_DATE: &str = "烘焙日期:";
pub const LABEL_ORIGIN: &str = "产地:";
pub const LABEL_PROCESS: &str = "处理法:";
pub const LABEL_VARIETY: &str = "品种:";
pub const LABEL_BEAN_TYPE: &str = "类型:";
pub const LABEL_PRICE: &str = "价格:";
pub const LABEL_FLAVOR: &str = "风味标签:";
pub const LABEL_BEAN_NOTES: &str = "备注:";
pub const LABEL_BLEND: &str = "拼配成分:";

// Note field labels
pub const LABEL_EQUIPMENT: &str = "设备:";
pub const LABEL_METHOD: &str = "方法:";
pub const LABEL_BEAN: &str = "咖啡豆:";
pub const LABEL_PARAMS_SECTION: &str = "参数设置:";
pub const LABEL_TASTE_SECTION: &str = "风味评分:";
pub const LABEL_ACIDITY: &str = "酸度:";
pub const LABEL_SWEETNESS: &str = "甜度:";
pub const LABEL_BITTERNESS: &str = "苦度:";
pub const LABEL_BODY: &str = "醇厚度:";
pub const LABEL_RATING: &str = "综合评分:";
pub const LABEL_NOTES: &str = "笔记:";

// ============================================================================
// Façade
// ============================================================================

/// A record recovered from pasted text
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "camelCase")]
pub enum ImportedRecord {
    Method(Method),
    CoffeeBean(CoffeeBean),
    BrewingNote(BrewingNote),
}

/// Extract a structured record from raw text of any supported shape:
/// explicit annotated share text, JSON (fenced or buried in prose), or
/// free-form labeled text matched by content keywords.
///
/// Returns `None` when the input cannot be classified or the matched
/// decoder rejects it — "paste something else", not a defect.
pub fn extract_record_from_text(text: &str) -> Option<ImportedRecord> {
    match sniff::classify(text) {
        Classification::ExplicitMethodText => decode_as(TextKind::Method, text),
        Classification::ExplicitBeanText => decode_as(TextKind::Bean, text),
        Classification::ExplicitNoteText => decode_as(TextKind::Note, text),
        Classification::Json(value) => match json_codec::decode_json_record(&value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "json input rejected by record decoders");
                None
            }
        },
        Classification::AmbiguousText(kind) => decode_as(kind, text),
        Classification::Unrecognized => None,
    }
}

fn decode_as(kind: TextKind, text: &str) -> Option<ImportedRecord> {
    let result = match kind {
        TextKind::Method => method_text::decode(text).map(ImportedRecord::Method),
        TextKind::Bean => bean_text::decode(text).map(ImportedRecord::CoffeeBean),
        TextKind::Note => note_text::decode(text).map(ImportedRecord::BrewingNote),
    };
    match result {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(?kind, error = %e, "text decode failed");
            None
        }
    }
}

/// Render a method as annotated share text
pub fn method_to_readable_text(method: &Method) -> String {
    method_text::encode(method)
}

/// Render a bean profile as annotated share text
pub fn bean_to_readable_text(bean: &CoffeeBean) -> String {
    bean_text::encode(bean)
}

/// Render a brewing note as annotated share text
pub fn brewing_note_to_readable_text(note: &BrewingNote) -> String {
    note_text::encode(note)
}
