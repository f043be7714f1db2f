//! JSON sanitization
//!
//! Recovers a parseable JSON document from noisy input: markdown
//! code-fence wrapping and JSON embedded in explanatory prose, as
//! produced by AI assistants or manual copy-paste. Sanitization never
//! fails; callers re-attempt their own parse on the result.

use serde_json::Value;

use crate::error::ConvertResult;

/// Clean raw text down to its best-effort JSON payload.
///
/// Trims, strips a markdown code fence (optionally tagged `json`), then
/// attempts a parse; on failure falls back to the substring bounded by
/// the first `{` and the last `}`, but only when that substring itself
/// parses. If recovery fails too, the cleaned text is returned
/// unchanged. Idempotent.
pub fn clean_json_string(text: &str) -> String {
    let mut cleaned = text.trim();
    // Strip to a fixpoint so nested fence wrapping cannot survive one
    // pass and idempotence holds for any input
    loop {
        let stripped = strip_code_fences(cleaned).trim();
        if stripped == cleaned {
            break;
        }
        cleaned = stripped;
    }

    if serde_json::from_str::<Value>(cleaned).is_ok() {
        return cleaned.to_string();
    }

    if let Some(candidate) = braced_substring(cleaned) {
        if serde_json::from_str::<Value>(candidate).is_ok() {
            return candidate.to_string();
        }
    }

    cleaned.to_string()
}

/// Clean text for the external AI-optimization workflow: same recovery
/// as [`clean_json_string`], then canonical pretty-printing when the
/// result parses, so downstream prompts receive stable input.
pub fn clean_json_for_optimization(text: &str) -> String {
    let cleaned = clean_json_string(text);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(cleaned),
        Err(_) => cleaned,
    }
}

/// Sanitize text with [`clean_json_string`] and parse the result,
/// surfacing the serde error when even the cleaned form is not JSON.
pub fn parse_sanitized_json(text: &str) -> ConvertResult<Value> {
    Ok(serde_json::from_str(&clean_json_string(text))?)
}

/// Strip a wrapping markdown code fence. Returns the input unchanged
/// when it is not fence-wrapped.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Fence marker may carry a `json` language tag
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.trim_end().strip_suffix("```") {
        Some(body) => body.trim(),
        None => text,
    }
}

/// Substring from the first `{` to the last `}`, when both exist in
/// that order.
fn braced_substring(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}
