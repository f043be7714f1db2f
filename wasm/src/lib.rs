//! WebAssembly module for the Brew Transfer toolkit
//!
//! Browser-side glue for the conversion core: the clipboard/paste
//! handlers and the share/export UI call these functions with raw
//! strings and receive JSON envelopes or annotated share text back.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript-facing glue code
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Extract a structured record from pasted text.
///
/// Returns a JSON envelope `{"kind": "...", "record": {...}}`, or
/// `None` (JS `null`) when the input is unrecognizable — the caller
/// shows "paste something else", not an error.
#[wasm_bindgen]
pub fn extract_record_from_text(text: &str) -> Option<String> {
    let record = shared::extract_record_from_text(text)?;
    serde_json::to_string(&record).ok()
}

/// Render a method record (as JSON) into annotated share text
#[wasm_bindgen]
pub fn method_to_readable_text(method_json: &str) -> Result<String, JsValue> {
    let method: Method = serde_json::from_str(method_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid method JSON: {}", e)))?;
    Ok(shared::method_to_readable_text(&method))
}

/// Render a bean profile (as JSON) into annotated share text
#[wasm_bindgen]
pub fn bean_to_readable_text(bean_json: &str) -> Result<String, JsValue> {
    let bean: CoffeeBean = serde_json::from_str(bean_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bean JSON: {}", e)))?;
    Ok(shared::bean_to_readable_text(&bean))
}

/// Render a brewing note (as JSON) into annotated share text
#[wasm_bindgen]
pub fn brewing_note_to_readable_text(note_json: &str) -> Result<String, JsValue> {
    let note: BrewingNote = serde_json::from_str(note_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid note JSON: {}", e)))?;
    Ok(shared::brewing_note_to_readable_text(&note))
}

/// Encode a method record (as JSON) into the minimal sharing JSON
#[wasm_bindgen]
pub fn method_to_json(method_json: &str) -> Result<String, JsValue> {
    let method: Method = serde_json::from_str(method_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid method JSON: {}", e)))?;
    Ok(shared::method_to_json(&method))
}

/// Standalone sanitization: recover a JSON payload from fenced or
/// prose-wrapped text
#[wasm_bindgen]
pub fn clean_json_string(text: &str) -> String {
    shared::clean_json_string(text)
}

/// Sanitize and canonicalize JSON for the AI-optimization workflow
#[wasm_bindgen]
pub fn clean_json_for_optimization(text: &str) -> String {
    shared::clean_json_for_optimization(text)
}
