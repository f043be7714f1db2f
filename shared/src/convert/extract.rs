//! Labeled-line field extraction
//!
//! Leaf utility used by every text-mode codec. All extraction is a
//! linear scan over lines; no regular expressions, no backtracking.

/// Return the trimmed value following `label` on the first line that
/// starts with it, or `None` when the label is absent or its value is
/// empty.
pub fn extract_field(text: &str, label: &str) -> Option<String> {
    for line in text.lines() {
        if let Some(rest) = line.trim().strip_prefix(label) {
            let value = rest.trim();
            return if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
    }
    None
}

/// [`extract_field`] with a trailing unit stripped (e.g. `容量: 200g`
/// with unit `g` yields `200`).
pub fn extract_unit_field(text: &str, label: &str, unit: char) -> Option<String> {
    let value = extract_field(text, label)?;
    let trimmed = value
        .strip_suffix(unit)
        .map(str::trim)
        .unwrap_or(value.as_str());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract an `<n>/5` score following `label`. Absent or unparsable
/// values default to 0; values above 5 clamp to 5.
pub fn extract_score(text: &str, label: &str) -> u8 {
    extract_field(text, label)
        .and_then(|value| {
            value
                .split('/')
                .next()
                .and_then(|n| n.trim().parse::<u8>().ok())
        })
        .map(|n| n.min(5))
        .unwrap_or(0)
}

/// Fill a table of `(label, target)` slots from labeled lines, leaving
/// a slot untouched when its label is absent or carries `sentinel`.
pub fn fill_labeled<const N: usize>(
    text: &str,
    sentinel: &str,
    mut fields: [(&str, &mut String); N],
) {
    for (label, slot) in fields.iter_mut() {
        if let Some(value) = extract_field(text, label) {
            if value != sentinel {
                **slot = value;
            }
        }
    }
}
