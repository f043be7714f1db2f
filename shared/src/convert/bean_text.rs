//! Bean text codec
//!
//! Renders a coffee bean profile as annotated share text and parses it
//! back. Scalar fields are labeled lines; blend components are a
//! numbered list gated on the `拼配成分:` section header, where a
//! malformed line is skipped rather than failing the decode.

use std::fmt::Write;

use super::extract::{extract_field, extract_unit_field};
use super::{
    BEAN_DATA_TAG, BEAN_HEADER, LABEL_BEAN, LABEL_BEAN_NOTES, LABEL_BEAN_TYPE, LABEL_BLEND,
    LABEL_CAPACITY, LABEL_FLAVOR, LABEL_ORIGIN, LABEL_PRICE, LABEL_PROCESS, LABEL_REMAINING,
    LABEL_ROAST_DATE, LABEL_ROAST_LEVEL, LABEL_VARIETY, SHARE_TRAILER, UNKNOWN_ROAST,
};
use crate::error::{ConvertError, ConvertResult};
use crate::models::{new_record_id, BlendComponent, CoffeeBean, DEFAULT_ROAST_LEVEL};

/// Render a bean profile as annotated share text: one labeled line per
/// populated field, the blend list when present, then the trailer and
/// the hidden `@DATA_TYPE:COFFEE_BEAN@` tag.
pub fn encode(bean: &CoffeeBean) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", BEAN_HEADER, bean.name);
    out.push('\n');

    if let Some(capacity) = &bean.capacity {
        let _ = writeln!(out, "{} {}g", LABEL_CAPACITY, capacity);
    }
    if let Some(remaining) = &bean.remaining {
        let _ = writeln!(out, "{} {}g", LABEL_REMAINING, remaining);
    }
    let roast = if bean.roast_level.is_empty() {
        UNKNOWN_ROAST
    } else {
        bean.roast_level.as_str()
    };
    let _ = writeln!(out, "{} {}", LABEL_ROAST_LEVEL, roast);

    for (label, value) in [
        (LABEL_ROAST_DATE, &bean.roast_date),
        (LABEL_ORIGIN, &bean.origin),
        (LABEL_PROCESS, &bean.process),
        (LABEL_VARIETY, &bean.variety),
        (LABEL_BEAN_TYPE, &bean.bean_type),
    ] {
        if let Some(value) = value {
            let _ = writeln!(out, "{} {}", label, value);
        }
    }
    if let Some(price) = &bean.price {
        let _ = writeln!(out, "{} {}元", LABEL_PRICE, price);
    }
    if !bean.flavor.is_empty() {
        let _ = writeln!(out, "{} {}", LABEL_FLAVOR, bean.flavor.join(", "));
    }
    if let Some(notes) = &bean.notes {
        let _ = writeln!(out, "{} {}", LABEL_BEAN_NOTES, notes);
    }

    if let Some(components) = bean
        .blend_components
        .as_ref()
        .filter(|c| !c.is_empty())
    {
        out.push('\n');
        out.push_str(LABEL_BLEND);
        out.push('\n');
        for (i, component) in components.iter().enumerate() {
            let shown = component
                .name
                .as_deref()
                .or(component.origin.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("成分{}", i + 1));
            let _ = writeln!(out, "{}. {} ({}%)", i + 1, shown, component.percentage);
        }
    }

    out.push('\n');
    out.push_str(SHARE_TRAILER);
    out.push('\n');
    out.push('\n');
    out.push_str(BEAN_DATA_TAG);
    out.push('\n');
    out
}

/// Parse annotated bean text back into a profile. The name comes from
/// the `【咖啡豆】` header (or a `咖啡豆:` line when the header is
/// absent); `remaining` defaults to `capacity`; the literal `未知`
/// roast level counts as absent.
pub fn decode(text: &str) -> ConvertResult<CoffeeBean> {
    let name = text
        .lines()
        .find_map(|line| line.trim().strip_prefix(BEAN_HEADER))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| extract_field(text, LABEL_BEAN))
        .ok_or(ConvertError::MissingField("name"))?;

    let capacity = extract_unit_field(text, LABEL_CAPACITY, 'g');
    let remaining = extract_unit_field(text, LABEL_REMAINING, 'g').or_else(|| capacity.clone());

    let roast_level = extract_field(text, LABEL_ROAST_LEVEL)
        .filter(|value| value != UNKNOWN_ROAST)
        .unwrap_or_else(|| DEFAULT_ROAST_LEVEL.to_string());

    let flavor = extract_field(text, LABEL_FLAVOR)
        .map(|tags| {
            tags.split([',', '，'])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(CoffeeBean {
        id: new_record_id("bean"),
        name,
        roast_level,
        roast_date: extract_field(text, LABEL_ROAST_DATE),
        origin: extract_field(text, LABEL_ORIGIN),
        process: extract_field(text, LABEL_PROCESS),
        variety: extract_field(text, LABEL_VARIETY),
        bean_type: extract_field(text, LABEL_BEAN_TYPE),
        price: extract_unit_field(text, LABEL_PRICE, '元'),
        capacity,
        remaining,
        flavor,
        notes: extract_field(text, LABEL_BEAN_NOTES),
        blend_components: parse_blend_components(text),
    })
}

/// Parse the numbered blend list following `拼配成分:`. Returns `None`
/// when the section header is absent or yields no valid components.
fn parse_blend_components(text: &str) -> Option<Vec<BlendComponent>> {
    let start = text.find(LABEL_BLEND)? + LABEL_BLEND.len();
    let mut components = Vec::new();
    for line in text[start..].lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if components.is_empty() {
                continue;
            }
            break;
        }
        match parse_component_line(trimmed) {
            Some(component) => components.push(component),
            // Malformed component lines are skipped, but a line that
            // is not list-shaped at all ends the section
            None if looks_like_list_item(trimmed) => continue,
            None => break,
        }
    }
    if components.is_empty() {
        None
    } else {
        Some(components)
    }
}

fn looks_like_list_item(line: &str) -> bool {
    line.split_once('.')
        .is_some_and(|(index, _)| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
}

/// `<n>. <name> (<pct>%)` → one blend component.
fn parse_component_line(line: &str) -> Option<BlendComponent> {
    let (index, rest) = line.split_once('.')?;
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let rest = rest.trim();
    let open = rest.rfind('(')?;
    let close = rest.rfind(')')?;
    if close < open {
        return None;
    }
    let percentage: u32 = rest[open + 1..close]
        .trim()
        .strip_suffix('%')?
        .trim()
        .parse()
        .ok()?;
    if percentage > 100 {
        return None;
    }
    let name = rest[..open].trim();
    Some(BlendComponent {
        name: (!name.is_empty()).then(|| name.to_string()),
        percentage: percentage.to_string(),
        ..Default::default()
    })
}
