//! Method text codec
//!
//! Renders a brewing method as annotated share text and parses it
//! back. The stage block is a two-line state machine: a primary line
//! `<n>. [<m>分<s>秒] (注水<p>秒) [<pour label>] <label> - <water>`
//! optionally followed by one indented continuation line holding the
//! stage detail.

use std::fmt::Write;

use chrono::Local;

use super::extract::fill_labeled;
use super::{
    LABEL_COFFEE, LABEL_GRIND, LABEL_RATIO, LABEL_TEMP, LABEL_WATER, METHOD_DATA_TAG,
    METHOD_HEADER, METHOD_ID_TAG, NOT_SET, SHARE_TRAILER,
};
use crate::error::{ConvertError, ConvertResult};
use crate::models::{new_record_id, Method, MethodParams, PourType, Stage};

/// Render a method as annotated share text, ending with the hidden
/// `@DATA_TYPE:BREWING_METHOD@` tag (and the method id tag, so a
/// same-device round trip keeps record identity).
pub fn encode(method: &Method) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", METHOD_HEADER, method.name);
    out.push('\n');

    let p = &method.params;
    for (label, value) in [
        (LABEL_COFFEE, &p.coffee),
        (LABEL_WATER, &p.water),
        (LABEL_RATIO, &p.ratio),
        (LABEL_GRIND, &p.grind_size),
        (LABEL_TEMP, &p.temp),
    ] {
        let shown = if value.is_empty() { NOT_SET } else { value };
        let _ = writeln!(out, "{} {}", label, shown);
    }

    out.push('\n');
    out.push_str("冲煮步骤:\n");
    for (i, stage) in p.stages.iter().enumerate() {
        out.push_str(&encode_stage_line(i + 1, stage));
        out.push('\n');
        if !stage.detail.is_empty() {
            let _ = writeln!(out, "   {}", stage.detail);
        }
    }

    out.push('\n');
    out.push_str(SHARE_TRAILER);
    out.push('\n');
    out.push('\n');
    out.push_str(METHOD_DATA_TAG);
    out.push('\n');
    if !method.id.is_empty() {
        let _ = writeln!(out, "{}{}@", METHOD_ID_TAG, method.id);
    }
    out
}

fn encode_stage_line(index: usize, stage: &Stage) -> String {
    let mut line = format!(
        "{}. [{}分{}秒]",
        index,
        stage.time / 60,
        stage.time % 60
    );
    if let Some(pour_time) = stage.pour_time {
        let _ = write!(line, " (注水{}秒)", pour_time);
    }
    let _ = write!(line, " [{}]", stage.pour_type.text_label());
    let _ = write!(line, " {} - {}", stage.label, stage.water);
    line
}

/// Parse annotated method text back into a method.
///
/// Params whose value is the `未设置` sentinel stay empty (text import
/// never fabricates defaults); stage order is preserved exactly as
/// written. Zero parseable stages is a hard failure.
pub fn decode(text: &str) -> ConvertResult<Method> {
    let name = text
        .lines()
        .find_map(|line| line.trim().strip_prefix(METHOD_HEADER))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("导入方案 {}", Local::now().format("%Y-%m-%d")));

    let mut params = MethodParams::default();
    fill_labeled(
        text,
        NOT_SET,
        [
            (LABEL_COFFEE, &mut params.coffee),
            (LABEL_WATER, &mut params.water),
            (LABEL_RATIO, &mut params.ratio),
            (LABEL_GRIND, &mut params.grind_size),
            (LABEL_TEMP, &mut params.temp),
        ],
    );

    params.stages = parse_stages(text);
    if params.stages.is_empty() {
        return Err(ConvertError::EmptyStages);
    }

    let id = embedded_method_id(text).unwrap_or_else(|| new_record_id("method"));

    Ok(Method { id, name, params })
}

/// Recover a previously embedded `@METHOD_ID:<id>@` tag.
fn embedded_method_id(text: &str) -> Option<String> {
    let start = text.find(METHOD_ID_TAG)? + METHOD_ID_TAG.len();
    let rest = &text[start..];
    let end = rest.find('@')?;
    let id = rest[..end].trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Two-line state machine over the stage block: a primary stage line,
/// optionally followed by an indented continuation line carrying the
/// detail text (consumed when present).
fn parse_stages(text: &str) -> Vec<Stage> {
    let mut stages = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let Some(mut stage) = parse_stage_line(line) else {
            continue;
        };
        if let Some(&next) = lines.peek() {
            let indented = next.starts_with(' ') || next.starts_with('\t');
            if indented && !next.trim().is_empty() && parse_stage_line(next).is_none() {
                stage.detail = next.trim().to_string();
                lines.next();
            }
        }
        stages.push(stage);
    }
    stages
}

/// Parse one primary stage line, or `None` when the line is not
/// stage-shaped. Linear left-to-right scan.
fn parse_stage_line(line: &str) -> Option<Stage> {
    let trimmed = line.trim();

    // "<index>."
    let (index, rest) = trimmed.split_once('.')?;
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    // "[<m>分<s>秒]"
    let rest = rest.trim_start().strip_prefix('[')?;
    let (clock, rest) = rest.split_once(']')?;
    let time = parse_clock(clock)?;
    let mut rest = rest.trim_start();

    // optional "(注水<p>秒)"
    let mut pour_time = None;
    if let Some(inner_start) = rest.strip_prefix('(') {
        if let Some((inner, after)) = inner_start.split_once(')') {
            pour_time = inner
                .trim()
                .strip_prefix("注水")
                .and_then(|s| s.trim().strip_suffix('秒'))
                .and_then(|s| s.trim().parse().ok());
            rest = after.trim_start();
        }
    }

    // optional "[<pour label>]"
    let mut pour_type = PourType::Circle;
    if let Some(inner_start) = rest.strip_prefix('[') {
        if let Some((inner, after)) = inner_start.split_once(']') {
            pour_type = PourType::from_text_label(inner.trim());
            rest = after.trim_start();
        }
    }

    // "<label> - <water>"
    let (label, water) = match rest.rsplit_once(" - ") {
        Some((label, water)) => (label.trim().to_string(), water.trim().to_string()),
        None => (rest.trim().to_string(), String::new()),
    };

    Some(Stage {
        time,
        // Reconstructed from partial text: min(20, ceil(time / 4))
        pour_time: pour_time.or(Some(synthesized_pour_time(time))),
        label,
        water,
        detail: String::new(),
        pour_type,
        valve_status: Default::default(),
    })
}

fn synthesized_pour_time(time: u32) -> u32 {
    ((time + 3) / 4).min(20)
}

/// Parse `<m>分<s>秒`, `<m>分` or `<s>秒` into cumulative seconds.
fn parse_clock(clock: &str) -> Option<u32> {
    let clock = clock.trim();
    if let Some((minutes, rest)) = clock.split_once('分') {
        let minutes: u32 = minutes.trim().parse().ok()?;
        let seconds: u32 = match rest.trim().strip_suffix('秒') {
            Some(seconds) if !seconds.trim().is_empty() => seconds.trim().parse().ok()?,
            _ => 0,
        };
        Some(minutes * 60 + seconds)
    } else {
        clock.strip_suffix('秒')?.trim().parse().ok()
    }
}
