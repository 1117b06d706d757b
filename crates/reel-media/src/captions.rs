//! Caption segmentation and filter-safe text escaping.
//!
//! Translated narration is wrapped into display-sized lines and the
//! measured audio duration is partitioned evenly across them. Line text
//! destined for the drawtext filter is escaped so it cannot break out of
//! the filter grammar.

use reel_models::{CaptionLine, CaptionSchedule};

/// Maximum characters per caption line.
pub const WRAP_WIDTH: usize = 40;

/// Maximum characters in a single overlay before truncation.
pub const MAX_OVERLAY_CHARS: usize = 200;

/// Marker appended to truncated overlay text.
const ELLIPSIS: &str = "...";

/// Characters escaped for the drawtext grammar, in application order.
/// Backslash must come first so later escapes are not double-escaped.
const ESCAPES: &[(char, &str)] = &[
    ('\\', "\\\\"),
    (':', "\\:"),
    ('\'', "\\'"),
    (',', "\\,"),
    ('%', "\\%"),
    ('\n', " "),
    ('"', "\\\""),
    ('=', "\\="),
    ('[', "\\["),
    (']', "\\]"),
    ('{', "\\{"),
    ('}', "\\}"),
    ('$', "\\$"),
    ('#', "\\#"),
    ('&', "\\&"),
];

/// Greedily wrap text into lines of at most `width` characters.
///
/// Breaks only on word boundaries; a single word longer than `width`
/// gets its own over-long line rather than being split mid-word.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Build the caption schedule for translated text against a measured
/// audio duration.
///
/// The duration is split evenly across the wrapped lines; line `i` is
/// shown during `[i*d, (i+1)*d)`. Deterministic for a given input.
pub fn build_schedule(text: &str, total_duration: f64) -> CaptionSchedule {
    let wrapped = wrap_text(text, WRAP_WIDTH);
    // Floor of one line; callers validate non-empty text upstream.
    let count = wrapped.len().max(1);
    let per_line = total_duration / count as f64;

    let lines = if wrapped.is_empty() {
        vec![CaptionLine::new("", 0.0, per_line)]
    } else {
        wrapped
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let start = i as f64 * per_line;
                CaptionLine::new(line, start, start + per_line)
            })
            .collect()
    };

    CaptionSchedule::new(lines, total_duration)
}

/// Escape caption text for safe embedding in the drawtext filter grammar.
///
/// Returns an empty string for empty input (callers emit no overlay for
/// blank lines). Text longer than [`MAX_OVERLAY_CHARS`] after escaping is
/// cut at the last word boundary and given an ellipsis marker, so output
/// never exceeds `MAX_OVERLAY_CHARS + 3` characters.
pub fn escape_overlay_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut escaped = text.to_string();
    for (ch, replacement) in ESCAPES {
        escaped = escaped.replace(*ch, replacement);
    }

    truncate_at_word_boundary(&escaped, MAX_OVERLAY_CHARS)
}

/// Cut `text` to at most `limit` characters at a word boundary, appending
/// an ellipsis when anything was removed.
///
/// Cutting at a space cannot split an escape pair, since no escape
/// sequence contains a space. A hard cut (no space in the head) can land
/// between a backslash and the character it escapes; an odd trailing run
/// of backslashes marks that dangling half and the last one is dropped.
fn truncate_at_word_boundary(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let head: String = text.chars().take(limit).collect();
    let cut = match head.rfind(' ') {
        Some(pos) => head[..pos].trim_end().to_string(),
        None => {
            let mut head = head;
            let trailing = head.chars().rev().take_while(|c| *c == '\\').count();
            if trailing % 2 == 1 {
                head.pop();
            }
            head
        }
    };
    format!("{}{}", cut, ELLIPSIS)
}
