//! Shared formatting helpers for the views.

/// Shorten `text` to at most `max_chars` characters, ending in `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Make a step ID usable as a Mermaid node ID.
///
/// Every character other than ASCII letters, digits and `_` becomes `_`.
/// IDs that differ only in such characters map to the same node.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Escape a label for use inside a quoted Mermaid node label.
pub fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

/// Confidence as a whole percentage, e.g. `0.8` becomes `80%`.
pub fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}
