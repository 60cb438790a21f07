use crate::Segment;

/// Render segments as a single line of plain text
pub fn render_text(segments: &[Segment]) -> String {
    let joined = segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" ");
    normalize_whitespace(&joined)
}

/// Replace newlines with spaces, trim, and collapse runs of spaces to one.
///
/// Idempotent: normalizing normalized text returns it unchanged.
pub fn normalize_whitespace(text: &str) -> String {
    text.replace('\n', " ")
        .trim()
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
