//! Text normalization for editor input.

/// Zero-width characters an editable surface may leave behind in an
/// otherwise empty field.
const ZERO_WIDTH: &[char] = &['\u{FEFF}', '\u{200B}'];

/// Trim surrounding whitespace and zero-width markers.
pub fn normalize(input: &str) -> String {
    input
        .trim_matches(|c: char| c.is_whitespace() || ZERO_WIDTH.contains(&c))
        .to_string()
}

/// True when the text has nothing readable: only whitespace and
/// zero-width markers.
pub fn is_blank(input: &str) -> bool {
    input
        .chars()
        .all(|c| c.is_whitespace() || ZERO_WIDTH.contains(&c))
}
