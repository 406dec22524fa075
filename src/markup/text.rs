//! Text normalization and escaping

use std::borrow::Cow;

/// Collapse wrapped, indented text into a single line.
///
/// Every line is trimmed, empty lines are dropped and the survivors are
/// joined with a single space. `None` is treated as the empty string.
///
/// ```
/// use appstream::markup::join_lines;
///
/// assert_eq!(join_lines(Some("\n  Firmware for the\n  ColorHug\n")), "Firmware for the ColorHug");
/// assert_eq!(join_lines(None), "");
/// ```
pub fn join_lines(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape character data for element content (`&`, `<`, `>`)
pub fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(text)
}

/// Escape an attribute value (element content escapes plus both quotes)
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}
