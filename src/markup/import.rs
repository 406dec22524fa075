//! Heuristic conversion of plain release notes into description markup

use super::text::escape_text;
use once_cell::sync::Lazy;
use regex::Regex;

// "- item" bullets and "1. item" numbered points
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s").unwrap());
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d\.\s").unwrap());

/// Strip a list prefix from a trimmed line, if it has one
fn list_item(line: &str) -> Option<&str> {
    BULLET_ITEM
        .find(line)
        .or_else(|| NUMBERED_ITEM.find(line))
        .map(|prefix| &line[prefix.end()..])
}

fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert freeform plain text into description markup.
///
/// Blank lines are skipped. Lines starting with `- ` or a single digit and
/// `. ` become `<li>` items gathered into a `<ul>` that stays open until the
/// next ordinary line; every other line becomes its own `<p>`. Each block is
/// followed by a newline so the output can be reviewed before it is wrapped
/// in a `<description>` and fed to
/// [`validate_description`](super::validate_description).
///
/// ```
/// use appstream::markup::import_description;
///
/// assert_eq!(
///     import_description("- a\n- b\n\nSome text."),
///     "<ul>\n<li>A</li>\n<li>B</li>\n</ul>\n<p>Some text.</p>\n"
/// );
/// ```
pub fn import_description(text: &str) -> String {
    let mut xml = String::new();
    let mut in_list = false;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(item) = list_item(line) {
            if !in_list {
                xml.push_str("<ul>\n");
                in_list = true;
            }
            xml.push_str("<li>");
            xml.push_str(&escape_text(&sentence_case(item)));
            xml.push_str("</li>\n");
            continue;
        }

        if in_list {
            xml.push_str("</ul>\n");
            in_list = false;
        }
        xml.push_str("<p>");
        xml.push_str(&escape_text(&sentence_case(line)));
        xml.push_str("</p>\n");
    }

    if in_list {
        xml.push_str("</ul>\n");
    }

    xml
}
