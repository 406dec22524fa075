//! Flattening `<description>` trees into markup strings

use super::text::{escape_text, join_lines};
use crate::documents::{is_multiple_roots, Document, Element};
use crate::error::{ParseError, Result};

/// Block-level children permitted inside a description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Paragraph,
    List,
}

impl Block {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(Block::Paragraph),
            "ul" | "ol" => Some(Block::List),
            _ => None,
        }
    }
}

/// Flatten a `<description>`-like node into a markup string.
///
/// Children must be `<p>`, `<ul>` or `<ol>`; list children must be `<li>`.
/// Ordered lists are emitted as `<ul>`. Text inside each block is collapsed
/// with [`join_lines`] and no whitespace is emitted between tags.
pub fn parse_description(node: &Element) -> std::result::Result<String, ParseError> {
    let mut desc = String::new();

    for child in &node.children {
        match Block::from_tag(&child.tag) {
            Some(Block::Paragraph) => {
                desc.push_str("<p>");
                desc.push_str(&escape_text(&join_lines(child.text())));
                desc.push_str("</p>");
            }
            Some(Block::List) => {
                desc.push_str("<ul>");
                for item in &child.children {
                    if item.tag != "li" {
                        return Err(ParseError::new(format!(
                            "Expected <li> in <{}>, got <{}>",
                            child.tag, item.tag
                        )));
                    }
                    desc.push_str("<li>");
                    desc.push_str(&escape_text(&join_lines(item.text())));
                    desc.push_str("</li>");
                }
                desc.push_str("</ul>");
            }
            None => {
                return Err(ParseError::new(format!(
                    "Expected <p>, <ul>, <ol> in <{}>, got <{}>",
                    node.tag, child.tag
                )));
            }
        }
    }

    Ok(desc)
}

/// Check that `xml` is acceptable description markup and return it flattened.
///
/// The document root is treated as the description node, whatever its tag.
/// Input with several top-level elements, such as the sibling blocks produced
/// by [`import_description`](super::import_description), is parsed inside a
/// synthetic `<description>` root instead.
pub fn validate_description(xml: &str) -> Result<String> {
    let doc = match Document::from_string(xml) {
        Ok(doc) => doc,
        Err(e) if is_multiple_roots(&e) => {
            Document::from_string(&format!("<description>{}</description>", xml))?
        }
        Err(e) => return Err(e),
    };
    Ok(parse_description(doc.root())?)
}
