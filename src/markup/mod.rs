//! Description markup
//!
//! AppStream descriptions are a tiny structural subset of XML: paragraphs and
//! lists of items. This module flattens that subset into a markup string,
//! validates markup strings, and synthesizes markup from plain text.

mod description;
mod import;
mod text;

pub use description::{parse_description, validate_description};
pub use import::import_description;
pub use text::{escape_attribute, escape_text, join_lines};
