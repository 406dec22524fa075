//! Release checksums

use crate::documents::Element;
use crate::markup::{escape_attribute, escape_text};
use serde::Serialize;

/// Default checksum kind
pub const DEFAULT_CHECKSUM_KIND: &str = "sha1";

/// A checksum of a release payload.
///
/// `target` says what was hashed, e.g. `container` for the cabinet archive or
/// `content` for the firmware blob inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checksum {
    /// Hash algorithm
    pub kind: String,
    /// What the checksum covers
    pub target: Option<String>,
    /// Hex digest
    pub value: Option<String>,
    /// File the checksum was computed over
    pub filename: Option<String>,
}

impl Default for Checksum {
    fn default() -> Self {
        Self {
            kind: DEFAULT_CHECKSUM_KIND.to_string(),
            target: None,
            value: None,
            filename: None,
        }
    }
}

impl Checksum {
    /// Create an empty sha1 checksum
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hash algorithm
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the target
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the digest
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the filename
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Build a checksum from a `<checksum>` element
    pub fn from_element(node: &Element) -> Self {
        let mut csum = Self::new();
        if let Some(filename) = node.attribute("filename") {
            csum.filename = Some(filename.to_string());
        }
        if let Some(kind) = node.attribute("type") {
            csum.kind = kind.to_string();
        }
        if let Some(target) = node.attribute("target") {
            csum.target = Some(target.to_string());
        }
        csum.value = node.text().map(str::to_string);
        csum
    }

    /// Serialize as a single `<checksum>` line.
    ///
    /// The `type` attribute is always written as `sha1`, whatever `kind`
    /// holds; consumers of existing catalogs match on that literal.
    pub fn to_xml(&self) -> String {
        format!(
            "        <checksum filename=\"{}\" target=\"{}\" type=\"{}\">{}</checksum>\n",
            escape_attribute(self.filename.as_deref().unwrap_or_default()),
            escape_attribute(self.target.as_deref().unwrap_or_default()),
            DEFAULT_CHECKSUM_KIND,
            escape_text(self.value.as_deref().unwrap_or_default()),
        )
    }
}
