//! Components: the atomic catalog entry

use super::builder::ComponentBuilder;
use super::provide::Provide;
use super::release::Release;
use crate::documents::{Document, Element};
use crate::error::{Result, ValidationError};
use crate::markup::{escape_attribute, escape_text};
use indexmap::IndexMap;
use serde::Serialize;

/// The only metadata license accepted by [`Component::validate`]
pub const ACCEPTED_METADATA_LICENSE: &str = "CC0-1.0";

/// Attributes of a single `<icon>`, plus its text under the `value` key
pub type IconAttributes = IndexMap<String, String>;

/// A software or firmware metadata record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Component id, e.g. `com.hughski.ColorHug.firmware`
    pub id: Option<String>,
    /// Component type; `firmware` enables extra validation
    pub kind: Option<String>,
    /// Contact for metadata updates
    pub update_contact: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Package name
    pub pkgname: Option<String>,
    /// One-line summary
    pub summary: Option<String>,
    /// Description markup
    pub description: Option<String>,
    /// URLs by kind, in insertion order
    pub urls: IndexMap<String, String>,
    /// Icons by kind, in insertion order
    pub icons: IndexMap<String, Vec<IconAttributes>>,
    /// License of the metadata itself
    pub metadata_license: Option<String>,
    /// License of the project
    pub project_license: Option<String>,
    /// Developer or vendor name
    pub developer_name: Option<String>,
    /// Releases, unique by version
    pub releases: Vec<Release>,
    /// Provides, unique by value
    pub provides: Vec<Provide>,
    /// Kudos
    pub kudos: Vec<String>,
    /// Search keywords
    pub keywords: Vec<String>,
}

impl Component {
    /// Create an empty component
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a component
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::new()
    }

    /// Parse a component from XML text
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::from_string(xml)?;
        Self::from_element(doc.root())
    }

    /// Parse a component from an already-parsed `<component>` element
    pub fn from_element(node: &Element) -> Result<Self> {
        Ok(ComponentBuilder::from_element(node)?.build())
    }

    /// Add a release unless one with the same version already exists
    pub fn add_release(&mut self, release: Release) {
        if self.releases.iter().any(|r| r.version == release.version) {
            return;
        }
        self.releases.push(release);
    }

    /// Add a provide unless one with the same value already exists
    pub fn add_provide(&mut self, provide: Provide) {
        if self.provides.iter().any(|p| p.value == provide.value) {
            return;
        }
        self.provides.push(provide);
    }

    /// Returns the provides of a certain kind, in insertion order
    pub fn get_provides_by_kind(&self, kind: &str) -> Vec<&Provide> {
        self.provides
            .iter()
            .filter(|p| p.kind.as_deref() == Some(kind))
            .collect()
    }

    /// Returns the release with the given version
    pub fn get_release(&self, version: &str) -> Option<&Release> {
        self.releases
            .iter()
            .find(|r| r.version.as_deref() == Some(version))
    }

    fn is_firmware(&self) -> bool {
        self.kind.as_deref() == Some("firmware")
    }

    /// Check the component against the firmware metadata rules.
    ///
    /// Stops at the first violation.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        fn missing(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, str::is_empty)
        }

        if missing(&self.id) {
            return Err(ValidationError::new("No <id> tag"));
        }
        if missing(&self.name) {
            return Err(ValidationError::new("No <name> tag"));
        }
        if missing(&self.summary) {
            return Err(ValidationError::new("No <summary> tag"));
        }
        if missing(&self.description) {
            return Err(ValidationError::new("No <description> tag"));
        }
        if self.is_firmware() {
            if self.provides.is_empty() {
                return Err(ValidationError::new("No <provides> tag"));
            }
            if self.releases.is_empty() {
                return Err(ValidationError::new("No <release> tag"));
            }
        }
        if missing(&self.metadata_license) {
            return Err(ValidationError::new("No <metadata_license> tag"));
        }
        if self.metadata_license.as_deref() != Some(ACCEPTED_METADATA_LICENSE) {
            return Err(ValidationError::new("Invalid <metadata_license> tag"));
        }
        if missing(&self.project_license) {
            return Err(ValidationError::new("No <project_license> tag"));
        }
        if missing(&self.developer_name) {
            return Err(ValidationError::new("No <developer_name> tag"));
        }

        for (idx, rel) in self.releases.iter().enumerate() {
            let path = || format!("releases/release[{}]", idx);
            if missing(&rel.version) {
                return Err(ValidationError::new("No version in <release> tag").with_path(path()));
            }
            if rel.timestamp == 0 {
                return Err(ValidationError::new("No timestamp in <release> tag").with_path(path()));
            }
        }

        Ok(())
    }

    /// Serialize as an indented `<component type="firmware">` block
    pub fn to_xml(&self) -> String {
        fn element(xml: &mut String, tag: &str, value: Option<&str>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                xml.push_str(&format!("    <{tag}>{}</{tag}>\n", escape_text(value)));
            }
        }

        let mut xml = String::from("  <component type=\"firmware\">\n");
        element(&mut xml, "id", self.id.as_deref());
        element(&mut xml, "pkgname", self.pkgname.as_deref());
        element(&mut xml, "name", self.name.as_deref());
        element(&mut xml, "summary", self.summary.as_deref());
        element(&mut xml, "developer_name", self.developer_name.as_deref());
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            xml.push_str(&format!("    <description>{}</description>\n", description));
        }
        for (kind, url) in &self.urls {
            xml.push_str(&format!(
                "    <url type=\"{}\">{}</url>\n",
                escape_attribute(kind),
                escape_text(url)
            ));
        }
        for (kind, icons) in &self.icons {
            let value = icons
                .first()
                .and_then(|attrs| attrs.get("value"))
                .map(String::as_str)
                .unwrap_or_default();
            xml.push_str(&format!(
                "    <icon type=\"{}\">{}</icon>\n",
                escape_attribute(kind),
                escape_text(value)
            ));
        }
        if !self.releases.is_empty() {
            xml.push_str("    <releases>\n");
            for rel in &self.releases {
                xml.push_str(&rel.to_xml());
            }
            xml.push_str("    </releases>\n");
        }
        if !self.kudos.is_empty() {
            xml.push_str("    <kudos>\n");
            for kudo in &self.kudos {
                xml.push_str(&format!("      <kudo>{}</kudo>\n", escape_text(kudo)));
            }
            xml.push_str("    </kudos>\n");
        }
        if !self.provides.is_empty() {
            xml.push_str("    <provides>\n");
            for prov in &self.provides {
                xml.push_str(&format!(
                    "      <firmware type=\"flashed\">{}</firmware>\n",
                    escape_text(prov.value.as_deref().unwrap_or_default())
                ));
            }
            xml.push_str("    </provides>\n");
        }
        xml.push_str("  </component>\n");
        xml
    }
}
