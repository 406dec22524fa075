//! Component catalogs
//!
//! A [`Store`] is the catalog that gets published: a keyed collection of
//! components with an `origin`, serialized as a `<components>` document and
//! usually persisted gzip-compressed.

use crate::components::Component;
use crate::documents::Document;
use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use crate::markup::escape_attribute;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Catalog format version written to the root element
pub const CATALOG_VERSION: &str = "0.9";

/// A catalog of components keyed by id.
///
/// Components without an id are keyed by the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Store {
    /// Provenance of the catalog, e.g. the export run that produced it
    pub origin: Option<String>,
    components: IndexMap<String, Component>,
}

impl Store {
    /// Create an empty store without an origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with an origin
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            components: IndexMap::new(),
        }
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the store has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components in insertion order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Finds a component by id
    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Finds a component by id, mutably
    pub fn get_component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    /// Add a component to the store.
    ///
    /// If a component with the same id is already present only its release
    /// list changes: the incoming releases are appended as-is, without the
    /// version de-duplication [`Component::add_release`] applies.
    pub fn add(&mut self, component: Component) {
        let key = component.id.clone().unwrap_or_default();
        match self.components.get_mut(&key) {
            Some(existing) => {
                tracing::debug!(
                    id = %key,
                    releases = component.releases.len(),
                    "merging releases into existing component"
                );
                existing.releases.extend(component.releases);
            }
            None => {
                self.components.insert(key, component);
            }
        }
    }

    /// Parse a catalog from XML text
    pub fn parse(xml: &str) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse a catalog from XML text, enforcing `limits`.
    ///
    /// A later component with an already-seen id replaces the earlier one
    /// entirely; no merge happens here.
    pub fn parse_with_limits(xml: &str, limits: &Limits) -> Result<Self> {
        let doc = Document::parse_with_limits(xml, limits)?;
        let root = doc.root();

        let origin = root
            .attribute("origin")
            .ok_or_else(|| Error::Key("origin".to_string()))?;
        limits.check_components(root.children.len())?;

        let mut store = Self::with_origin(origin);
        for node in &root.children {
            let component = Component::from_element(node)?;
            let key = component.id.clone().unwrap_or_default();
            if store.components.insert(key.clone(), component).is_some() {
                tracing::debug!(id = %key, "duplicate component id in catalog, keeping the later one");
            }
        }

        Ok(store)
    }

    /// Serialize the catalog as an XML document
    pub fn to_xml(&self) -> String {
        let origin = escape_attribute(self.origin.as_deref().unwrap_or_default());
        if self.components.is_empty() {
            return format!(
                "<components version=\"{}\" origin=\"{}\"/>\n",
                CATALOG_VERSION, origin
            );
        }

        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<components version=\"{}\" origin=\"{}\">\n",
            CATALOG_VERSION, origin
        ));
        for component in self.components.values() {
            xml.push_str(&component.to_xml());
        }
        xml.push_str("</components>\n");
        xml
    }

    /// Save the catalog to disk, gzip-compressed
    #[tracing::instrument(skip(self, path), fields(file = %path.as_ref().display(), components = self.len()))]
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(self.to_xml().as_bytes())?;
        encoder.finish()?.flush()?;
        Ok(())
    }

    /// Load a gzip-compressed catalog from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_limits(path, &Limits::default())
    }

    /// Load a gzip-compressed catalog from disk, enforcing `limits`.
    ///
    /// The size limit applies to the decompressed XML.
    #[tracing::instrument(skip(path, limits), fields(file = %path.as_ref().display()))]
    pub fn from_file_with_limits(path: impl AsRef<Path>, limits: &Limits) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let decoder = GzDecoder::new(BufReader::new(file));

        let mut bytes = Vec::new();
        let cap = limits.max_xml_size as u64 + 1;
        decoder.take(cap).read_to_end(&mut bytes)?;
        limits.check_xml_size(bytes.len())?;

        let xml = String::from_utf8(bytes)
            .map_err(|e| ParseError::new(format!("Catalog is not valid UTF-8: {}", e)))?;
        Self::parse_with_limits(&xml, limits)
    }
}
