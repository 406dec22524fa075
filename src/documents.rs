//! XML document handling
//!
//! A small element tree built on `quick-xml`. Metadata parsing only needs tag
//! names, attributes, the leading character data of an element and its
//! ordered child elements, so that is all an [`Element`] keeps.

use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Element tag name, prefix included
    pub tag: String,
    /// Element attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Character data preceding the first child element
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get the text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Find child elements by tag name
    pub fn find_children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |e| e.tag == tag)
    }

    fn push_text(&mut self, text: &str) {
        // Only character data before the first child belongs to this element
        if !self.children.is_empty() {
            return;
        }
        match self.text {
            Some(ref mut existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// XML Document representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from a string, enforcing `limits`
    pub fn parse_with_limits(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.trim_text(false);
        reader.check_end_names(true);

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if element_stack.is_empty() && root.is_some() {
                        return Err(multiple_roots(position));
                    }
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    element_stack.push(Self::parse_element(&e, position)?);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        match element_stack.last_mut() {
                            Some(parent) => parent.add_child(current),
                            None => root = Some(current),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, position)?;
                    match element_stack.last_mut() {
                        Some(parent) => parent.add_child(element),
                        None if root.is_some() => return Err(multiple_roots(position)),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| {
                        ParseError::new(format!("Failed to unescape text: {}", e))
                            .with_location(format!("byte {}", position))
                    })?;
                    match element_stack.last_mut() {
                        Some(current) => current.push_text(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(ParseError::new("Text content outside of the root element")
                                .with_location(format!("byte {}", position))
                                .into())
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    let data = e.into_inner();
                    let text = std::str::from_utf8(&data).map_err(|e| {
                        ParseError::new(format!("Invalid UTF-8 in CDATA section: {}", e))
                            .with_location(format!("byte {}", position))
                    })?;
                    if let Some(current) = element_stack.last_mut() {
                        current.push_text(text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::new(e.to_string())
                        .with_location(format!("byte {}", reader.buffer_position()))
                        .into())
                }
                _ => {} // Ignore declarations, comments, processing instructions, doctypes
            }
            buf.clear();
        }

        if let Some(open) = element_stack.last() {
            return Err(ParseError::new(format!("Unclosed element <{}>", open.tag))
                .with_location("end of input")
                .into());
        }

        root.map(|root| Document { root })
            .ok_or_else(|| Error::Parse(ParseError::new("No root element found")))
    }

    /// Parse element from BytesStart event
    fn parse_element(start: &BytesStart, position: usize) -> Result<Element> {
        let location = || format!("byte {}", position);

        let tag = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| {
                ParseError::new(format!("Invalid element name: {}", e)).with_location(location())
            })?
            .to_string();

        let mut element = Element::new(tag);

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| {
                ParseError::new(format!("Failed to parse attribute: {}", e))
                    .with_location(location())
            })?;

            let attr_name = std::str::from_utf8(attr.key.as_ref()).map_err(|e| {
                ParseError::new(format!("Invalid attribute name: {}", e)).with_location(location())
            })?;

            let attr_value = attr.unescape_value().map_err(|e| {
                ParseError::new(format!("Failed to unescape attribute value: {}", e))
                    .with_location(location())
            })?;

            element
                .attributes
                .insert(attr_name.to_string(), attr_value.into_owned());
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

}

const MULTIPLE_ROOTS: &str = "Junk after document element: more than one root element";

fn multiple_roots(position: usize) -> Error {
    ParseError::new(MULTIPLE_ROOTS)
        .with_location(format!("byte {}", position))
        .into()
}

/// Whether `err` came from a second top-level element
pub(crate) fn is_multiple_roots(err: &Error) -> bool {
    err.as_parse().map_or(false, |e| e.message == MULTIPLE_ROOTS)
}
