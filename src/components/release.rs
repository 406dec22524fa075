//! Component releases

use super::checksum::Checksum;
use crate::documents::Element;
use crate::error::{ParseError, Result};
use crate::markup::{escape_attribute, escape_text, parse_description};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

/// Recognized children of `<release>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleaseChild {
    Description,
    Size,
    Checksum,
    Location,
    Ignored,
}

impl ReleaseChild {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "description" => ReleaseChild::Description,
            "size" => ReleaseChild::Size,
            "checksum" => ReleaseChild::Checksum,
            "location" => ReleaseChild::Location,
            _ => ReleaseChild::Ignored,
        }
    }
}

/// One versioned update of a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Release {
    /// Version string; hex versions are stored as decimal
    pub version: Option<String>,
    /// Description markup
    pub description: Option<String>,
    /// Release time in seconds since the epoch, 0 when unknown
    pub timestamp: i64,
    /// Checksums, unique by target
    pub checksums: Vec<Checksum>,
    /// Download location of the update payload
    pub location: Option<String>,
    /// Installed size in bytes
    pub size_installed: u64,
    /// Download size in bytes
    pub size_download: u64,
    /// Update urgency, e.g. `high`
    pub urgency: Option<String>,
}

impl Release {
    /// Create an empty release
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the description markup
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the download location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the urgency
    pub fn with_urgency(mut self, urgency: impl Into<String>) -> Self {
        self.urgency = Some(urgency.into());
        self
    }

    /// Returns the checksum for a specific target
    pub fn get_checksum_by_target(&self, target: &str) -> Option<&Checksum> {
        self.checksums
            .iter()
            .find(|csum| csum.target.as_deref() == Some(target))
    }

    /// Add a checksum, replacing any existing checksum for the same target.
    ///
    /// The replacement is appended, so it moves to the end of the list.
    pub fn add_checksum(&mut self, csum: Checksum) {
        if let Some(pos) = self.checksums.iter().position(|c| c.target == csum.target) {
            self.checksums.remove(pos);
        }
        self.checksums.push(csum);
    }

    /// Build a release from a `<release>` element
    pub fn from_element(node: &Element) -> Result<Self> {
        let mut rel = Self::new();

        if let Some(timestamp) = node.attribute("timestamp") {
            rel.timestamp = parse_int(timestamp, "timestamp")?;
        } else if let Some(date) = node.attribute("date") {
            rel.timestamp = parse_date(date)?;
        }
        if let Some(urgency) = node.attribute("urgency") {
            rel.urgency = Some(urgency.to_string());
        }
        if let Some(version) = node.attribute("version") {
            rel.version = Some(normalize_version(version)?);
        }

        for child in &node.children {
            match ReleaseChild::from_tag(&child.tag) {
                ReleaseChild::Description => {
                    rel.description = Some(parse_description(child)?);
                }
                ReleaseChild::Size => match child.attribute("type") {
                    Some("installed") => {
                        rel.size_installed = parse_int(child.text().unwrap_or_default(), "size")?;
                    }
                    Some("download") => {
                        rel.size_download = parse_int(child.text().unwrap_or_default(), "size")?;
                    }
                    _ => {}
                },
                ReleaseChild::Checksum => rel.add_checksum(Checksum::from_element(child)),
                ReleaseChild::Location => {
                    rel.location = child.text().map(|t| t.trim().to_string());
                }
                ReleaseChild::Ignored => {
                    tracing::trace!(tag = %child.tag, "ignoring unknown <release> child");
                }
            }
        }

        Ok(rel)
    }

    /// Serialize as an indented `<release>` block
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("      <release");
        if let Some(version) = self.version.as_deref().filter(|v| !v.is_empty()) {
            xml.push_str(&format!(" version=\"{}\"", escape_attribute(version)));
        }
        if self.timestamp != 0 {
            xml.push_str(&format!(" timestamp=\"{}\"", self.timestamp));
        }
        if let Some(urgency) = self.urgency.as_deref().filter(|u| !u.is_empty()) {
            xml.push_str(&format!(" urgency=\"{}\"", escape_attribute(urgency)));
        }
        xml.push_str(">\n");
        if self.size_installed > 0 {
            xml.push_str(&format!(
                "        <size type=\"installed\">{}</size>\n",
                self.size_installed
            ));
        }
        if self.size_download > 0 {
            xml.push_str(&format!(
                "        <size type=\"download\">{}</size>\n",
                self.size_download
            ));
        }
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            xml.push_str(&format!("        <location>{}</location>\n", escape_text(location)));
        }
        for csum in &self.checksums {
            xml.push_str(&csum.to_xml());
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            xml.push_str(&format!("        <description>{}</description>\n", description));
        }
        xml.push_str("      </release>\n");
        xml
    }
}

/// Rewrite `0x`-prefixed versions as their decimal value
fn normalize_version(version: &str) -> std::result::Result<String, ParseError> {
    match version.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16)
            .map(|value| value.to_string())
            .map_err(|e| ParseError::new(format!("Invalid hex version '{}': {}", version, e))),
        None => Ok(version.to_string()),
    }
}

fn parse_int<T: std::str::FromStr>(text: &str, what: &str) -> std::result::Result<T, ParseError>
where
    T::Err: std::fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|e| ParseError::new(format!("Invalid {} '{}': {}", what, text, e)))
}

/// Convert a `date` attribute to seconds since the epoch (midnight UTC for plain dates)
fn parse_date(date: &str) -> std::result::Result<i64, ParseError> {
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).timestamp());
        }
    }
    DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.timestamp())
        .map_err(|e| ParseError::new(format!("Invalid date '{}': {}", date, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn parse(xml: &str) -> Result<Release> {
        let doc = Document::from_string(xml)?;
        Release::from_element(doc.root())
    }

    #[test]
    fn test_parse_full_release() {
        let rel = parse(
            r#"<release version="1.2.4" timestamp="1438454314" urgency="high">
                 <size type="installed">123456</size>
                 <size type="download">654321</size>
                 <size>1</size>
                 <checksum target="content" filename="firmware.bin" type="sha1">deadbeef</checksum>
                 <description><p>Fixes bugs:</p><ul><li>Fix the RC</li></ul></description>
                 <artifact/>
               </release>"#,
        )
        .unwrap();

        assert_eq!(rel.version.as_deref(), Some("1.2.4"));
        assert_eq!(rel.timestamp, 1438454314);
        assert_eq!(rel.urgency.as_deref(), Some("high"));
        assert_eq!(rel.size_installed, 123456);
        assert_eq!(rel.size_download, 654321);
        assert_eq!(rel.checksums.len(), 1);
        assert_eq!(
            rel.description.as_deref(),
            Some("<p>Fixes bugs:</p><ul><li>Fix the RC</li></ul>")
        );
    }

    #[test]
    fn test_hex_version() {
        let rel = parse(r#"<release version="0x10"/>"#).unwrap();
        assert_eq!(rel.version.as_deref(), Some("16"));

        let err = parse(r#"<release version="0xzz"/>"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_invalid_timestamp() {
        let err = parse(r#"<release timestamp="yesterday"/>"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_date_fallback() {
        let rel = parse(r#"<release version="1" date="2016-02-25"/>"#).unwrap();
        assert_eq!(rel.timestamp, 1456358400);

        let rel = parse(r#"<release version="1" date="2016-02-25T00:00:10Z"/>"#).unwrap();
        assert_eq!(rel.timestamp, 1456358410);
    }

    #[test]
    fn test_timestamp_wins_over_date() {
        let rel = parse(r#"<release timestamp="1438454314" date="2016-02-25"/>"#).unwrap();
        assert_eq!(rel.timestamp, 1438454314);
    }

    #[test]
    fn test_checksum_replace_moves_to_end() {
        let mut rel = Release::new();
        rel.add_checksum(Checksum::new().with_target("a").with_value("1"));
        rel.add_checksum(Checksum::new().with_target("b").with_value("2"));
        rel.add_checksum(Checksum::new().with_target("c").with_value("3"));
        rel.add_checksum(Checksum::new().with_target("b").with_value("4"));

        let order: Vec<_> = rel.checksums.iter().map(|c| c.target.as_deref().unwrap()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
        assert_eq!(rel.get_checksum_by_target("b").unwrap().value.as_deref(), Some("4"));
        assert!(rel.get_checksum_by_target("d").is_none());
    }

    #[test]
    fn test_to_xml_field_order() {
        let mut rel = Release::new()
            .with_version("1.2.5")
            .with_timestamp(1500000000)
            .with_location("http://localhost/fw.cab")
            .with_description("<p>Magic.</p>");
        rel.size_installed = 10;
        rel.add_checksum(Checksum::new().with_target("container").with_filename("fw.cab").with_value("ab"));

        assert_eq!(
            rel.to_xml(),
            "      <release version=\"1.2.5\" timestamp=\"1500000000\">\n\
             \x20       <size type=\"installed\">10</size>\n\
             \x20       <location>http://localhost/fw.cab</location>\n\
             \x20       <checksum filename=\"fw.cab\" target=\"container\" type=\"sha1\">ab</checksum>\n\
             \x20       <description><p>Magic.</p></description>\n\
             \x20     </release>\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let mut rel = Release::new()
            .with_version("2.0")
            .with_timestamp(42)
            .with_urgency("low")
            .with_location("https://example.com/a.cab")
            .with_description("<p>A &amp; B</p><ul><li>C</li></ul>");
        rel.size_download = 7;
        rel.add_checksum(Checksum::new().with_target("container").with_filename("a.cab").with_value("1"));
        rel.add_checksum(Checksum::new().with_target("content").with_filename("a.bin").with_value("2"));

        let again = parse(&rel.to_xml()).unwrap();
        assert_eq!(again, rel);
    }
}
