//! Capabilities a component provides

use crate::documents::Element;
use serde::Serialize;

/// Provide kind for a flashed firmware GUID
pub const KIND_FIRMWARE_FLASHED: &str = "firmware-flashed";

/// Something a component satisfies, e.g. a device GUID for firmware
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Provide {
    /// Provide kind, e.g. `firmware-flashed`
    pub kind: Option<String>,
    /// Identifier, lower-cased
    pub value: Option<String>,
}

impl Provide {
    /// Create an empty provide
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flashed-firmware provide for `guid`
    pub fn firmware_flashed(guid: &str) -> Self {
        Self {
            kind: Some(KIND_FIRMWARE_FLASHED.to_string()),
            value: Some(guid.to_lowercase()),
        }
    }

    /// Build a provide from a child of `<provides>`.
    ///
    /// Only `<firmware>` is understood; anything else yields an empty provide.
    pub fn from_element(node: &Element) -> Self {
        let mut prov = Self::new();
        if node.tag == "firmware" {
            if node.attribute("type") == Some("flashed") {
                prov.kind = Some(KIND_FIRMWARE_FLASHED.to_string());
            }
            prov.value = node.text().map(str::to_lowercase);
        }
        prov
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashed_firmware() {
        let node = Element::new("firmware")
            .with_attribute("type", "flashed")
            .with_text("40338CEB-B966-4EAE-ADAE-9C32EDFCC484");
        let prov = Provide::from_element(&node);
        assert_eq!(prov.kind.as_deref(), Some("firmware-flashed"));
        assert_eq!(prov.value.as_deref(), Some("40338ceb-b966-4eae-adae-9c32edfcc484"));
    }

    #[test]
    fn test_runtime_firmware_has_no_kind() {
        let node = Element::new("firmware").with_attribute("type", "runtime").with_text("ABC");
        let prov = Provide::from_element(&node);
        assert!(prov.kind.is_none());
        assert_eq!(prov.value.as_deref(), Some("abc"));
    }

    #[test]
    fn test_other_tags_are_noop() {
        let node = Element::new("library").with_text("libfoo.so.1");
        assert_eq!(Provide::from_element(&node), Provide::new());
    }
}
