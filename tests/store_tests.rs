//! Catalog tests

use appstream::{Component, Error, Limits, Release, Store};
use pretty_assertions::assert_eq;

const FIRMWARE: &str = r#"<component type="firmware">
  <id>com.hughski.ColorHug.firmware</id>
  <name>ColorHug Device Update</name>
  <summary>Firmware for the Hughski ColorHug Colorimeter</summary>
  <description><p>Updating adds new features.</p></description>
  <provides>
    <firmware type="flashed">40338ceb-b966-4eae-adae-9c32edfcc484</firmware>
  </provides>
  <url type="homepage">http://www.hughski.com/</url>
  <metadata_license>CC0-1.0</metadata_license>
  <project_license>GPL-2.0+</project_license>
  <developer_name>Hughski Limited</developer_name>
  <releases>
    <release version="1.2.4" timestamp="1438454314">
      <checksum target="content" filename="firmware.bin" type="sha1">deadbeef</checksum>
    </release>
  </releases>
</component>
"#;

const UPDATE: &str = r#"<component type="firmware">
  <id>com.hughski.ColorHug.firmware</id>
  <releases>
    <release version="1.2.5" timestamp="1500000000">
      <description><p>This release adds magic®.</p></description>
    </release>
    <release version="1.2.4" timestamp="1438454314"/>
  </releases>
</component>
"#;

#[test]
fn test_add_merges_releases() {
    let mut store = Store::new();
    store.add(Component::parse(FIRMWARE).unwrap());
    store.add(Component::parse(UPDATE).unwrap());

    assert_eq!(store.len(), 1);
    let app = store.get_component("com.hughski.ColorHug.firmware").unwrap();
    let versions: Vec<_> = app.releases.iter().map(|r| r.version.as_deref().unwrap()).collect();
    // duplicates survive a store-level merge
    assert_eq!(versions, vec!["1.2.4", "1.2.5", "1.2.4"]);
    assert_eq!(app.name.as_deref(), Some("ColorHug Device Update"));
    assert_eq!(
        app.releases[1].description.as_deref(),
        Some("<p>This release adds magic®.</p>")
    );
}

#[test]
fn test_catalog_xml() {
    let mut store = Store::with_origin("lvfs");
    store.add(Component::parse(FIRMWARE).unwrap());

    let xml = store.to_xml();
    assert!(xml.starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<components version=\"0.9\" origin=\"lvfs\">\n  <component type=\"firmware\">\n"
    ));
    assert!(xml.ends_with("  </component>\n</components>\n"));

    let parsed = Store::parse(&xml).unwrap();
    assert_eq!(parsed.origin.as_deref(), Some("lvfs"));
    assert_eq!(parsed.to_xml(), xml);

    let app = parsed.get_component("com.hughski.ColorHug.firmware").unwrap();
    app.validate().unwrap();
    assert_eq!(app.releases[0].checksums[0].value.as_deref(), Some("deadbeef"));
}

#[test]
fn test_empty_catalog() {
    let store = Store::with_origin("empty");
    assert_eq!(store.to_xml(), "<components version=\"0.9\" origin=\"empty\"/>\n");

    let parsed = Store::parse(&store.to_xml()).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.origin.as_deref(), Some("empty"));
}

#[test]
fn test_parse_duplicate_ids_keeps_second() {
    let xml = format!(
        "<components version=\"0.9\" origin=\"x\">{}{}</components>",
        FIRMWARE.replace("<?xml version=\"1.0\" encoding=\"UTF-8\"?>", ""),
        UPDATE
    );
    let store = Store::parse(&xml).unwrap();
    assert_eq!(store.len(), 1);

    let app = store.get_component("com.hughski.ColorHug.firmware").unwrap();
    assert!(app.name.is_none());
    assert_eq!(app.releases.len(), 2);
    assert_eq!(app.releases[0].version.as_deref(), Some("1.2.5"));
}

#[test]
fn test_parse_requires_origin() {
    let err = Store::parse("<components version=\"0.9\"><component/></components>").unwrap_err();
    assert!(matches!(err, Error::Key(_)));

    let err = Store::parse("<components origin=\"x\">").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_get_component_mut() {
    let mut store = Store::with_origin("lvfs");
    store.add(Component::parse(FIRMWARE).unwrap());

    store
        .get_component_mut("com.hughski.ColorHug.firmware")
        .unwrap()
        .add_release(Release::new().with_version("2.0").with_timestamp(2));
    assert_eq!(
        store.get_component("com.hughski.ColorHug.firmware").unwrap().releases.len(),
        2
    );
    assert!(store.get_component("missing").is_none());
}

#[test]
fn test_gzip_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firmware.xml.gz");

    let mut store = Store::with_origin("lvfs");
    store.add(Component::parse(FIRMWARE).unwrap());
    store.add(Component::parse(UPDATE).unwrap());
    store.to_file(&path).unwrap();

    let raw = std::fs::read(&path).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);

    let loaded = Store::from_file(&path).unwrap();
    assert_eq!(loaded.to_xml(), store.to_xml());
    assert_eq!(loaded.components().count(), 1);
}

#[test]
fn test_strict_limits_reject_large_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firmware.xml.gz");

    let mut store = Store::with_origin("lvfs");
    for idx in 0..2000 {
        let mut component = Component::parse(FIRMWARE).unwrap();
        component.id = Some(format!("com.example.device{}.firmware", idx));
        store.add(component);
    }
    store.to_file(&path).unwrap();

    let err = Store::from_file_with_limits(&path, &Limits::strict()).unwrap_err();
    assert!(matches!(err, Error::LimitExceeded(_)));
    assert_eq!(Store::from_file(&path).unwrap().len(), 2000);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Store::from_file(dir.path().join("nope.xml.gz")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
