//! Description markup tests

use appstream::documents::Document;
use appstream::markup::{import_description, parse_description, validate_description};
use appstream::{Component, Error};
use pretty_assertions::assert_eq;

fn parse(xml: &str) -> Result<String, appstream::ParseError> {
    let doc = Document::from_string(xml).unwrap();
    parse_description(doc.root())
}

#[test]
fn test_grammar_strictness() {
    assert!(parse("<description><div>x</div></description>").is_err());
    assert!(parse("<description><ul><p>x</p></ul></description>").is_err());
    assert_eq!(
        parse("<description><p>line one\n line two</p></description>").unwrap(),
        "<p>line one line two</p>"
    );
}

#[test]
fn test_error_names_parent_tag() {
    let err = parse("<description><ol><li>a</li><item>b</item></ol></description>").unwrap_err();
    assert_eq!(err.message, "Expected <li> in <ol>, got <item>");
}

#[test]
fn test_component_description_error_is_parse_error() {
    let err = Component::parse("<component><description><h1>x</h1></description></component>")
        .unwrap_err();
    match err {
        Error::Parse(e) => assert_eq!(e.message, "Expected <p>, <ul>, <ol> in <description>, got <h1>"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_import_scenario() {
    assert_eq!(
        import_description("- a\n- b\n\nSome text."),
        "<ul>\n<li>A</li>\n<li>B</li>\n</ul>\n<p>Some text.</p>\n"
    );
}

#[test]
fn test_import_release_notes_validate() {
    let notes = "
 Fixes:
- BIOS boot successfully with special food.
- No related beep codes displayed when HDD disabled.

Enhancemets:
- Update Microcode to dave.
- Update TGC function WINS test.
";
    let markup = import_description(notes);
    assert_eq!(
        validate_description(&markup).unwrap(),
        "<p>Fixes:</p><ul><li>BIOS boot successfully with special food.</li>\
         <li>No related beep codes displayed when HDD disabled.</li></ul>\
         <p>Enhancemets:</p><ul><li>Update Microcode to dave.</li>\
         <li>Update TGC function WINS test.</li></ul>"
    );
}

#[test]
fn test_import_numbered_validate() {
    let notes = "\n1. First version to support Win7 OS.\n2. First version to support dock.\n";
    let markup = import_description(notes);
    // a lone list is its own root, so it has to be placed in a description
    assert!(validate_description(&markup).is_err());
    assert_eq!(
        validate_description(&format!("<description>{}</description>", markup)).unwrap(),
        "<ul><li>First version to support Win7 OS.</li><li>First version to support dock.</li></ul>"
    );
}

#[test]
fn test_validate_full_description_document() {
    let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
               <!-- release notes -->\n\
               <description><p>Fixes.</p><ol><li>one</li></ol></description>\n";
    assert_eq!(
        validate_description(xml).unwrap(),
        "<p>Fixes.</p><ul><li>one</li></ul>"
    );
}

#[test]
fn test_validate_description_malformed() {
    let err = validate_description("<description><p>x</description>").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));

    let err = validate_description("<description><b>x</b></description>").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_markup_survives_component_round_trip() {
    let markup = validate_description(&import_description("fish & chips\n- salt\n- vinegar")).unwrap();
    let component = Component::builder().id("a").description(markup.clone()).build();
    let again = Component::parse(&component.to_xml()).unwrap();
    assert_eq!(again.description.as_deref(), Some(markup.as_str()));
}
