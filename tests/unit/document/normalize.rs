use super::*;

fn root_tag(serialized: &str) -> &str {
    let end = serialized.find('>').unwrap();
    &serialized[..=end]
}

#[test]
fn viewbox_only_gains_full_size() {
    let raw = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="50" r="40" fill="green"/></svg>"#;
    let out = normalize(raw).unwrap();
    let root = root_tag(out.as_str());
    assert!(root.contains(r#"width="100%""#), "{root}");
    assert!(root.contains(r#"height="100%""#), "{root}");
    assert!(out.as_str().contains(r#"<circle cx="50" cy="50" r="40" fill="green"/>"#));
}

#[test]
fn explicit_dimensions_are_kept() {
    let raw = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200"><rect width="200" height="200" fill="red"/></svg>"#;
    let out = normalize(raw).unwrap();
    assert!(out.as_str().contains(r#"width="200""#));
    assert!(out.as_str().contains(r#"height="200""#));
    assert!(!out.as_str().contains("100%"));
}

#[test]
fn one_explicit_dimension_blocks_injection() {
    let raw = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="50"/>"#;
    let out = normalize(raw).unwrap();
    assert!(!out.as_str().contains("100%"));
}

#[test]
fn missing_xmlns_is_added() {
    let raw = r#"<svg viewBox="0 0 50 50"><rect width="50" height="50" fill="purple"/></svg>"#;
    let out = normalize(raw).unwrap();
    assert!(out.as_str().contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    assert_eq!(out.as_str().matches("xmlns=").count(), 1);
}

#[test]
fn empty_xmlns_is_replaced() {
    let raw = r#"<svg xmlns="" width="1" height="1"/>"#;
    let out = normalize(raw).unwrap();
    assert_eq!(out.as_str().matches("xmlns=").count(), 1);
    assert!(out.as_str().contains(SVG_NS));
}

#[test]
fn animation_detection() {
    let animated = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="50" r="20" fill="orange"><animate attributeName="r" from="20" to="40" dur="1s" repeatCount="indefinite"/></circle></svg>"#;
    assert!(normalize(animated).unwrap().is_animated());

    let css = r#"<svg xmlns="http://www.w3.org/2000/svg"><style>@keyframes spin { to { transform: rotate(1turn) } }</style></svg>"#;
    assert!(normalize(css).unwrap().is_animated());

    let set = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect><set attributeName="fill" to="red"/></rect></svg>"#;
    assert!(normalize(set).unwrap().is_animated());

    let still = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="50" r="40" fill="green"/></svg>"#;
    assert!(!normalize(still).unwrap().is_animated());
}

#[test]
fn empty_input_is_an_input_error() {
    for raw in ["", "   ", "\n\t"] {
        let err = normalize(raw).unwrap_err();
        assert!(matches!(err, SvgshotError::Input(_)), "{err}");
        assert_eq!(err.message(), "empty input");
    }
}

#[test]
fn malformed_xml_is_a_parse_error() {
    let err = normalize("<svg><unclosed").unwrap_err();
    assert!(matches!(err, SvgshotError::Parse(_)), "{err}");
    assert!(!err.message().contains('\n'));
}

#[test]
fn non_svg_root_is_rejected() {
    let err = normalize("<div>not svg</div>").unwrap_err();
    assert!(matches!(err, SvgshotError::Parse(_)));
    assert_eq!(err.message(), "root element is not svg");
}

#[test]
fn normalizing_twice_adds_nothing() {
    let raw = r#"<svg viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#;
    let once = normalize(raw).unwrap();
    let twice = normalize(once.as_str()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn prolog_and_trailing_content_are_dropped() {
    let raw = "<?xml version=\"1.0\"?>\n<!-- logo -->\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"><g/></svg>\n<!-- end -->";
    let out = normalize(raw).unwrap();
    assert!(out.as_str().starts_with("<svg"));
    assert!(out.as_str().ends_with("</svg>"));
}

#[test]
fn attribute_values_are_reescaped() {
    let raw = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1" aria-label='say "hi" &amp; bye'/>"#;
    let out = normalize(raw).unwrap();
    // Must still parse after re-quoting.
    let again = normalize(out.as_str()).unwrap();
    assert_eq!(out, again);
}

#[test]
fn output_is_deterministic() {
    let raw = r#"<svg viewBox="0 0 10 10" id="a" class="b"><rect width="10" height="10"/></svg>"#;
    assert_eq!(normalize(raw).unwrap(), normalize(raw).unwrap());
}

#[test]
fn duration_shortcut_reads_serialized_text() {
    let raw = r#"<svg viewBox="0 0 10 10"><animate dur="3s"/></svg>"#;
    assert_eq!(normalize(raw).unwrap().duration_ms(), 3000);
}

#[test]
fn entity_valued_root_attributes_are_expanded() {
    let raw = r#"<!DOCTYPE svg [
  <!ENTITY ns_svg "http://www.w3.org/2000/svg">
  <!ENTITY ns_xlink "http://www.w3.org/1999/xlink">
  <!ENTITY w "40">
]>
<svg xmlns="&ns_svg;" xmlns:xlink="&ns_xlink;" width="&w;" height="20"><rect width="&w;" height="20"/></svg>"#;
    let out = normalize(raw).unwrap();
    let root = root_tag(&out.as_str()[out.as_str().find("<svg").unwrap()..]).to_owned();
    assert!(root.contains(r#"xmlns="http://www.w3.org/2000/svg""#), "{root}");
    assert!(root.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#), "{root}");
    assert!(root.contains(r#"width="40""#), "{root}");
    assert!(!out.as_str().contains("&amp;"), "{}", out.as_str());

    let doc = roxmltree::Document::parse_with_options(
        out.as_str(),
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .unwrap();
    let svg = doc.root_element();
    assert_eq!(svg.tag_name().namespace(), Some(SVG_NS));
    assert_eq!(svg.attribute("width"), Some("40"));
    // Body references still resolve through the kept internal subset.
    assert_eq!(svg.first_element_child().unwrap().attribute("width"), Some("40"));
}

#[test]
fn character_references_in_root_are_written_once() {
    let raw = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1" aria-label="a &#38; b"/>"#;
    let out = normalize(raw).unwrap();
    assert!(out.as_str().contains(r#"aria-label="a &amp; b""#), "{}", out.as_str());
}
