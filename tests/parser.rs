use rstest::rstest;
use tinydom::{
    dom::{
        NodeType,
        node::{Node, NodeRef},
        node_list::NodeList,
    },
    error::XmlParserErrors,
    parser::{XmlParserCtxt, parse_document},
    save::serialize_to_string,
};

#[rstest]
#[case::unterminated_comment("<!-- unterminated", XmlParserErrors::XmlErrCommentNotFinished)]
#[case::tag_mismatch("<a><b></a>", XmlParserErrors::XmlErrTagNameMismatch)]
#[case::unquoted_value("<a attr=value/>", XmlParserErrors::XmlErrAttributeWithoutValue)]
#[case::unterminated_value("<a attr=\"unterminated/>", XmlParserErrors::XmlErrAttributeNotFinished)]
#[case::missing_attribute_name("<a =\"x\"/>", XmlParserErrors::XmlErrNameRequired)]
#[case::missing_tag_name("< a/>", XmlParserErrors::XmlErrNameRequired)]
#[case::unclosed_element("<a>", XmlParserErrors::XmlErrTagNotFinished)]
#[case::unclosed_element_with_text("<a>text", XmlParserErrors::XmlErrTagNotFinished)]
#[case::stray_end_tag("</a>", XmlParserErrors::XmlErrNotWellBalanced)]
#[case::end_tag_after_root("<a/></b>", XmlParserErrors::XmlErrNotWellBalanced)]
#[case::unterminated_start_tag("<a", XmlParserErrors::XmlErrGtRequired)]
#[case::unterminated_end_tag("<a></a", XmlParserErrors::XmlErrGtRequired)]
#[case::unterminated_doctype("<!DOCTYPE svg [<!ENTITY a 'b'>", XmlParserErrors::XmlErrDoctypeNotFinished)]
#[case::nested_doctype("<a><!DOCTYPE a></a>", XmlParserErrors::XmlErrNotWellBalanced)]
#[case::unterminated_xmldecl("<?xml version='1.0'", XmlParserErrors::XmlErrXMLDeclNotFinished)]
fn fatal_errors(#[case] input: &str, #[case] code: XmlParserErrors) {
    let err = parse_document(input).unwrap_err();
    assert_eq!(err.code(), code, "{input}: {err}");
}

#[rstest]
#[case("<a/>")]
#[case("<a> <b/> </a>")]
#[case(r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"><rect/>t<!--c--></g></svg>"#)]
#[case(r#"<a x="1 &amp; 2">a &lt; b</a>"#)]
#[case("<a><!----></a>")]
fn serialize_round_trip(#[case] input: &str) {
    let doc = parse_document(input).unwrap();
    assert_eq!(serialize_to_string(&doc).unwrap(), input);
}

#[rstest]
#[case("<a></a>", "<a/>")]
#[case("<a x='1' y=\"2\"/>", r#"<a x="1" y="2"/>"#)]
#[case(r#"<a x="1" x="2"/>"#, r#"<a x="2"/>"#)]
#[case("<a\n  x=\"1\"\n/>", r#"<a x="1"/>"#)]
#[case("\u{FEFF}<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a/>\n", "<a/>")]
#[case("<!-- head --><!DOCTYPE a><a/><!-- tail -->", "<a/>")]
#[case("<!DOCTYPE a><a>[x]</a>", "<a>[x]</a>")]
#[case(r#"<a><b x="/"></b></a>"#, r#"<a><b x="/"/></a>"#)]
#[case(r#"<a href="p/q">t</a>"#, r#"<a href="p/q">t</a>"#)]
fn serialize_normalized(#[case] input: &str, #[case] expected: &str) {
    let doc = parse_document(input).unwrap();
    assert_eq!(serialize_to_string(&doc).unwrap(), expected);
}

#[test]
fn error_position() {
    let err = parse_document("<a>\n  <b></c></a>").unwrap_err();
    assert_eq!(err.code(), XmlParserErrors::XmlErrTagNameMismatch);
    assert_eq!(err.message(), "Opening and ending tag mismatch: b and c");
    assert_eq!(err.offset(), 9);
    assert_eq!(err.line(), 2);
    assert_eq!(err.column(), 6);
}

#[rstest]
#[case::bracket_in_content("<!DOCTYPE a><a>[x]</a>", "<!DOCTYPE a>")]
#[case::bracket_after_declaration("<!DOCTYPE a>[<a/>", "<!DOCTYPE a>")]
#[case::internal_subset("<!DOCTYPE a [<!ELEMENT a ANY>]><a/>", "<!DOCTYPE a [<!ELEMENT a ANY>]>")]
fn doctype_extent(#[case] input: &str, #[case] source: &str) {
    let doc = parse_document(input).unwrap();
    let doctype = doc.doctype().unwrap();
    assert_eq!(doctype.name().as_ref(), "a");
    assert_eq!(doctype.source().as_ref(), source);
}

#[test]
fn doctype_with_internal_subset() {
    let input = r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" [<!ENTITY ns "x>y">]><svg/>"#;
    let doc = parse_document(input).unwrap();
    let doctype = doc.doctype().unwrap();
    assert_eq!(doctype.name().as_ref(), "svg");
    assert_eq!(
        doctype.source().as_ref(),
        r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" [<!ENTITY ns "x>y">]>"#
    );
    assert_eq!(doc.document_element().unwrap().tag_name().as_ref(), "svg");
    assert_eq!(serialize_to_string(&doc).unwrap(), "<svg/>");
}

#[test]
fn top_level_nodes_are_kept() {
    let doc = parse_document("<!--a--><!DOCTYPE r><r/>").unwrap();
    let children = doc.child_nodes();
    let types = (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|node| node.node_type())
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        [NodeType::Comment, NodeType::DocumentType, NodeType::Element]
    );
}

#[test]
fn empty_input_gives_empty_document() {
    let doc = parse_document("").unwrap();
    assert!(doc.document_element().is_none());
    assert!(!doc.has_child_nodes());
}

#[test]
fn namespaces_follow_declarations() {
    let doc = parse_document(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:x="urn:x"><x:a><b/></x:a><c xmlns=""/><x:d xmlns:x="urn:y"/></svg>"#,
    )
    .unwrap();
    let svg = doc.document_element().unwrap();
    let children = svg.child_nodes();
    let a = children.item(0).unwrap();
    let b = a.first_child().unwrap();
    let c = children.item(1).unwrap();
    let d = children.item(2).unwrap();

    assert_eq!(svg.namespace_uri().as_deref(), Some("http://www.w3.org/2000/svg"));
    assert_eq!(a.namespace_uri().as_deref(), Some("urn:x"));
    // an unprefixed child inherits the namespace of its parent
    assert_eq!(b.namespace_uri().as_deref(), Some("urn:x"));
    assert_eq!(c.namespace_uri(), None);
    assert_eq!(d.namespace_uri().as_deref(), Some("urn:y"));
}

#[test]
fn unknown_prefix_inherits_parent_namespace() {
    let doc = parse_document(r#"<svg xmlns="http://www.w3.org/2000/svg"><foo:bar/></svg>"#)
        .unwrap();
    let bar: NodeRef = doc.document_element().unwrap().first_child().unwrap();
    assert_eq!(bar.node_name().as_ref(), "foo:bar");
    assert_eq!(
        bar.namespace_uri().as_deref(),
        Some("http://www.w3.org/2000/svg")
    );
}

#[test]
fn nesting_depth_is_limited() {
    let ok = XmlParserCtxt::new("<a><b><c/></b></a>").with_max_depth(2).parse();
    assert!(ok.is_ok());

    let err = XmlParserCtxt::new("<a><b><c></c></b></a>")
        .with_max_depth(2)
        .parse()
        .unwrap_err();
    assert_eq!(err.code(), XmlParserErrors::XmlErrInternalError);

    let deep = "<a>".repeat(300) + &"</a>".repeat(300);
    let err = parse_document(&deep).unwrap_err();
    assert_eq!(err.code(), XmlParserErrors::XmlErrInternalError);
}

#[test]
fn many_siblings_without_empty_element_tags() {
    let count = 50_000;
    let input = format!("<a>{}</a>", "<b>x</b>".repeat(count));
    let doc = parse_document(&input).unwrap();
    let root = doc.document_element().unwrap();
    assert_eq!(root.child_nodes().length(), count);
    assert_eq!(root.get_elements_by_tag_name("b").length(), count);
    assert_eq!(serialize_to_string(&doc).unwrap(), input);
}
