use std::fs::read;

use glob::glob;
use tinydom::{
    dom::{
        node::{Node, NodeRef},
        node_list::NodeList,
    },
    encoding::decode,
    parser::parse_document,
    strip::{
        NS_INKSCAPE, NS_SODIPODI, NoProgress, StripOptions, UNWANTED_NAMESPACES,
        remove_namespaced_attributes, remove_namespaced_elements, scour_string, strip_document,
    },
};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Collect the namespaces of all elements and attributes, and the values of all
/// `xmlns:` declarations below `node`.
fn collect_namespaces(node: &NodeRef, found: &mut Vec<String>) {
    let Some(elem) = node.as_element() else {
        return;
    };
    found.extend(elem.namespace_uri().map(|uri| uri.to_string()));
    if let Some(attrs) = elem.attributes() {
        for i in 0..attrs.len() {
            let attr = attrs.item(i).unwrap();
            found.extend(attr.namespace_uri().map(|uri| uri.to_string()));
            if attr.name().starts_with("xmlns:") {
                found.push(attr.value().to_string());
            }
        }
    }
    let children = elem.child_nodes();
    for i in 0..children.length() {
        collect_namespaces(&children.item(i).unwrap(), found);
    }
}

#[test]
fn sodipodi_elements_are_removed() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"><sodipodi:x/><rect width="1"/></svg>"#;
    let out = scour_string(svg, &StripOptions::default(), &mut NoProgress).unwrap();
    assert!(out.contains("rect"));
    assert!(!out.contains("sodipodi:x"));
    assert_eq!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1"/></svg>"#
    );
}

#[test]
fn passes_can_run_separately() {
    let doc = parse_document(&decode(&read(format!("{FIXTURES}/inkscape.svg")).unwrap()).unwrap())
        .unwrap();
    let root: NodeRef = doc.document_element().unwrap().into();

    // <sodipodi:namedview> with its <inkscape:grid>, and <inkscape:perspective>
    assert_eq!(
        remove_namespaced_elements(&root, UNWANTED_NAMESPACES, &mut NoProgress),
        2
    );
    let mut found = vec![];
    collect_namespaces(&root, &mut found);
    assert!(found.iter().any(|ns| ns == NS_INKSCAPE));

    // inkscape:version, two declarations, inkscape:label and inkscape:groupmode
    assert_eq!(
        remove_namespaced_attributes(&root, UNWANTED_NAMESPACES, &mut NoProgress),
        5
    );
    found.clear();
    collect_namespaces(&root, &mut found);
    assert!(!found.iter().any(|ns| ns == NS_INKSCAPE || ns == NS_SODIPODI));
}

#[test]
fn non_elements_are_ignored() {
    let doc = parse_document("<a>text</a>").unwrap();
    let text = doc.document_element().unwrap().first_child().unwrap();
    assert_eq!(remove_namespaced_elements(&text, UNWANTED_NAMESPACES, &mut NoProgress), 0);
    assert_eq!(remove_namespaced_attributes(&text, UNWANTED_NAMESPACES, &mut NoProgress), 0);
}

#[test]
fn stripped_fixtures_have_no_editor_data() {
    let mut count = 0;
    for path in glob(&format!("{FIXTURES}/*.svg")).unwrap() {
        let path = path.unwrap();
        let text = decode(&read(&path).unwrap()).unwrap();
        let out = scour_string(&text, &StripOptions::default(), &mut NoProgress)
            .unwrap_or_else(|err| panic!("{}: {err}", path.display()));

        let doc = parse_document(&out).unwrap();
        let mut found = vec![];
        collect_namespaces(&doc.document_element().unwrap().into(), &mut found);
        for ns in &found {
            assert!(
                !UNWANTED_NAMESPACES.contains(&ns.as_str()),
                "{}: {ns} is left",
                path.display()
            );
        }
        count += 1;
    }
    assert!(count >= 4);
}

#[test]
fn svg_content_is_kept() {
    let text = decode(&read(format!("{FIXTURES}/adobe.svg")).unwrap()).unwrap();
    let doc = parse_document(&text).unwrap();
    let report = strip_document(&doc, &StripOptions::default(), &mut NoProgress);
    // <i:pgf>, <sfw:sfw> and <graph:data>
    assert_eq!(report.removed_elements, 3);

    let svg = doc.document_element().unwrap();
    assert_eq!(svg.get_attribute("width").as_ref(), "120");
    assert_eq!(
        svg.get_attribute("xmlns:xlink").as_ref(),
        "http://www.w3.org/1999/xlink"
    );
    assert!(!svg.has_attribute("i:viewOrigin"));
    assert_eq!(svg.get_elements_by_tag_name("path").length(), 1);
    assert_eq!(svg.get_elements_by_tag_name("use").length(), 1);
    assert!(doc.doctype().is_some());

    // nothing is left to remove
    let report = strip_document(&doc, &StripOptions::default(), &mut NoProgress);
    assert_eq!(report.removed_elements + report.removed_attributes, 0);
}

#[test]
fn plain_svg_is_unchanged() {
    let text = decode(&read(format!("{FIXTURES}/plain.svg")).unwrap()).unwrap();
    let out = scour_string(&text, &StripOptions::default(), &mut NoProgress).unwrap();
    assert_eq!(out, text.trim_end());
}
