//! Serialize a tree back to text.
//!
//! The output is a plain concatenation of the tree: attribute values and text data are
//! written as they are stored, without escaping, and no whitespace is added.

use std::fmt::Write as _;

use crate::dom::{
    DOMException,
    node::{Node, NodeRef},
    node_list::NodeList,
};

/// Serializer for nodes.
///
/// This holds no state. It exists so that callers can pass a serializer around.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    /// Create new serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize `node` and its descendants.
    ///
    /// - A document is written as its document element only.
    ///   If it has no document element, [`DOMException::InvalidStateErr`] is returned.
    /// - An element is written as a start tag, its children and an end tag,
    ///   or as an empty-element tag if it has no children.
    /// - A text is written as is, and a comment as `<!--data-->`.
    /// - An attribute or a document type declaration cannot be serialized by itself,
    ///   so [`DOMException::NotSupportedErr`] is returned.
    pub fn serialize_to_string(&self, node: &impl Node) -> Result<String, DOMException> {
        let node: NodeRef = node.clone().into();
        let mut buf = String::new();
        self.write_node(&mut buf, &node)?;
        Ok(buf)
    }

    fn write_node(&self, buf: &mut String, node: &NodeRef) -> Result<(), DOMException> {
        match node {
            NodeRef::Document(doc) => {
                let elem = doc
                    .document_element()
                    .ok_or(DOMException::InvalidStateErr)?;
                self.write_node(buf, &elem.into())
            }
            NodeRef::Element(elem) => {
                let tag_name = elem.tag_name();
                buf.push('<');
                buf.push_str(&tag_name);
                if let Some(attrs) = elem.attributes() {
                    for i in 0..attrs.len() {
                        if let Some(attr) = attrs.item(i) {
                            // writing to a `String` never fails
                            let _ = write!(buf, " {}=\"{}\"", attr.name(), attr.value());
                        }
                    }
                }
                let children = elem.child_nodes();
                if children.length() == 0 {
                    buf.push_str("/>");
                    return Ok(());
                }
                buf.push('>');
                for i in 0..children.length() {
                    if let Some(child) = children.item(i) {
                        self.write_node(buf, &child)?;
                    }
                }
                buf.push_str("</");
                buf.push_str(&tag_name);
                buf.push('>');
                Ok(())
            }
            NodeRef::Text(_) => {
                if let Some(data) = node.data() {
                    buf.push_str(&data);
                }
                Ok(())
            }
            NodeRef::Comment(_) => {
                if let Some(data) = node.data() {
                    buf.push_str("<!--");
                    buf.push_str(&data);
                    buf.push_str("-->");
                }
                Ok(())
            }
            NodeRef::Attribute(_) | NodeRef::DocumentType(_) => Err(DOMException::NotSupportedErr),
        }
    }
}

/// Serialize `node` with the default [`XmlSerializer`].
pub fn serialize_to_string(node: &impl Node) -> Result<String, DOMException> {
    XmlSerializer::new().serialize_to_string(node)
}
