use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::{
    NodeType,
    element::{ElementRef, ElementWeakRef},
    node::{Node, NodeLinks},
};

/// Implementation of [Attr](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-637646024)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// An `Attr` is a view of one entry of the attribute table of its owner element.
/// It never has a parent and its value is not represented as child nodes.
pub struct Attr {
    pub(super) links: NodeLinks,
    /// Implementation of `name` attribute.
    name: Rc<str>,
    /// Implementation of `value` attribute.
    value: Rc<str>,
    /// Implementation of `ownerElement` attribute.
    owner_element: Option<ElementWeakRef>,
    /// Implementation of `namespaceURI` for `Node`.
    namespace_uri: Option<Rc<str>>,
}

/// Wrapper of `Rc<RefCell<Attr>>`.
#[derive(Clone)]
pub struct AttrRef(pub(super) Rc<RefCell<Attr>>);

impl AttrRef {
    /// Create new [`AttrRef`].
    ///
    /// If `name` has a prefix, it is resolved against the namespace declarations
    /// visible from `owner`. Attributes without a prefix have no namespace.
    pub(super) fn new(name: Rc<str>, value: Rc<str>, owner: Option<&ElementRef>) -> Self {
        let namespace_uri = name
            .split_once(':')
            .zip(owner)
            .and_then(|((prefix, _), owner)| owner.lookup_namespace_uri(prefix));
        Self(Rc::new(RefCell::new(Attr {
            links: NodeLinks::default(),
            name,
            value,
            owner_element: owner.map(|owner| owner.downgrade()),
            namespace_uri,
        })))
    }

    /// Implementation of `name` attribute.
    pub fn name(&self) -> Rc<str> {
        self.0.borrow().name.clone()
    }

    /// Implementation of `value` attribute.
    pub fn value(&self) -> Rc<str> {
        self.0.borrow().value.clone()
    }

    /// Implementation of `value` attribute.
    ///
    /// The new value is also written to the attribute table of the owner element,
    /// as long as the owner still has an attribute with the same name.
    pub fn set_value(&mut self, value: impl Into<Rc<str>>) {
        let value: Rc<str> = value.into();
        let (name, owner) = {
            let mut attr = self.0.borrow_mut();
            attr.value = value.clone();
            (attr.name.clone(), attr.owner_element.clone())
        };
        if let Some(owner) = owner.and_then(|owner| owner.upgrade()) {
            owner.0.borrow_mut().attributes.replace_existing(&name, value);
        }
    }

    /// Implementation of `ownerElement` attribute.
    pub fn owner_element(&self) -> Option<ElementRef> {
        self.0
            .borrow()
            .owner_element
            .as_ref()
            .and_then(|elem| elem.upgrade())
    }

    /// Generate [`AttrWeakRef`] from `self`.
    pub fn downgrade(&self) -> AttrWeakRef {
        AttrWeakRef(Rc::downgrade(&self.0))
    }
}

impl Node for AttrRef {
    fn node_name(&self) -> Rc<str> {
        self.name()
    }

    fn node_value(&self) -> Option<Rc<str>> {
        Some(self.value())
    }

    fn node_type(&self) -> NodeType {
        NodeType::Attribute
    }

    fn namespace_uri(&self) -> Option<Rc<str>> {
        self.0.borrow().namespace_uri.clone()
    }

    fn text_content(&self) -> Option<String> {
        Some(self.value().to_string())
    }
}

/// Wrapper of `Weak<RefCell<Attr>>`.
#[derive(Clone)]
pub struct AttrWeakRef(Weak<RefCell<Attr>>);

impl AttrWeakRef {
    /// Generate [`AttrRef`] from `self`.
    /// Success conditions are the same as for [`std::rc::Weak::upgrade`].
    pub fn upgrade(&self) -> Option<AttrRef> {
        self.0.upgrade().map(AttrRef)
    }
}

#[cfg(test)]
mod tests {
    use crate::{dom::XML_NS_NAMESPACE, parser::parse_document};

    use super::*;

    #[test]
    fn set_value_writes_through_to_the_owner() {
        let doc = parse_document(r#"<rect width="10" height="20"/>"#).unwrap();
        let elem = doc.document_element().unwrap();
        let mut width = elem.attributes().unwrap().get_named_item("width").unwrap();
        assert!(width.owner_element().unwrap().is_same_node(&elem.clone().into()));

        width.set_value("30");
        assert_eq!(&*width.value(), "30");
        assert_eq!(&*elem.get_attribute("width"), "30");
        assert_eq!(width.node_value().as_deref(), Some("30"));
    }

    #[test]
    fn set_value_on_a_removed_attribute_does_not_restore_it() {
        let doc = parse_document(r#"<rect width="10"/>"#).unwrap();
        let mut elem = doc.document_element().unwrap();
        let mut width = elem.attributes().unwrap().get_named_item("width").unwrap();
        elem.remove_attribute("width");
        width.set_value("30");
        assert!(!elem.has_attribute("width"));
        assert_eq!(elem.attributes().unwrap().len(), 0);
    }

    #[test]
    fn prefixed_attributes_are_resolved_against_ancestors() {
        let doc = parse_document(
            r#"<svg xmlns:ink="http://www.inkscape.org/namespaces/inkscape"><g ink:label="layer" id="g1"/></svg>"#,
        )
        .unwrap();
        let root = doc.document_element().unwrap();
        let g = root.first_child().unwrap().as_element().unwrap();
        let attrs = g.attributes().unwrap();
        assert_eq!(
            attrs.get_named_item("ink:label").unwrap().namespace_uri().as_deref(),
            Some("http://www.inkscape.org/namespaces/inkscape")
        );
        assert!(attrs.get_named_item("id").unwrap().namespace_uri().is_none());

        let decl = root.attributes().unwrap().get_named_item("xmlns:ink").unwrap();
        assert_eq!(decl.namespace_uri().as_deref(), Some(XML_NS_NAMESPACE));
        assert_eq!(decl.node_type(), NodeType::Attribute);
        assert!(decl.parent_node().is_none());
    }
}
