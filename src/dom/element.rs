use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use super::{
    NodeType, XML_NS_NAMESPACE, XML_XML_NAMESPACE,
    named_node_map::{AttributeTable, NamedNodeMap},
    node::{Node, NodeLinks, NodeRef},
    node_list::FilteredSubtreeElementsList,
};

/// Implementation of [Element](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-745549614)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
pub struct Element {
    pub(super) links: NodeLinks,
    /// Implementation of `tagName` for `Element`.
    /// as same as `nodeName` for `Node`.
    ///
    /// This may be a QName such as `svg:rect`.
    tag_name: Rc<str>,
    pub(super) attributes: AttributeTable,
    /// Materialized [`NamedNodeMap`]. This is created on the first request.
    attribute_map: Option<NamedNodeMap>,
    /// Prefixes declared by `xmlns:prefix` attributes of this element.
    ns_prefix_map: HashMap<Rc<str>, Rc<str>>,
    /// Implementation of `namespaceURI` for `Node`.
    namespace_uri: Option<Rc<str>>,
}

/// Wrapper of `Rc<RefCell<Element>>`.
#[derive(Clone)]
pub struct ElementRef(pub(super) Rc<RefCell<Element>>);

impl ElementRef {
    /// Create new [`ElementRef`] that will be a child of `parent`.
    ///
    /// `parent` is only used to resolve the namespace.
    /// The new element is not appended to it.
    ///
    /// The namespace is decided as follows, and is never recomputed.
    /// 1. the namespace of `parent`, if any.
    /// 2. the value of an `xmlns` attribute overrides 1.
    /// 3. if `tag_name` has a prefix, the nearest declaration of the prefix
    ///    on this element or its ancestors overrides 1 and 2.
    pub(crate) fn with_attributes(
        tag_name: impl Into<Rc<str>>,
        parent: Option<&NodeRef>,
        attributes: AttributeTable,
    ) -> Self {
        let tag_name: Rc<str> = tag_name.into();
        let mut namespace_uri = parent.and_then(|par| par.namespace_uri());
        let mut ns_prefix_map = HashMap::new();
        for (name, value) in attributes.iter() {
            if let Some(prefix) = name.strip_prefix("xmlns:").filter(|p| !p.is_empty()) {
                ns_prefix_map.insert(Rc::from(prefix), value.clone());
            } else if name.as_ref() == "xmlns" {
                // `xmlns=""` undeclares the default namespace.
                namespace_uri = Some(value.clone()).filter(|uri| !uri.is_empty());
            }
        }

        if let Some((prefix, _)) = tag_name.split_once(':') {
            let uri = ns_prefix_map
                .get(prefix)
                .filter(|uri| !uri.is_empty())
                .cloned()
                .or_else(|| lookup_prefix_in_ancestors(parent.cloned(), prefix));
            if uri.is_some() {
                namespace_uri = uri;
            }
        }

        Self(Rc::new(RefCell::new(Element {
            links: NodeLinks::default(),
            tag_name,
            attributes,
            attribute_map: None,
            ns_prefix_map,
            namespace_uri,
        })))
    }

    /// Implementation of `tagName` attribute.
    pub fn tag_name(&self) -> Rc<str> {
        self.0.borrow().tag_name.clone()
    }

    /// Implementation of [`getAttribute`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-666EE0F9) method.
    ///
    /// # Specification
    /// ```text
    /// Retrieves an attribute value by name.
    ///
    /// Parameters
    ///     name of type DOMString
    ///         The name of the attribute to retrieve.
    ///
    /// Return Value
    ///     DOMString The Attr value as a string, or the empty string if that attribute
    ///               does not have a specified or default value.
    /// ```
    pub fn get_attribute(&self, name: &str) -> Rc<str> {
        self.0
            .borrow()
            .attributes
            .get(name)
            .unwrap_or_else(|| "".into())
    }

    /// Implementation of [`setAttribute`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-F68F082) method.
    ///
    /// Namespace declarations set by this method do not affect namespaces that are already
    /// resolved.
    pub fn set_attribute(&mut self, name: impl Into<Rc<str>>, value: impl Into<Rc<str>>) {
        self.0.borrow_mut().attributes.set(name, value);
        self.refresh_attribute_map();
    }

    /// Implementation of [`removeAttribute`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-6D6AC0F9) method.
    ///
    /// If no attribute with this name is found, this method has no effect.
    pub fn remove_attribute(&mut self, name: &str) {
        let removed = self.0.borrow_mut().attributes.remove(name);
        if removed.is_some() {
            self.refresh_attribute_map();
        }
    }

    /// Implementation of `hasAttribute` method.
    ///
    /// # Note
    /// An attribute whose value is empty is treated as absent.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.0
            .borrow()
            .attributes
            .get(name)
            .is_some_and(|value| !value.is_empty())
    }

    /// Implementation of [`getElementsByTagName`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1938918D) method.
    ///
    /// # Specification
    /// ```text
    /// Returns a NodeList of all descendant Elements with a given tag name,
    /// in document order.
    ///
    /// Parameters
    ///     name of type DOMString
    ///         The name of the tag to match on. The special value "*" matches all tags.
    ///
    /// Return Value
    ///     NodeList A list of matching Element nodes.
    /// ```
    pub fn get_elements_by_tag_name(&self, name: &str) -> FilteredSubtreeElementsList {
        FilteredSubtreeElementsList::new(self.clone().into(), name.into())
    }

    /// Implementation of `lookupNamespaceURI` method.
    ///
    /// Declarations are looked up on this element first, then on the ancestors.
    /// The `xml` and `xmlns` prefixes are always bound.
    pub fn lookup_namespace_uri(&self, prefix: &str) -> Option<Rc<str>> {
        match prefix {
            "xml" => Some(XML_XML_NAMESPACE.into()),
            "xmlns" => Some(XML_NS_NAMESPACE.into()),
            prefix => lookup_prefix_in_ancestors(Some(self.clone().into()), prefix),
        }
    }

    /// Generate [`ElementWeakRef`] from `self`.
    pub fn downgrade(&self) -> ElementWeakRef {
        ElementWeakRef(Rc::downgrade(&self.0))
    }

    /// Regenerate the [`NamedNodeMap`] if it has been materialized.
    fn refresh_attribute_map(&self) {
        let (map, entries) = {
            let elem = self.0.borrow();
            let Some(map) = elem.attribute_map.clone() else {
                return;
            };
            (map, elem.attributes.entries().to_vec())
        };
        map.rebuild(self, &entries);
    }
}

/// Search the prefix declarations of `start` and its ancestor elements for `prefix`.
fn lookup_prefix_in_ancestors(start: Option<NodeRef>, prefix: &str) -> Option<Rc<str>> {
    let mut node = start;
    while let Some(cur) = node {
        if let Some(elem) = cur.as_element() {
            let uri = elem
                .0
                .borrow()
                .ns_prefix_map
                .get(prefix)
                .filter(|uri| !uri.is_empty())
                .cloned();
            if uri.is_some() {
                return uri;
            }
        }
        node = cur.parent_node();
    }
    None
}

impl Node for ElementRef {
    fn node_name(&self) -> Rc<str> {
        self.tag_name()
    }

    fn node_value(&self) -> Option<Rc<str>> {
        None
    }

    fn node_type(&self) -> NodeType {
        NodeType::Element
    }

    fn attributes(&self) -> Option<NamedNodeMap> {
        let cached = self.0.borrow().attribute_map.clone();
        if cached.is_some() {
            return cached;
        }
        let map = NamedNodeMap::new();
        let entries = self.0.borrow().attributes.entries().to_vec();
        map.rebuild(self, &entries);
        self.0.borrow_mut().attribute_map = Some(map.clone());
        Some(map)
    }

    fn namespace_uri(&self) -> Option<Rc<str>> {
        self.0.borrow().namespace_uri.clone()
    }
}

/// Wrapper of `Weak<RefCell<Element>>`.
#[derive(Clone)]
pub struct ElementWeakRef(Weak<RefCell<Element>>);

impl ElementWeakRef {
    /// Generate [`ElementRef`] from `self`.
    /// Success conditions are the same as for [`std::rc::Weak::upgrade`].
    pub fn upgrade(&self) -> Option<ElementRef> {
        self.0.upgrade().map(ElementRef)
    }
}
