use std::{
    cell::{Ref, RefMut},
    rc::Rc,
};

use super::{
    DOMException, NodeType,
    attr::{AttrRef, AttrWeakRef},
    character_data::{CharacterData, CommentRef, CommentWeakRef, TextRef, TextWeakRef},
    document::{DocumentRef, DocumentWeakRef},
    document_type::{DocumentTypeRef, DocumentTypeWeakRef},
    element::{ElementRef, ElementWeakRef},
    named_node_map::NamedNodeMap,
    node_list::ChildNodesList,
};

/// The tree links that every kind of node carries.
///
/// Children are owned, the parent is not.
#[derive(Default)]
pub(super) struct NodeLinks {
    pub(super) parent_node: Option<NodeWeakRef>,
    pub(super) children: Vec<NodeRef>,
}

impl NodeLinks {
    fn position(&self, node: &NodeRef) -> Option<usize> {
        self.children.iter().position(|child| child.is_same_node(node))
    }
}

/// Implementation of [Node](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1950641247)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// Actual node representations are implemented as `NodeRef` and `NodeWeakRef`.
#[allow(private_bounds)]
pub trait Node: NodeConnection {
    /// Implementation of `nodeName` attribute.
    fn node_name(&self) -> Rc<str>;
    /// Implementation of `nodeValue` attribute.
    fn node_value(&self) -> Option<Rc<str>>;
    /// Implementation of `nodeType` attribute.
    fn node_type(&self) -> NodeType;

    /// Implementation of `parentNode` attribute.
    fn parent_node(&self) -> Option<NodeRef> {
        self.links().parent_node.as_ref().and_then(|par| par.upgrade())
    }
    /// Implementation of `childNodes` attribute.
    ///
    /// The returned list is live.
    fn child_nodes(&self) -> ChildNodesList {
        ChildNodesList::new(self.clone().into())
    }
    /// Implementation of `firstChild` attribute.
    fn first_child(&self) -> Option<NodeRef> {
        self.links().children.first().cloned()
    }
    /// Implementation of `lastChild` attribute.
    fn last_child(&self) -> Option<NodeRef> {
        self.links().children.last().cloned()
    }
    /// Implementation of `previousSibling` attribute.
    ///
    /// This is found by scanning the children of the parent node.
    fn previous_sibling(&self) -> Option<NodeRef> {
        let par = self.parent_node()?;
        let links = par.links();
        let pos = links.position(&self.clone().into())?;
        pos.checked_sub(1)
            .and_then(|pos| links.children.get(pos))
            .cloned()
    }
    /// Implementation of `nextSibling` attribute.
    ///
    /// This is found by scanning the children of the parent node.
    fn next_sibling(&self) -> Option<NodeRef> {
        let par = self.parent_node()?;
        let links = par.links();
        let pos = links.position(&self.clone().into())?;
        links.children.get(pos + 1).cloned()
    }
    /// Implementation of `attributes` attribute.
    fn attributes(&self) -> Option<NamedNodeMap> {
        None
    }
    /// Implementation of `namespaceURI` attribute.
    ///
    /// Unless the node resolves its own namespace, the namespace of the parent node is
    /// returned.
    fn namespace_uri(&self) -> Option<Rc<str>> {
        self.parent_node()?.namespace_uri()
    }

    /// Implementation of [`removeChild`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1734834066) method.
    ///
    /// # Specification
    /// ```text
    /// Removes the child node indicated by oldChild from the list of children, and returns it.
    ///
    /// Parameters
    ///     oldChild of type Node
    ///         The node being removed.
    ///
    /// Return Value
    ///     Node The node removed.
    /// ```
    fn remove_child(&mut self, old_child: NodeRef) -> Result<NodeRef, DOMException> {
        // NOT_FOUND_ERR: Raised if oldChild is not a child of this node.
        let pos = self
            .links()
            .position(&old_child)
            .ok_or(DOMException::NotFoundErr)?;
        let removed = self.links_mut().children.remove(pos);
        removed.links_mut().parent_node = None;
        Ok(removed)
    }

    /// Implementation of [`appendChild`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-184E7107) method.
    ///
    /// If `new_child` already has a parent, it is first removed from it.
    ///
    /// # Note
    /// Combinations of node kinds are not checked.
    /// Only appending a node to itself or to one of its descendants is rejected.
    fn append_child(&mut self, new_child: NodeRef) -> Result<NodeRef, DOMException> {
        // HIERARCHY_REQUEST_ERR: Raised if (..snip..) the node to append is
        // one of this node's ancestors or this node itself.
        if self.is_same_node(&new_child) {
            return Err(DOMException::HierarchyRequestErr);
        }
        let mut par = self.parent_node();
        while let Some(cur) = par {
            if new_child.is_same_node(&cur) {
                return Err(DOMException::HierarchyRequestErr);
            }
            par = cur.parent_node();
        }

        if let Some(mut old_parent) = new_child.parent_node() {
            old_parent.remove_child(new_child.clone())?;
        }
        let slf: NodeRef = self.clone().into();
        new_child.links_mut().parent_node = Some(slf.downgrade());
        self.links_mut().children.push(new_child.clone());
        Ok(new_child)
    }

    /// Implementation of `hasChildNodes` method.
    fn has_child_nodes(&self) -> bool {
        !self.links().children.is_empty()
    }

    /// Implementation of `isSameNode` method.
    fn is_same_node(&self, other: &NodeRef) -> bool {
        std::ptr::eq(self.node_ptr(), other.node_ptr())
    }

    /// Implementation of `textContent` attribute.
    ///
    /// For nodes that have children, this is the concatenation of the text content of
    /// all child nodes, excluding comments.
    fn text_content(&self) -> Option<String> {
        let mut res = String::new();
        let children = self.links().children.clone();
        for child in children {
            match child {
                NodeRef::Comment(_) | NodeRef::DocumentType(_) => {}
                child => {
                    if let Some(text) = child.text_content() {
                        res.push_str(&text);
                    }
                }
            }
        }
        Some(res)
    }
}

/// Access to the link record of a node.
///
/// Borrows must be short-lived: nothing may call back into the same node while a returned
/// guard is alive.
pub(super) trait NodeConnection: Clone + Into<NodeRef> {
    fn links(&self) -> Ref<'_, NodeLinks>;
    fn links_mut(&self) -> RefMut<'_, NodeLinks>;
    /// Address of the shared node record, used for identity comparison.
    fn node_ptr(&self) -> *const ();
}

/// Implementation of [Node](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1950641247)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
#[derive(Clone)]
pub enum NodeRef {
    Element(ElementRef),
    Attribute(AttrRef),
    Text(TextRef),
    Comment(CommentRef),
    Document(DocumentRef),
    DocumentType(DocumentTypeRef),
}

impl NodeRef {
    /// Generate [`NodeWeakRef`] from `self`.
    pub fn downgrade(&self) -> NodeWeakRef {
        use NodeRef::*;
        match self {
            Element(node) => NodeWeakRef::Element(node.downgrade()),
            Attribute(node) => NodeWeakRef::Attribute(node.downgrade()),
            Text(node) => NodeWeakRef::Text(node.downgrade()),
            Comment(node) => NodeWeakRef::Comment(node.downgrade()),
            Document(node) => NodeWeakRef::Document(node.downgrade()),
            DocumentType(node) => NodeWeakRef::DocumentType(node.downgrade()),
        }
    }

    /// Return the character data if `self` is a text or comment node.
    pub fn data(&self) -> Option<Rc<str>> {
        match self {
            NodeRef::Text(text) => Some(text.data()),
            NodeRef::Comment(comment) => Some(comment.data()),
            _ => None,
        }
    }
}

macro_rules! impl_node_trait_to_noderef {
    (
        $(
            fn $( ($mut:tt) )? $fn:ident($( $arg_name:ident : $arg_type:ty ),*) -> $ret:ty
        ),*
    ) => {
        impl Node for NodeRef {
            $(
                fn $fn(& $( $mut )? self, $( $arg_name: $arg_type),* ) -> $ret {
                    match self {
                        NodeRef::Element(elem) => <ElementRef as Node>::$fn(elem, $( $arg_name ),* ),
                        NodeRef::Attribute(attr) => attr.$fn( $( $arg_name ),* ),
                        NodeRef::Text(text) => text.$fn( $( $arg_name ),* ),
                        NodeRef::Comment(comment) => comment.$fn( $( $arg_name ),* ),
                        NodeRef::Document(doc) => doc.$fn( $( $arg_name ),* ),
                        NodeRef::DocumentType(doctype) => doctype.$fn( $( $arg_name ),* ),
                    }
                }
            )*
        }
    };
}

impl_node_trait_to_noderef! {
    fn node_name() -> Rc<str>,
    fn node_value() -> Option<Rc<str>>,
    fn node_type() -> NodeType,
    fn attributes() -> Option<NamedNodeMap>,
    fn namespace_uri() -> Option<Rc<str>>,
    fn text_content() -> Option<String>
}

macro_rules! impl_node_connection_to_noderef {
    (
        $(
            $fn:ident() -> $ret:ty
        ),*
    ) => {
        impl NodeConnection for NodeRef {
            $(
                fn $fn(&self) -> $ret {
                    match self {
                        NodeRef::Element(elem) => elem.$fn(),
                        NodeRef::Attribute(attr) => attr.$fn(),
                        NodeRef::Text(text) => text.$fn(),
                        NodeRef::Comment(comment) => comment.$fn(),
                        NodeRef::Document(doc) => doc.$fn(),
                        NodeRef::DocumentType(doctype) => doctype.$fn(),
                    }
                }
            )*
        }
    };
}

impl_node_connection_to_noderef! {
    links() -> Ref<'_, NodeLinks>,
    links_mut() -> RefMut<'_, NodeLinks>,
    node_ptr() -> *const ()
}

/// Implement [`NodeConnection`] and the conversions into [`NodeRef`] for a typed node handle
/// whose shared record has a `links` field.
macro_rules! impl_node_connection {
    ( $( ( $t:ty, $var:ident ) ),* ) => {
        $(
            impl NodeConnection for $t {
                fn links(&self) -> Ref<'_, NodeLinks> {
                    Ref::map(self.0.borrow(), |node| &node.links)
                }
                fn links_mut(&self) -> RefMut<'_, NodeLinks> {
                    RefMut::map(self.0.borrow_mut(), |node| &mut node.links)
                }
                fn node_ptr(&self) -> *const () {
                    Rc::as_ptr(&self.0) as *const ()
                }
            }

            impl From<$t> for NodeRef {
                fn from(value: $t) -> Self {
                    NodeRef::$var(value)
                }
            }
        )*
    };
}

impl_node_connection! {
    ( ElementRef, Element ),
    ( AttrRef, Attribute ),
    ( TextRef, Text ),
    ( CommentRef, Comment ),
    ( DocumentRef, Document ),
    ( DocumentTypeRef, DocumentType )
}

macro_rules! impl_node_conversion {
    ( $( ( $fn:ident, $var:ident, $t:ty ) ),* ) => {
        impl NodeRef {
            $(
                pub fn $fn (&self) -> Option<$t> {
                    match self {
                        NodeRef:: $var (node) => Some(node.clone()),
                        _ => None
                    }
                }
            )*
        }
    };
}

impl_node_conversion! {
    ( as_element, Element, ElementRef ),
    ( as_attribute, Attribute, AttrRef ),
    ( as_text_node, Text, TextRef ),
    ( as_comment, Comment, CommentRef ),
    ( as_document, Document, DocumentRef ),
    ( as_document_type, DocumentType, DocumentTypeRef )
}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("node_type", &self.node_type())
            .field("node_name", &self.node_name())
            .finish()
    }
}

/// Implementation of [Node](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1950641247)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
#[derive(Clone)]
pub enum NodeWeakRef {
    Element(ElementWeakRef),
    Attribute(AttrWeakRef),
    Text(TextWeakRef),
    Comment(CommentWeakRef),
    Document(DocumentWeakRef),
    DocumentType(DocumentTypeWeakRef),
}

impl NodeWeakRef {
    /// Generate [`NodeRef`] from `self`.
    /// Success conditions are the same as for [`std::rc::Weak::upgrade`].
    pub fn upgrade(&self) -> Option<NodeRef> {
        match self {
            NodeWeakRef::Element(node) => node.upgrade().map(NodeRef::Element),
            NodeWeakRef::Attribute(node) => node.upgrade().map(NodeRef::Attribute),
            NodeWeakRef::Text(node) => node.upgrade().map(NodeRef::Text),
            NodeWeakRef::Comment(node) => node.upgrade().map(NodeRef::Comment),
            NodeWeakRef::Document(node) => node.upgrade().map(NodeRef::Document),
            NodeWeakRef::DocumentType(node) => node.upgrade().map(NodeRef::DocumentType),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node_list::NodeList;

    use super::*;

    fn sample() -> (DocumentRef, ElementRef, ElementRef, ElementRef) {
        let mut doc = DocumentRef::new();
        let mut root = doc.create_element("root");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        doc.append_child(root.clone().into()).unwrap();
        root.append_child(a.clone().into()).unwrap();
        root.append_child(b.clone().into()).unwrap();
        (doc, root, a, b)
    }

    #[test]
    fn append_child_sets_parent_and_order() {
        let (doc, root, a, b) = sample();
        assert!(root.parent_node().unwrap().is_same_node(&doc.clone().into()));
        assert!(a.parent_node().unwrap().is_same_node(&root.clone().into()));
        assert!(root.first_child().unwrap().is_same_node(&a.clone().into()));
        assert!(root.last_child().unwrap().is_same_node(&b.clone().into()));
        assert!(a.next_sibling().unwrap().is_same_node(&b.clone().into()));
        assert!(b.previous_sibling().unwrap().is_same_node(&a.clone().into()));
        assert!(a.previous_sibling().is_none());
        assert!(b.next_sibling().is_none());
        assert!(doc.previous_sibling().is_none());
    }

    #[test]
    fn append_child_moves_a_node_from_its_old_parent() {
        let (_doc, root, mut a, b) = sample();
        a.append_child(b.clone().into()).unwrap();
        assert_eq!(root.child_nodes().length(), 1);
        assert_eq!(a.child_nodes().length(), 1);
        assert!(b.parent_node().unwrap().is_same_node(&a.clone().into()));

        // appending an existing last child again keeps a single occurrence
        a.append_child(b.clone().into()).unwrap();
        assert_eq!(a.child_nodes().length(), 1);
    }

    #[test]
    fn append_child_rejects_cycles() {
        let (mut doc, root, mut a, _b) = sample();
        assert_eq!(
            a.append_child(root.clone().into()).unwrap_err(),
            DOMException::HierarchyRequestErr
        );
        assert_eq!(
            a.append_child(a.clone().into()).unwrap_err(),
            DOMException::HierarchyRequestErr
        );
        // node kinds are not checked, so a document can be put under a text node
        let mut text = doc.create_text_node("t");
        text.append_child(doc.clone().into()).unwrap();
        assert_eq!(
            doc.append_child(text.clone().into()).unwrap_err(),
            DOMException::HierarchyRequestErr
        );
        assert!(doc.parent_node().unwrap().is_same_node(&text.clone().into()));
        text.remove_child(doc.clone().into()).unwrap();
        // the tree is left as it was
        assert!(a.parent_node().unwrap().is_same_node(&root.clone().into()));
        assert_eq!(root.child_nodes().length(), 2);
        assert!(doc.append_child(text.clone().into()).is_ok());
    }

    #[test]
    fn remove_child_detaches_the_node() {
        let (_doc, mut root, a, b) = sample();
        let removed = root.remove_child(a.clone().into()).unwrap();
        assert!(removed.is_same_node(&a.clone().into()));
        assert!(a.parent_node().is_none());
        assert_eq!(root.child_nodes().length(), 1);
        assert!(root.first_child().unwrap().is_same_node(&b.clone().into()));

        assert_eq!(
            root.remove_child(a.clone().into()).unwrap_err(),
            DOMException::NotFoundErr
        );

        // a removed node can be attached again
        root.append_child(a.clone().into()).unwrap();
        assert!(root.last_child().unwrap().is_same_node(&a.into()));
    }

    #[test]
    fn child_nodes_is_live() {
        let (doc, mut root, a, _b) = sample();
        let children = root.child_nodes();
        assert_eq!(children.length(), 2);
        root.append_child(doc.create_comment("c").into()).unwrap();
        assert_eq!(children.length(), 3);
        root.remove_child(a.into()).unwrap();
        assert_eq!(children.length(), 2);
        assert_eq!(&*children.item(0).unwrap().node_name(), "b");
        assert_eq!(&*children.item(1).unwrap().node_name(), "#comment");
        assert!(children.item(2).is_none());
        assert!(root.has_child_nodes());
        assert!(!doc.create_element("x").has_child_nodes());
    }

    #[test]
    fn text_content_skips_comments() {
        let (doc, mut root, mut a, _b) = sample();
        a.append_child(doc.create_text_node("hello").into()).unwrap();
        root.append_child(doc.create_comment("ignored").into()).unwrap();
        root.append_child(doc.create_text_node(" world").into()).unwrap();
        assert_eq!(root.text_content().as_deref(), Some("hello world"));
        assert_eq!(doc.text_content(), None);
    }
}
