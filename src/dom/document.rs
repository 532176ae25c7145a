use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::{
    NodeType,
    character_data::{CommentRef, TextRef},
    document_type::DocumentTypeRef,
    element::ElementRef,
    named_node_map::AttributeTable,
    node::{Node, NodeLinks},
};

/// Implementation of [Document](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-i-Document)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// The document does not remember its document element or document type declaration.
/// Both are looked up from the children on each request.
#[derive(Default)]
pub struct Document {
    pub(super) links: NodeLinks,
}

/// Wrapper of `Rc<RefCell<Document>>`.
#[derive(Clone)]
pub struct DocumentRef(pub(super) Rc<RefCell<Document>>);

impl DocumentRef {
    /// Create new empty document.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Document::default())))
    }

    /// Implementation of `documentElement` attribute.
    ///
    /// This is the first child of the document that is an element.
    pub fn document_element(&self) -> Option<ElementRef> {
        self.0
            .borrow()
            .links
            .children
            .iter()
            .find_map(|child| child.as_element())
    }

    /// Implementation of `doctype` attribute.
    pub fn doctype(&self) -> Option<DocumentTypeRef> {
        self.0
            .borrow()
            .links
            .children
            .iter()
            .find_map(|child| child.as_document_type())
    }

    /// Implementation of [`createElement`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-2141741547) method.
    ///
    /// The returned element is not connected to any node.
    /// Because it has neither a parent nor `xmlns` attributes, it has no namespace.
    pub fn create_element(&self, tag_name: impl Into<Rc<str>>) -> ElementRef {
        ElementRef::with_attributes(tag_name, None, AttributeTable::default())
    }

    /// Implementation of [`createTextNode`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1975348127) method.
    pub fn create_text_node(&self, data: impl Into<Rc<str>>) -> TextRef {
        TextRef::new(data)
    }

    /// Implementation of [`createComment`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1334481328) method.
    pub fn create_comment(&self, data: impl Into<Rc<str>>) -> CommentRef {
        CommentRef::new(data)
    }

    /// Generate [`DocumentWeakRef`] from `self`.
    pub fn downgrade(&self) -> DocumentWeakRef {
        DocumentWeakRef(Rc::downgrade(&self.0))
    }
}

impl Default for DocumentRef {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRef")
            .field("document_element", &self.document_element().map(|elem| elem.tag_name()))
            .field("child_nodes", &self.0.borrow().links.children.len())
            .finish()
    }
}

impl Node for DocumentRef {
    fn node_name(&self) -> Rc<str> {
        "#document".into()
    }

    fn node_value(&self) -> Option<Rc<str>> {
        None
    }

    fn node_type(&self) -> NodeType {
        NodeType::Document
    }

    fn text_content(&self) -> Option<String> {
        None
    }
}

/// Wrapper of `Weak<RefCell<Document>>`.
#[derive(Clone)]
pub struct DocumentWeakRef(Weak<RefCell<Document>>);

impl DocumentWeakRef {
    /// Generate [`DocumentRef`] from `self`.
    /// Success conditions are the same as for [`std::rc::Weak::upgrade`].
    pub fn upgrade(&self) -> Option<DocumentRef> {
        self.0.upgrade().map(DocumentRef)
    }
}
