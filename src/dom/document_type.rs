use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::{
    NodeType,
    node::{Node, NodeLinks},
};

/// Implementation of [DocumentType](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-412266927)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// Only the name and the raw text of the declaration are kept.
/// Entity and notation declarations in the internal subset are not interpreted.
pub struct DocumentType {
    pub(super) links: NodeLinks,
    /// Implementation of `name` attribute.
    name: Rc<str>,
    /// The whole declaration as written, from `<!DOCTYPE` to the closing `>`.
    source: Rc<str>,
}

/// Wrapper of `Rc<RefCell<DocumentType>>`.
#[derive(Clone)]
pub struct DocumentTypeRef(pub(super) Rc<RefCell<DocumentType>>);

impl DocumentTypeRef {
    pub(crate) fn new(name: impl Into<Rc<str>>, source: impl Into<Rc<str>>) -> Self {
        Self(Rc::new(RefCell::new(DocumentType {
            links: NodeLinks::default(),
            name: name.into(),
            source: source.into(),
        })))
    }

    /// Implementation of `name` attribute.
    ///
    /// # Specification
    /// ```text
    /// name of type DOMString, readonly
    ///     The name of DTD; i.e., the name immediately following the DOCTYPE keyword.
    /// ```
    pub fn name(&self) -> Rc<str> {
        self.0.borrow().name.clone()
    }

    /// The raw declaration text.
    pub fn source(&self) -> Rc<str> {
        self.0.borrow().source.clone()
    }

    /// Generate [`DocumentTypeWeakRef`] from `self`.
    pub fn downgrade(&self) -> DocumentTypeWeakRef {
        DocumentTypeWeakRef(Rc::downgrade(&self.0))
    }
}

impl Node for DocumentTypeRef {
    fn node_name(&self) -> Rc<str> {
        self.name()
    }

    fn node_value(&self) -> Option<Rc<str>> {
        None
    }

    fn node_type(&self) -> NodeType {
        NodeType::DocumentType
    }

    fn text_content(&self) -> Option<String> {
        None
    }
}

/// Wrapper of `Weak<RefCell<DocumentType>>`.
#[derive(Clone)]
pub struct DocumentTypeWeakRef(Weak<RefCell<DocumentType>>);

impl DocumentTypeWeakRef {
    /// Generate [`DocumentTypeRef`] from `self`.
    /// Success conditions are the same as for [`std::rc::Weak::upgrade`].
    pub fn upgrade(&self) -> Option<DocumentTypeRef> {
        self.0.upgrade().map(DocumentTypeRef)
    }
}
