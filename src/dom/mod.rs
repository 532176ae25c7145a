//! A small subset of the [Document Object Model (DOM) Level 3 Core](https://www.w3.org/TR/DOM-Level-3-Core/).
//!
//! Only the node kinds produced by [`crate::parser`] are implemented: `Document`, `Element`,
//! `Attr`, `Text`, `Comment` and `DocumentType`.
//!
//! Every node handle is a reference-counted pointer, so cloning a handle never copies the node.
//! A node owns its children through strong references and points to its parent through a weak
//! reference.
//!
//! # Note
//! - Unlike the specification, no constraint on the combination of node kinds is checked when
//!   nodes are connected. Callers are responsible for building meaningful trees.
//! - The namespace URI of an element is resolved once, when the element is created.
//!   Changing `xmlns` attributes of ancestors afterwards does not affect it.

pub mod attr;
pub mod character_data;
pub mod document;
pub mod document_type;
pub mod element;
pub mod named_node_map;
pub mod node;
pub mod node_list;

use std::fmt;

/// This is the namespace for the special xml: prefix predefined in the
/// XML Namespace specification.
pub const XML_XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
pub const XML_NS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Implementation of [DOMException](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-17189187)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// Although named “Exception”,
/// it merely inherits its name from the specification and is in fact just an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DOMException {
    /// If index or size is negative, or greater than the allowed value.
    IndexSizeErr = 1,
    /// If the specified range of text does not fit into a DOMString.
    DOMStringSizeErr = 2,
    /// If any Node is inserted somewhere it doesn't belong.
    HierarchyRequestErr = 3,
    /// If a Node is used in a different document than the one that created it
    /// (that doesn't support it).
    WrongDocumentErr = 4,
    /// If an invalid or illegal character is specified, such as in an XML name.
    InvalidCharacterErr = 5,
    /// If data is specified for a Node which does not support data.
    NoDataAllowedErr = 6,
    /// If an attempt is made to modify an object where modifications are not allowed.
    NoModificationAllowedErr = 7,
    /// If an attempt is made to reference a Node in a context where it does not exist.
    NotFoundErr = 8,
    /// If the implementation does not support the requested type of object or operation.
    NotSupportedErr = 9,
    /// If an attempt is made to add an attribute that is already in use elsewhere.
    InuseAttributeErr = 10,
    /// If an attempt is made to use an object that is not, or is no longer, usable.
    InvalidStateErr = 11,
    /// If an invalid or illegal string is specified.
    SyntaxErr = 12,
    /// If an attempt is made to modify the type of the underlying object.
    InvalidModificationErr = 13,
    /// If an attempt is made to create or change an object in a way which is incorrect with
    /// regard to namespaces.
    NamespaceErr = 14,
    /// If a parameter or an operation is not supported by the underlying object.
    InvalidAccessErr = 15,
    /// If a call to a method such as insertBefore or removeChild would make the Node invalid
    /// with respect to "partial validity".
    ValidationErr = 16,
    /// If the type of an object is incompatible with the expected type of the parameter
    /// associated to the object.
    TypeMismatchErr = 17,
}

impl DOMException {
    const ALL: [DOMException; 17] = [
        DOMException::IndexSizeErr,
        DOMException::DOMStringSizeErr,
        DOMException::HierarchyRequestErr,
        DOMException::WrongDocumentErr,
        DOMException::InvalidCharacterErr,
        DOMException::NoDataAllowedErr,
        DOMException::NoModificationAllowedErr,
        DOMException::NotFoundErr,
        DOMException::NotSupportedErr,
        DOMException::InuseAttributeErr,
        DOMException::InvalidStateErr,
        DOMException::SyntaxErr,
        DOMException::InvalidModificationErr,
        DOMException::NamespaceErr,
        DOMException::InvalidAccessErr,
        DOMException::ValidationErr,
        DOMException::TypeMismatchErr,
    ];

    /// The numeric `code` of this exception, as defined by the specification.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// The symbolic name used by the specification, e.g. `NOT_FOUND_ERR`.
    pub fn name(self) -> &'static str {
        use DOMException::*;
        match self {
            IndexSizeErr => "INDEX_SIZE_ERR",
            DOMStringSizeErr => "DOMSTRING_SIZE_ERR",
            HierarchyRequestErr => "HIERARCHY_REQUEST_ERR",
            WrongDocumentErr => "WRONG_DOCUMENT_ERR",
            InvalidCharacterErr => "INVALID_CHARACTER_ERR",
            NoDataAllowedErr => "NO_DATA_ALLOWED_ERR",
            NoModificationAllowedErr => "NO_MODIFICATION_ALLOWED_ERR",
            NotFoundErr => "NOT_FOUND_ERR",
            NotSupportedErr => "NOT_SUPPORTED_ERR",
            InuseAttributeErr => "INUSE_ATTRIBUTE_ERR",
            InvalidStateErr => "INVALID_STATE_ERR",
            SyntaxErr => "SYNTAX_ERR",
            InvalidModificationErr => "INVALID_MODIFICATION_ERR",
            NamespaceErr => "NAMESPACE_ERR",
            InvalidAccessErr => "INVALID_ACCESS_ERR",
            ValidationErr => "VALIDATION_ERR",
            TypeMismatchErr => "TYPE_MISMATCH_ERR",
        }
    }
}

impl TryFrom<u16> for DOMException {
    type Error = anyhow::Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        DOMException::ALL
            .into_iter()
            .find(|e| e.code() == value)
            .ok_or_else(|| anyhow::anyhow!("Invalid convert from value '{value}' to DOMException"))
    }
}

impl fmt::Display for DOMException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl std::error::Error for DOMException {}

/// Constants `NodeType` in [Interface Node](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1950641247).
///
/// Only the kinds this crate can produce are listed,
/// but the discriminants follow the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}
