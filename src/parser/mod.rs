//! A small recursive-descent XML parser that builds a [`DocumentRef`].
//!
//! The parser recognizes comments, document type declarations, start tags, end tags,
//! empty-element tags and text. Everything else, such as processing instructions, CDATA
//! sections and references, is not interpreted: text is kept verbatim.
//!
//! Every malformed construct is fatal. When an error is returned no document is produced.
//!
//! ```
//! use tinydom::{dom::node::Node, parser::parse_document};
//!
//! let doc = parse_document("<a><b/>text</a>")?;
//! let root = doc.document_element().unwrap();
//! assert_eq!(&*root.tag_name(), "a");
//! assert_eq!(root.text_content().as_deref(), Some("text"));
//! # Ok::<(), tinydom::error::XmlParseError>(())
//! ```

mod context;
mod parse;

pub use context::*;

use crate::{dom::document::DocumentRef, error::XmlParseError};

/// The default maximum nesting depth of elements.
pub const XML_PARSER_MAX_DEPTH: usize = 256;

/// Parse `content` as an XML document.
///
/// This is the same as `XmlParserCtxt::new(content).parse()`.
pub fn parse_document(content: &str) -> Result<DocumentRef, XmlParseError> {
    XmlParserCtxt::new(content).parse()
}
