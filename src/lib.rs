//! A tiny DOM-style XML document model.
//!
//! The crate consists of three parts that work on the same tree:
//!
//! - [`dom`]: typed node handles (document, element, attribute, text, comment and
//!   document type) and the mutation primitives on them.
//! - [`parser`]: a small recursive-descent parser that builds a [`dom::document::DocumentRef`]
//!   from XML source text.
//! - [`save`]: a serializer that turns a tree back into text.
//!
//! [`strip`] is a consumer of the tree API that removes editor-specific namespaces from SVG
//! documents, and [`encoding`] turns UTF-8/UTF-16 byte input into the text the parser reads.
//!
//! ```
//! use tinydom::{dom::node::Node, parser::parse_document, save::serialize_to_string};
//!
//! let doc = parse_document(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1"/></svg>"#)?;
//! let root = doc.document_element().unwrap();
//! assert_eq!(root.namespace_uri().as_deref(), Some("http://www.w3.org/2000/svg"));
//! assert_eq!(
//!     serialize_to_string(&doc)?,
//!     r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1"/></svg>"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dom;
pub mod encoding;
pub mod error;
pub mod parser;
pub mod save;
pub mod strip;
