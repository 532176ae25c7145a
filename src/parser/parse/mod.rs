mod attribute;
mod comment;
mod dtd;
mod element;
mod xmldecl;

use crate::{
    dom::{
        NodeType,
        character_data::TextRef,
        node::{Node, NodeRef},
    },
    error::{XmlParseError, XmlParserErrors},
    parser::XmlParserCtxt,
};

impl XmlParserCtxt<'_> {
    /// Parse one node at the current position and return it.
    ///
    /// The following are tried in this order:
    /// 1. comment
    /// 2. document type declaration
    /// 3. end tag of the current element
    /// 4. start tag or empty-element tag
    /// 5. text
    ///
    /// Parsing a start tag continues into the content of the element, so the returned node
    /// is not necessarily the element itself.
    ///
    /// Return `Ok(None)` only when the whole content has been consumed.
    pub fn parse_one_node(&mut self) -> Result<Option<NodeRef>, XmlParseError> {
        if let Some(comment) = self.parse_comment()? {
            return Ok(Some(comment));
        }
        if let Some(doctype) = self.parse_doctype()? {
            return Ok(Some(doctype));
        }
        if let Some(elem) = self.parse_end_tag()? {
            return Ok(Some(elem));
        }
        if self.content_str().starts_with('<') {
            return self.parse_start_tag();
        }
        self.parse_char_data()
    }

    /// Parse text up to the next `<` or the end of the content.
    #[doc(alias = "xmlParseCharData")]
    fn parse_char_data(&mut self) -> Result<Option<NodeRef>, XmlParseError> {
        let rest = self.content_str();
        if rest.is_empty() {
            if self.current_node.node_type() == NodeType::Element {
                let name = self.current_node.node_name();
                return Err(self.xml_fatal_err(
                    XmlParserErrors::XmlErrTagNotFinished,
                    self.cur,
                    format!("Premature end of data in tag {name}"),
                ));
            }
            return Ok(None);
        }

        let len = rest.find('<').unwrap_or(rest.len());
        let text = TextRef::new(&rest[..len]);
        tracing::trace!(offset = self.cur, len, "text");
        self.advance(len);
        self.push_node(text.into()).map(Some)
    }
}
