use crate::{
    dom::{
        NodeType,
        element::ElementRef,
        node::{Node, NodeRef},
    },
    error::{XmlParseError, XmlParserErrors},
    parser::XmlParserCtxt,
};

impl XmlParserCtxt<'_> {
    /// Parse a start tag or an empty-element tag at the current position.
    ///
    /// The new element is appended to the current node.
    /// For an empty-element tag the element itself is returned.
    /// Otherwise the element becomes the current node and parsing continues into
    /// its content, returning whatever the first node of the content is.
    ///
    /// ```text
    /// [40] STag         ::= '<' Name (S Attribute)* S? '>'
    /// [44] EmptyElemTag ::= '<' Name (S Attribute)* S? '/>'
    /// ```
    #[doc(alias = "xmlParseStartTag")]
    pub(crate) fn parse_start_tag(&mut self) -> Result<Option<NodeRef>, XmlParseError> {
        let start = self.cur;
        let Some(gt) = self.find_from(start + 1, ">") else {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrGtRequired,
                start,
                "Couldn't find end of Start Tag",
            ));
        };
        // a `/>` before the first `>` can only end right at it
        let is_empty = self.content[start + 1..gt].ends_with('/');
        let end = if is_empty { gt - 1 } else { gt };

        let name_end = self.content[start + 1..end]
            .find(|c: char| c.is_ascii_whitespace())
            .map_or(end, |pos| pos + start + 1);
        let name = &self.content[start + 1..name_end];
        if name.is_empty() {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrNameRequired,
                start + 1,
                "StartTag: invalid element name",
            ));
        }
        let attributes = self.parse_attributes(name_end, end)?;

        if !is_empty && self.depth >= self.max_depth {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrInternalError,
                start,
                format!("Excessive depth in document: {}", self.max_depth),
            ));
        }

        let elem = ElementRef::with_attributes(name, Some(&self.current_node), attributes);
        tracing::trace!(offset = start, name, is_empty, "start tag");
        let node = self.push_node(elem.into())?;
        if is_empty {
            self.cur = end + 2;
            return Ok(Some(node));
        }

        self.cur = end + 1;
        self.depth += 1;
        self.current_node = node;
        self.parse_one_node()
    }

    /// Parse the end tag of the current element if the content starts with `</`.
    ///
    /// The name must be exactly the same as the tag name of the current element.
    /// On success, the closed element is returned and its parent becomes the current node.
    ///
    /// ```text
    /// [42] ETag ::= '</' Name S? '>'
    /// ```
    #[doc(alias = "xmlParseEndTag")]
    pub(crate) fn parse_end_tag(&mut self) -> Result<Option<NodeRef>, XmlParseError> {
        if !self.content_str().starts_with("</") {
            return Ok(None);
        }
        let start = self.cur;
        if self.current_node.node_type() != NodeType::Element {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrNotWellBalanced,
                start,
                "Extra content at the end of the document",
            ));
        }
        let Some(end) = self.find_from(start + 2, ">") else {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrGtRequired,
                start,
                "expected '>'",
            ));
        };

        let name = &self.content[start + 2..end];
        let expected = self.current_node.node_name();
        if name != &*expected {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrTagNameMismatch,
                start,
                format!("Opening and ending tag mismatch: {expected} and {name}"),
            ));
        }

        let elem = self.current_node.clone();
        let Some(parent) = elem.parent_node() else {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrInternalError,
                start,
                format!("element {expected} lost its parent"),
            ));
        };
        tracing::trace!(offset = start, name, "end tag");
        self.cur = end + 1;
        self.depth = self.depth.saturating_sub(1);
        self.current_node = parent;
        Ok(Some(elem))
    }
}
