use crate::{
    dom::{
        document::DocumentRef,
        node::{Node, NodeRef},
    },
    error::{XmlParseError, XmlParserErrors},
};

use super::XML_PARSER_MAX_DEPTH;

/// The parser context.
///
/// A context reads one source text and builds one document.
/// The tree under construction is reachable through `current_node`, which is the document
/// itself at the top level and the innermost open element otherwise.
pub struct XmlParserCtxt<'a> {
    /// The whole source text.
    pub(crate) content: &'a str,
    /// Byte offset of the next unread character.
    pub(crate) cur: usize,
    /// The document being built.
    pub(crate) doc: DocumentRef,
    /// The node that receives parsed children.
    pub(crate) current_node: NodeRef,
    /// The number of currently open elements.
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

impl<'a> XmlParserCtxt<'a> {
    /// Create a new context for `content`.
    pub fn new(content: &'a str) -> Self {
        let doc = DocumentRef::new();
        Self {
            content,
            cur: 0,
            current_node: doc.clone().into(),
            doc,
            depth: 0,
            max_depth: XML_PARSER_MAX_DEPTH,
        }
    }

    /// Change the maximum nesting depth of elements.
    ///
    /// A document nesting deeper than this fails with
    /// [`XmlParserErrors::XmlErrInternalError`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole content and return the built document.
    ///
    /// Any error aborts the parse. No partial document is returned.
    pub fn parse(mut self) -> Result<DocumentRef, XmlParseError> {
        tracing::debug!(len = self.content.len(), "start parsing document");
        self.parse_xmldecl()?;
        self.skip_blanks();
        let mut nodes = 0usize;
        while self.parse_one_node()?.is_some() {
            nodes += 1;
        }
        tracing::debug!(nodes, "finish parsing document");
        Ok(self.doc)
    }

    /// The document being built.
    pub fn document(&self) -> DocumentRef {
        self.doc.clone()
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.cur
    }

    /// The unread part of the content.
    pub(crate) fn content_str(&self) -> &'a str {
        &self.content[self.cur..]
    }

    /// Search `pat` in the content from the byte offset `from`.
    /// The returned position is an absolute byte offset.
    pub(crate) fn find_from(&self, from: usize, pat: &str) -> Option<usize> {
        self.content
            .get(from..)
            .and_then(|rest| rest.find(pat))
            .map(|pos| pos + from)
    }

    pub(crate) fn advance(&mut self, nth: usize) {
        self.cur = (self.cur + nth).min(self.content.len());
    }

    /// Skip blank characters and return the number of skipped bytes.
    pub(crate) fn skip_blanks(&mut self) -> usize {
        let rest = self.content_str();
        let skipped = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
        self.cur += skipped;
        skipped
    }

    /// Append `node` to the current node.
    pub(crate) fn push_node(&mut self, node: NodeRef) -> Result<NodeRef, XmlParseError> {
        let offset = self.cur;
        self.current_node.append_child(node).map_err(|err| {
            self.xml_fatal_err(
                XmlParserErrors::XmlErrInternalError,
                offset,
                format!("failed to append a parsed node: {err}"),
            )
        })
    }

    /// Build the error for a fatal problem detected at `offset`.
    pub(crate) fn xml_fatal_err(
        &self,
        code: XmlParserErrors,
        offset: usize,
        msg: impl Into<String>,
    ) -> XmlParseError {
        let err = XmlParseError::new(code, msg, self.content, offset);
        tracing::debug!(
            code = code as i32,
            line = err.line(),
            column = err.column(),
            "{}",
            err.message()
        );
        err
    }
}
