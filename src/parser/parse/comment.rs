use crate::{
    dom::{character_data::CommentRef, node::NodeRef},
    error::{XmlParseError, XmlParserErrors},
    parser::XmlParserCtxt,
};

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

impl XmlParserCtxt<'_> {
    /// Parse a comment `<!-- .... -->` if the content starts with it.
    ///
    /// The comment data is kept as written. `--` inside a comment is not rejected.
    ///
    /// ```text
    /// [15] Comment ::= '<!--' ((Char - '-') | ('-' (Char - '-')))* '-->'
    /// ```
    #[doc(alias = "xmlParseComment")]
    pub(crate) fn parse_comment(&mut self) -> Result<Option<NodeRef>, XmlParseError> {
        if !self.content_str().starts_with(COMMENT_START) {
            return Ok(None);
        }
        let start = self.cur + COMMENT_START.len();
        let Some(end) = self.find_from(start, COMMENT_END) else {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrCommentNotFinished,
                self.cur,
                "Comment not terminated",
            ));
        };
        let comment = CommentRef::new(&self.content[start..end]);
        tracing::trace!(offset = self.cur, "comment");
        self.cur = end + COMMENT_END.len();
        self.push_node(comment.into()).map(Some)
    }
}
