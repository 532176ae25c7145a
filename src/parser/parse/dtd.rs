use crate::{
    dom::{
        NodeType,
        document_type::DocumentTypeRef,
        node::{Node, NodeRef},
    },
    error::{XmlParseError, XmlParserErrors},
    parser::XmlParserCtxt,
};

const DOCTYPE_START: &str = "<!DOCTYPE";

impl XmlParserCtxt<'_> {
    /// Parse a document type declaration if the content starts with it.
    ///
    /// Only the name is extracted. An internal subset enclosed in `[...]` is skipped
    /// as a whole, so a `>` inside of it does not end the declaration.
    ///
    /// A declaration is accepted anywhere at the top level of the document,
    /// but not inside of an element.
    ///
    /// ```text
    /// [28] doctypedecl ::= '<!DOCTYPE' S Name (S ExternalID)? S? ('[' intSubset ']' S?)? '>'
    /// ```
    #[doc(alias = "xmlParseDocTypeDecl")]
    pub(crate) fn parse_doctype(&mut self) -> Result<Option<NodeRef>, XmlParseError> {
        let rest = self.content_str();
        if !rest.starts_with(DOCTYPE_START)
            || !rest[DOCTYPE_START.len()..].starts_with(|c: char| c.is_ascii_whitespace())
        {
            return Ok(None);
        }
        let start = self.cur;
        if self.current_node.node_type() != NodeType::Document {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrNotWellBalanced,
                start,
                "DOCTYPE is not allowed inside of an element",
            ));
        }

        let head = start + DOCTYPE_START.len();
        let not_finished = |ctxt: &Self| {
            ctxt.xml_fatal_err(
                XmlParserErrors::XmlErrDoctypeNotFinished,
                start,
                "DOCTYPE improperly terminated",
            )
        };
        let mut search_from = head;
        let gt = self.find_from(head, ">");
        if let Some(lbracket) = self
            .find_from(head, "[")
            .filter(|&lbracket| gt.is_none_or(|gt| lbracket < gt))
        {
            let Some(rbracket) = self.find_from(lbracket + 1, "]") else {
                return Err(not_finished(self));
            };
            search_from = rbracket + 1;
        }
        let Some(end) = self.find_from(search_from, ">") else {
            return Err(not_finished(self));
        };

        let name = self.content[head..end]
            .trim_start()
            .split(|c: char| c.is_ascii_whitespace() || c == '[')
            .next()
            .unwrap_or_default();
        if name.is_empty() {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrNameRequired,
                head,
                "xmlParseDocTypeDecl : no DOCTYPE name !",
            ));
        }
        tracing::debug!(offset = start, name, "document type declaration");
        let doctype = DocumentTypeRef::new(name, &self.content[start..=end]);
        self.cur = end + 1;
        self.push_node(doctype.into()).map(Some)
    }
}
