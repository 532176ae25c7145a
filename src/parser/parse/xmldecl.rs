use crate::{
    error::{XmlParseError, XmlParserErrors},
    parser::XmlParserCtxt,
};

const XMLDECL_START: &str = "<?xml";
const XMLDECL_END: &str = "?>";

impl XmlParserCtxt<'_> {
    /// Skip a byte order mark, leading blanks and the XML declaration if present.
    ///
    /// The declaration is not interpreted, so its version, encoding and standalone
    /// pseudo-attributes are ignored.
    ///
    /// Return `true` if the declaration was found.
    ///
    /// ```text
    /// [23] XMLDecl ::= '<?xml' VersionInfo EncodingDecl? SDDecl? S? '?>'
    /// ```
    #[doc(alias = "xmlParseXMLDecl")]
    pub(crate) fn parse_xmldecl(&mut self) -> Result<bool, XmlParseError> {
        if self.content_str().starts_with('\u{FEFF}') {
            self.advance('\u{FEFF}'.len_utf8());
        }
        self.skip_blanks();

        let rest = self.content_str();
        if !rest.starts_with(XMLDECL_START)
            || !rest[XMLDECL_START.len()..].starts_with(|c: char| c.is_ascii_whitespace())
        {
            return Ok(false);
        }
        let Some(end) = self.find_from(self.cur + XMLDECL_START.len(), XMLDECL_END) else {
            return Err(self.xml_fatal_err(
                XmlParserErrors::XmlErrXMLDeclNotFinished,
                self.cur,
                "parsing XML declaration: '?>' expected",
            ));
        };
        tracing::trace!(offset = self.cur, "XML declaration");
        self.cur = end + XMLDECL_END.len();
        Ok(true)
    }
}
