use crate::{
    dom::named_node_map::AttributeTable,
    error::{XmlParseError, XmlParserErrors},
    parser::XmlParserCtxt,
};

impl XmlParserCtxt<'_> {
    /// Parse the attributes between the tag name and the end of a start tag.
    ///
    /// `start` and `end` are absolute byte offsets of the region.
    /// Each attribute is `name=` followed by a value quoted with `'` or `"`.
    /// Whatever remains after the last attribute without an `=` is ignored.
    ///
    /// If the same name appears twice, the later value wins.
    ///
    /// ```text
    /// [41] Attribute ::= Name Eq AttValue
    /// ```
    #[doc(alias = "xmlParseAttribute")]
    pub(crate) fn parse_attributes(
        &self,
        start: usize,
        end: usize,
    ) -> Result<AttributeTable, XmlParseError> {
        let raw = &self.content[start..end];
        let region = raw.trim();
        let base = start + (raw.len() - raw.trim_start().len());

        let mut attributes = AttributeTable::new();
        let mut j = 0;
        while j < region.len() {
            let Some(eq) = region[j..].find('=').map(|pos| pos + j) else {
                break;
            };
            let name = region[j..eq].trim();
            if name.is_empty() {
                return Err(self.xml_fatal_err(
                    XmlParserErrors::XmlErrNameRequired,
                    base + j,
                    "error parsing attribute name",
                ));
            }

            let rest = &region[eq + 1..];
            let (quote, open) = match (rest.find('\''), rest.find('"')) {
                (Some(single), Some(double)) if single < double => ('\'', single),
                (Some(single), None) => ('\'', single),
                (_, Some(double)) => ('"', double),
                (None, None) => {
                    return Err(self.xml_fatal_err(
                        XmlParserErrors::XmlErrAttributeWithoutValue,
                        base + eq,
                        format!("Specification mandates value for attribute {name}"),
                    ));
                }
            };
            let Some(close) = rest[open + 1..].find(quote).map(|pos| pos + open + 1) else {
                return Err(self.xml_fatal_err(
                    XmlParserErrors::XmlErrAttributeNotFinished,
                    base + eq + 1 + open,
                    format!("AttValue: {quote} expected for attribute {name}"),
                ));
            };
            attributes.set(name, &rest[open + 1..close]);
            j = eq + 1 + close + 1;
        }
        Ok(attributes)
    }
}
