//! Provide error codes and the error type reported by the parser.
//!
//! The numeric values of [`XmlParserErrors`] follow the `xmlParserErrors` enumeration of
//! libxml2, so that codes stay comparable with other XML tooling.

use std::fmt;

macro_rules! impl_xml_parser_errors {
    ( $( $variant:ident = $code:literal ),* $(,)? ) => {
        /// Error codes the parser can report.
        #[repr(C)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum XmlParserErrors {
            $(
                $variant = $code
            ),*
        }

        impl TryFrom<i32> for XmlParserErrors {
            type Error = anyhow::Error;
            fn try_from(value: i32) -> Result<Self, Self::Error> {
                $(
                    if value == Self:: $variant as i32 {
                        return Ok(Self:: $variant);
                    }
                )*
                Err(anyhow::anyhow!("Invalid convert from value '{value}' to {}", std::any::type_name::<Self>()))
            }
        }

        impl Default for XmlParserErrors {
            fn default() -> Self {
                Self::XmlErrOK
            }
        }
    };
}

impl_xml_parser_errors!(
    XmlErrOK = 0,
    XmlErrInternalError = 1,
    XmlErrAttributeNotFinished = 40,
    XmlErrAttributeWithoutValue = 41,
    XmlErrCommentNotFinished = 45,
    XmlErrXMLDeclNotFinished = 57,
    XmlErrDoctypeNotFinished = 61,
    XmlErrNameRequired = 68,
    XmlErrGtRequired = 73,
    XmlErrTagNameMismatch = 76,
    XmlErrTagNotFinished = 77,
    XmlErrInvalidEncoding = 81,
    XmlErrNotWellBalanced = 85,
);

impl XmlParserErrors {
    pub fn is_ok(&self) -> bool {
        *self == Self::XmlErrOK
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

/// A fatal error raised while parsing.
///
/// The parser does not recover from errors, so receiving this value always means that no
/// document was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlParseError {
    code: XmlParserErrors,
    message: String,
    /// Byte offset in the source text where the error was detected.
    offset: usize,
    /// 1-based line number of `offset`.
    line: usize,
    /// 1-based column (in characters) of `offset`.
    column: usize,
}

impl XmlParseError {
    /// Create a new error detected at byte `offset` of `content`.
    pub(crate) fn new(
        code: XmlParserErrors,
        message: impl Into<String>,
        content: &str,
        offset: usize,
    ) -> Self {
        let offset = offset.min(content.len());
        let before = content.get(..offset).unwrap_or(content);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit_once('\n')
            .map_or(before, |(_, last)| last)
            .chars()
            .count()
            + 1;
        Self {
            code,
            message: message.into(),
            offset,
            line,
            column,
        }
    }

    pub fn code(&self) -> XmlParserErrors {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for XmlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {}, code {})",
            self.message, self.line, self.column, self.code as i32
        )
    }
}

impl std::error::Error for XmlParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_error_codes_round_trip_through_i32() {
        for code in [
            XmlParserErrors::XmlErrCommentNotFinished,
            XmlParserErrors::XmlErrTagNameMismatch,
            XmlParserErrors::XmlErrNotWellBalanced,
        ] {
            assert_eq!(XmlParserErrors::try_from(code as i32).unwrap(), code);
        }
        assert!(XmlParserErrors::try_from(9999).is_err());
        assert!(XmlParserErrors::default().is_ok());
    }

    #[test]
    fn error_position_is_reported_as_line_and_column() {
        let content = "<a>\n  <b>\n</a>";
        let offset = content.rfind("</a>").unwrap();
        let err = XmlParseError::new(
            XmlParserErrors::XmlErrTagNameMismatch,
            "Opening and ending tag mismatch: b and a",
            content,
            offset,
        );
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 1);
        assert_eq!(err.offset(), offset);
        assert_eq!(
            err.to_string(),
            "Opening and ending tag mismatch: b and a (line 3, column 1, code 76)"
        );
    }
}
