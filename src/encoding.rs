//! Detect the encoding of an input buffer and decode it to a string.
//!
//! Only UTF-8 and UTF-16 are supported. A document must be entirely in one encoding.

use std::str::from_utf8;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::{XmlParseError, XmlParserErrors};

/// Encodings that [`detect_encoding`] can report.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XmlCharEncoding {
    /// No encoding could be detected. The input is treated as UTF-8.
    #[default]
    None = 0,
    UTF8,
    UTF16LE,
    UTF16BE,
}

impl XmlCharEncoding {
    pub fn get_name(&self) -> Option<&'static str> {
        match *self {
            Self::UTF8 => Some("UTF-8"),
            Self::UTF16LE => Some("UTF-16LE"),
            Self::UTF16BE => Some("UTF-16BE"),
            Self::None => None,
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match *self {
            Self::UTF16LE => UTF_16LE,
            Self::UTF16BE => UTF_16BE,
            Self::UTF8 | Self::None => UTF_8,
        }
    }
}

/// Guess the encoding from the first bytes of `input`.
///
/// A byte order mark is checked first, then the byte pattern of `<?xml` or `<` in each
/// encoding.
pub fn detect_encoding(input: &[u8]) -> XmlCharEncoding {
    match input {
        // UTF-8 BOM
        [0xEF, 0xBB, 0xBF, ..] => XmlCharEncoding::UTF8,
        // UTF-16 BOM (BE)
        [0xFE, 0xFF, ..] => XmlCharEncoding::UTF16BE,
        // UTF-16 BOM (LE)
        [0xFF, 0xFE, ..] => XmlCharEncoding::UTF16LE,
        [0x3C, 0x3F, 0x78, 0x6D, ..] => XmlCharEncoding::UTF8,
        [0x3C, 0x00, 0x3F, 0x00, ..] => XmlCharEncoding::UTF16LE,
        [0x00, 0x3C, 0x00, 0x3F, ..] => XmlCharEncoding::UTF16BE,
        [0x3C, 0x00, ..] => XmlCharEncoding::UTF16LE,
        [0x00, 0x3C, ..] => XmlCharEncoding::UTF16BE,
        _ => XmlCharEncoding::None,
    }
}

/// Decode `input` to a string.
///
/// A byte order mark is removed. Malformed byte sequences are not replaced,
/// but reported as [`XmlParserErrors::XmlErrInvalidEncoding`].
pub fn decode(input: &[u8]) -> Result<String, XmlParseError> {
    let (encoding, bom_len) =
        Encoding::for_bom(input).unwrap_or_else(|| (detect_encoding(input).encoding(), 0));
    let body = &input[bom_len..];
    tracing::debug!(encoding = encoding.name(), len = input.len(), "decode input");

    if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(body) {
        return Ok(text.into_owned());
    }

    let msg = format!("Input is not proper {}, indicate encoding !", encoding.name());
    if encoding == UTF_8 {
        // report the position of the first broken sequence
        if let Err(err) = from_utf8(body) {
            let valid = from_utf8(&body[..err.valid_up_to()]).unwrap_or_default();
            return Err(XmlParseError::new(
                XmlParserErrors::XmlErrInvalidEncoding,
                msg,
                valid,
                valid.len(),
            ));
        }
    }
    Err(XmlParseError::new(
        XmlParserErrors::XmlErrInvalidEncoding,
        msg,
        "",
        0,
    ))
}
