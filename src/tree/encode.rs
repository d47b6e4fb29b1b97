//! Character encodings for markup coming in and bytes going out.

use chardetng::EncodingDetector;
use encoding_rs::{EncoderResult, Encoding, UTF_8, UTF_16BE, UTF_16LE};
use tracing::debug;

use super::{Node, RenderOptions};
use crate::error::SoupError;

/// What to do with a character the target encoding cannot represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodeErrors {
    /// Fail with [`SoupError::Encoding`].
    Strict,
    /// Substitute a numeric character reference such as `&#9731;`.
    #[default]
    XmlCharRefReplace,
    /// Substitute `?`.
    Replace,
    /// Drop the character.
    Ignore,
}

impl EncodeErrors {
    /// Parses a strategy from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "xmlcharrefreplace" => Some(Self::XmlCharRefReplace),
            "replace" => Some(Self::Replace),
            "ignore" => Some(Self::Ignore),
            _ => None,
        }
    }
}

/// Labels encoded as a plain code-point range. The WHATWG label table
/// folds all of these onto windows-1252, which would let `é` through an
/// `ascii` encoder as a raw byte.
fn code_point_range(label: &str) -> Option<(&'static str, u8)> {
    match label {
        "ascii" | "us-ascii" | "ansi_x3.4-1968" | "646" => Some(("ascii", 0x7F)),
        "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" | "l1" => Some(("latin-1", 0xFF)),
        _ => None,
    }
}

fn unmappable(
    character: char,
    encoding: &'static str,
    errors: EncodeErrors,
    bytes: &mut Vec<u8>,
) -> Result<(), SoupError> {
    debug!(encoding, ?character, ?errors, "unmappable character");
    match errors {
        EncodeErrors::Strict => {
            return Err(SoupError::Encoding {
                encoding,
                character,
            });
        }
        EncodeErrors::XmlCharRefReplace => {
            bytes.extend_from_slice(format!("&#{};", u32::from(character)).as_bytes());
        }
        EncodeErrors::Replace => bytes.push(b'?'),
        EncodeErrors::Ignore => {}
    }
    Ok(())
}

fn encode_range(
    text: &str,
    encoding: &'static str,
    highest: u8,
    errors: EncodeErrors,
) -> Result<Vec<u8>, SoupError> {
    let mut bytes = Vec::with_capacity(text.len());
    for character in text.chars() {
        match u8::try_from(u32::from(character)) {
            Ok(byte) if byte <= highest => bytes.push(byte),
            _ => unmappable(character, encoding, errors, &mut bytes)?,
        }
    }
    Ok(bytes)
}

/// Encodes text into the encoding registered under `label`.
///
/// `ascii` and `latin1` (with their aliases) are the 7-bit and 8-bit
/// code-point ranges. Every other label is resolved the way browsers
/// resolve it, through `encoding_rs`.
///
/// # Errors
///
/// Returns [`SoupError::UnknownEncoding`] for an unrecognised label or one
/// with no encoder of its own (such as `iso-2022-kr`), and
/// [`SoupError::Encoding`] for an unmappable character under
/// [`EncodeErrors::Strict`].
///
/// # Examples
///
/// ```rust
/// use composable_soup::tree::{EncodeErrors, encode_text};
///
/// let bytes = encode_text("café ☃", "ascii", EncodeErrors::XmlCharRefReplace).unwrap();
/// assert_eq!(bytes, b"caf&#233; &#9731;");
/// ```
pub fn encode_text(text: &str, label: &str, errors: EncodeErrors) -> Result<Vec<u8>, SoupError> {
    let normalized = label.trim().to_ascii_lowercase();
    if let Some((name, highest)) = code_point_range(&normalized) {
        return encode_range(text, name, highest, errors);
    }

    let encoding = Encoding::for_label(normalized.as_bytes())
        .ok_or_else(|| SoupError::UnknownEncoding(label.to_owned()))?;

    if encoding == UTF_8 {
        return Ok(text.as_bytes().to_vec());
    }
    if encoding == UTF_16LE {
        return Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }
    // `replacement` and friends would silently fall back to UTF-8
    if encoding.output_encoding() != encoding {
        debug!(label, encoding = encoding.name(), "label has no encoder");
        return Err(SoupError::UnknownEncoding(label.to_owned()));
    }

    let mut encoder = encoding.new_encoder();
    let mut bytes = Vec::with_capacity(text.len());
    let mut remaining = text;

    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(remaining.len())
            .unwrap_or(remaining.len() * 4);
        bytes.reserve(needed);

        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut bytes, true);
        remaining = &remaining[read..];

        match result {
            EncoderResult::InputEmpty => return Ok(bytes),
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(character) => {
                unmappable(character, encoding.name(), errors, &mut bytes)?;
            }
        }
    }
}

/// Decodes raw markup bytes into text.
///
/// An explicit `label` wins. Without one, a byte-order mark decides, and
/// failing that the encoding is guessed from the content. Malformed
/// sequences become U+FFFD.
///
/// # Errors
///
/// Returns [`SoupError::UnknownEncoding`] for an unrecognised label.
pub fn decode_markup(bytes: &[u8], label: Option<&str>) -> Result<String, SoupError> {
    let encoding = match label {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SoupError::UnknownEncoding(label.to_owned()))?,
        None => match Encoding::for_bom(bytes) {
            Some((encoding, _)) => encoding,
            None => {
                let mut detector = EncodingDetector::new();
                detector.feed(bytes, true);
                detector.guess(None, true)
            }
        },
    };

    let (decoded, used, malformed) = encoding.decode(bytes);
    if malformed {
        debug!(encoding = used.name(), "malformed input replaced while decoding markup");
    }
    Ok(decoded.into_owned())
}

impl Node {
    /// [`Node::decode`] followed by [`encode_text`].
    ///
    /// # Errors
    ///
    /// See [`encode_text`].
    pub fn encode(
        &self,
        options: &RenderOptions,
        encoding: &str,
        errors: EncodeErrors,
    ) -> Result<Vec<u8>, SoupError> {
        encode_text(&self.decode(options), encoding, errors)
    }

    /// [`Node::decode_contents`] followed by [`encode_text`].
    ///
    /// # Errors
    ///
    /// See [`encode_text`].
    pub fn encode_contents(
        &self,
        options: &RenderOptions,
        encoding: &str,
        errors: EncodeErrors,
    ) -> Result<Vec<u8>, SoupError> {
        encode_text(&self.decode_contents(options), encoding, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EncodeErrors::XmlCharRefReplace, b"a&#9731;b".to_vec())]
    #[case(EncodeErrors::Replace, b"a?b".to_vec())]
    #[case(EncodeErrors::Ignore, b"ab".to_vec())]
    fn unmappable_characters(#[case] errors: EncodeErrors, #[case] expected: Vec<u8>) {
        assert_eq!(encode_text("a☃b", "ascii", errors), Ok(expected));
    }

    #[rstest]
    #[case("ascii", "ascii", 'é')]
    #[case("latin1", "latin-1", '☃')]
    #[case("windows-1252", "windows-1252", '☃')]
    fn strict_reports_the_character(
        #[case] label: &str,
        #[case] encoding: &'static str,
        #[case] character: char,
    ) {
        assert_eq!(
            encode_text("café ☃", label, EncodeErrors::Strict),
            Err(SoupError::Encoding {
                encoding,
                character,
            })
        );
    }

    #[rstest]
    #[case("ascii", b"caf&#233;".to_vec())]
    #[case("US-ASCII", b"caf&#233;".to_vec())]
    #[case("latin1", b"caf\xe9".to_vec())]
    fn ascii_is_seven_bit(#[case] label: &str, #[case] expected: Vec<u8>) {
        assert_eq!(
            encode_text("café", label, EncodeErrors::XmlCharRefReplace),
            Ok(expected)
        );
    }

    #[rstest]
    fn latin1_is_not_windows_1252() {
        assert_eq!(
            encode_text("€", "latin1", EncodeErrors::XmlCharRefReplace),
            Ok(b"&#8364;".to_vec())
        );
        assert_eq!(
            encode_text("€", "windows-1252", EncodeErrors::Strict),
            Ok(vec![0x80])
        );
    }

    #[rstest]
    #[case("iso-2022-kr")]
    #[case("replacement")]
    fn labels_without_an_encoder_are_rejected(#[case] label: &str) {
        assert_eq!(
            encode_text("x", label, EncodeErrors::Strict),
            Err(SoupError::UnknownEncoding(label.to_owned()))
        );
    }

    #[rstest]
    fn mappable_characters_use_the_target_bytes() {
        assert_eq!(
            encode_text("café", "latin1", EncodeErrors::Strict),
            Ok(vec![b'c', b'a', b'f', 0xE9])
        );
    }

    #[rstest]
    #[case("utf-8", "é".as_bytes().to_vec())]
    #[case("utf-16le", vec![0xE9, 0x00])]
    #[case("utf-16be", vec![0x00, 0xE9])]
    fn unicode_encodings(#[case] label: &str, #[case] expected: Vec<u8>) {
        assert_eq!(encode_text("é", label, EncodeErrors::Strict), Ok(expected));
    }

    #[rstest]
    fn unknown_labels_are_rejected() {
        assert_eq!(
            encode_text("x", "klingon", EncodeErrors::Strict),
            Err(SoupError::UnknownEncoding("klingon".to_owned()))
        );
    }

    #[rstest]
    fn markup_bytes_decode_by_label_or_bom() {
        assert_eq!(
            decode_markup(&[b'<', b'p', b'>', 0xE9], Some("latin1")),
            Ok("<p>é".to_owned())
        );
        assert_eq!(
            decode_markup(&[0xEF, 0xBB, 0xBF, b'h', b'i'], None),
            Ok("hi".to_owned())
        );
        assert!(decode_markup(b"x", Some("klingon")).is_err());
    }

    #[rstest]
    fn node_encoding_renders_first() {
        let document = Node::parse_fragment("<p>☃</p>");

        assert_eq!(
            document.encode_contents(&RenderOptions::default(), "ascii", EncodeErrors::default()),
            Ok(b"<p>&#9731;</p>".to_vec())
        );
    }
}
