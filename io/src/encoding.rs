//! Byte order mark handling.
//!
//! All parsers expect UTF-8.
//! Other encodings are reported as warnings, and parsing proceeds anyway.
use std::io::{self, BufRead};
use tessera_api::warning::WarningSink;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// The encoding announced by a byte order mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bom {
    None,
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl Bom {
    fn sniff(head: &[u8]) -> Bom {
        // UTF-32 LE must be tested before UTF-16 LE, which is a prefix of it
        if head.starts_with(UTF8_BOM) {
            Bom::Utf8
        } else if head.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
            Bom::Utf32Be
        } else if head.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
            Bom::Utf32Le
        } else if head.starts_with(&[0xFE, 0xFF]) {
            Bom::Utf16Be
        } else if head.starts_with(&[0xFF, 0xFE]) {
            Bom::Utf16Le
        } else {
            Bom::None
        }
    }

    fn len(&self) -> usize {
        match self {
            Bom::None => 0,
            Bom::Utf8 => 3,
            Bom::Utf16Be | Bom::Utf16Le => 2,
            Bom::Utf32Be | Bom::Utf32Le => 4,
        }
    }
}

/// Skip the byte order mark at the start of `input`, if any,
/// and warn if it announces anything else than UTF-8.
///
/// `input` should buffer at least four bytes per `fill_buf`;
/// a shorter head is checked as is.
pub fn check_encoding<R, W>(input: &mut R, warnings: &mut W) -> io::Result<Bom>
where
    R: BufRead + ?Sized,
    W: WarningSink + ?Sized,
{
    let head = input.fill_buf()?;
    let bom = Bom::sniff(head);
    if !matches!(bom, Bom::None | Bom::Utf8) {
        warnings.warn(&format!(
            "Input starts with a {:?} byte order mark, but UTF-8 is expected; parsing will proceed as UTF-8",
            bom
        ));
    }
    input.consume(bom.len());
    Ok(bom)
}

/// Decode `bytes` as UTF-8, replacing invalid sequences.
///
/// Returns the decoded string and whether any replacement occurred.
pub fn decode_lossy(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(txt) => (txt, false),
        Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Read;
    use test_case::test_case;

    #[test_case(b"\xEF\xBB\xBFabc", Bom::Utf8, "abc", 0; "utf8 bom")]
    #[test_case(b"abc", Bom::None, "abc", 0; "no bom")]
    #[test_case(b"\xFF\xFEa\x00", Bom::Utf16Le, "a\0", 1; "utf16le bom")]
    #[test_case(b"\xFE\xFF\x00a", Bom::Utf16Be, "\0a", 1; "utf16be bom")]
    fn bom(data: &[u8], expected: Bom, rest: &str, warning_count: usize) {
        let mut input = data;
        let mut warnings: Vec<String> = vec![];
        assert_eq!(check_encoding(&mut input, &mut warnings).unwrap(), expected);
        let mut txt = String::new();
        input.read_to_string(&mut txt).unwrap();
        assert_eq!(txt, rest);
        assert_eq!(warnings.len(), warning_count);
    }

    #[test]
    fn lossy() {
        assert_eq!(decode_lossy(b"abc".to_vec()), ("abc".into(), false));
        assert_eq!(decode_lossy(b"a\xFFc".to_vec()), ("a\u{FFFD}c".into(), true));
    }
}
