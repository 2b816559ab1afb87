//! Labeled text armor with informational headers.
//!
//! The framing follows the familiar PEM shape: a BEGIN/END line pair
//! around a base64 body, optionally preceded by `Key: value` display
//! headers. Headers are not authenticated; parsers rely on the DER body
//! alone and skip everything that carries a colon.

use alloc::{string::String, vec::Vec};
use base64ct::{Base64, Encoding};

use crate::error::{Error, Result};

pub(crate) const SIGNATURE_LABEL: &str = "RING SIGNATURE";
pub(crate) const FOLDED_KEYS_LABEL: &str = "FOLDED PUBLIC KEYS";
pub(crate) const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
pub(crate) const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

const LINE_WIDTH: usize = 64;

/// Whether `content` contains an armored block with the given label.
pub(crate) fn contains_label(content: &[u8], label: &str) -> bool {
    let needle = [b"-----BEGIN ".as_slice(), label.as_bytes()].concat();
    content.windows(needle.len()).any(|window| window == needle)
}

/// Whether `content` contains any armored block at all.
pub(crate) fn looks_armored(content: &[u8]) -> bool {
    let needle = b"-----BEGIN ";
    content
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}

/// Wraps `der` in an armored block carrying the given display headers.
pub(crate) fn encode(label: &str, headers: &[(&str, String)], der: &[u8]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("-----BEGIN ");
    out.push_str(label);
    out.push_str("-----\n");
    for (key, value) in headers {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    if !headers.is_empty() {
        out.push('\n');
    }
    let body = Base64::encode_string(der);
    let mut column = 0;
    for ch in body.chars() {
        if column == LINE_WIDTH {
            out.push('\n');
            column = 0;
        }
        out.push(ch);
        column += 1;
    }
    if column > 0 {
        out.push('\n');
    }
    out.push_str("-----END ");
    out.push_str(label);
    out.push_str("-----\n");
    out.into_bytes()
}

/// Extracts and decodes the base64 body of an armored block with the
/// given label.
pub(crate) fn decode(content: &[u8], label: &str) -> Result<Vec<u8>> {
    let text = core::str::from_utf8(content).map_err(|_| Error::DecodePemFailure)?;
    let mut begin = String::from("-----BEGIN ");
    begin.push_str(label);
    begin.push_str("-----");
    let mut end = String::from("-----END ");
    end.push_str(label);
    end.push_str("-----");

    let mut in_block = false;
    let mut in_body = false;
    let mut body = String::new();
    for line in text.lines() {
        let line = line.trim();
        if !in_block {
            if line == begin {
                in_block = true;
            }
            continue;
        }
        if line == end {
            return Base64::decode_vec(&body).map_err(|_| Error::DecodePemFailure);
        }
        if !in_body {
            // header lines and their continuations carry a colon
            if line.contains(':') || line.is_empty() {
                continue;
            }
            in_body = true;
        } else if line.contains(':') || line.is_empty() {
            return Err(Error::DecodePemFailure);
        }
        body.push_str(line);
    }
    Err(Error::DecodePemFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn round_trip_with_headers() {
        let headers = [("Origin", "lsag".to_string()), ("NumberOfKeys", "3".to_string())];
        let block = encode(SIGNATURE_LABEL, &headers, b"\x30\x03\x02\x01\x2a");
        assert!(contains_label(&block, SIGNATURE_LABEL));
        assert!(looks_armored(&block));
        assert_eq!(decode(&block, SIGNATURE_LABEL).unwrap(), b"\x30\x03\x02\x01\x2a");
    }

    #[test]
    fn round_trip_without_headers() {
        let payload = [0u8; 100];
        let block = encode(PUBLIC_KEY_LABEL, &[], &payload);
        assert_eq!(decode(&block, PUBLIC_KEY_LABEL).unwrap(), payload);
    }

    #[test]
    fn label_mismatch_is_rejected() {
        let block = encode(PUBLIC_KEY_LABEL, &[], b"abc");
        assert_eq!(
            decode(&block, SIGNATURE_LABEL),
            Err(Error::DecodePemFailure)
        );
        assert!(!contains_label(&block, SIGNATURE_LABEL));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(decode(b"not armored", SIGNATURE_LABEL), Err(Error::DecodePemFailure));
        assert_eq!(decode(&[0xff, 0xfe], SIGNATURE_LABEL), Err(Error::DecodePemFailure));
    }
}
