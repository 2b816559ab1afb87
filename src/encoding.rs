//! ASN.1 DER structures for signatures and folded key sets.
//!
//! The field order of both SEQUENCEs is normative: a verifier is bound
//! to the exact bytes, so encoding is bit-exact and decoding rejects
//! trailing data. Point coordinates, checksums and response scalars
//! travel as minimal big-endian OCTET STRINGs.

use alloc::{string::String, vec::Vec};
use der::{
    asn1::{ObjectIdentifier, OctetString},
    Decode, Encode, Reader, Sequence, SliceReader,
};

use crate::{
    error::{Error, Result},
    fold::FoldedKeys,
    signature::{KeyImage, Signature},
};

/// Output serialization format selector.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// Raw ASN.1 DER.
    #[default]
    Der,
    /// Armored text block.
    Pem,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct PointDer {
    x: OctetString,
    y: OctetString,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct SignatureDer {
    name: OctetString,
    version: u8,
    curve_oid: ObjectIdentifier,
    hasher_oid: ObjectIdentifier,
    key_image: PointDer,
    checksum: OctetString,
    responses: Vec<OctetString>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct FoldedKeysDer {
    name: OctetString,
    curve_oid: ObjectIdentifier,
    hasher_oid: ObjectIdentifier,
    digest: OctetString,
    keys: Vec<OctetString>,
}

fn octets(bytes: &[u8]) -> Result<OctetString> {
    OctetString::new(bytes).map_err(|_| Error::Asn1MarshalFailed)
}

/// Decodes a full DER structure, surfacing leftover bytes as their own
/// status.
fn decode_exact<'a, T: Decode<'a>>(bytes: &'a [u8]) -> Result<T> {
    let mut reader = SliceReader::new(bytes).map_err(|_| Error::Asn1UnmarshalFailed)?;
    let value = T::decode(&mut reader).map_err(|_| Error::Asn1UnmarshalFailed)?;
    if !reader.is_finished() {
        return Err(Error::UnexpectedRestOfSignature);
    }
    Ok(value)
}

pub(crate) fn signature_to_der(signature: &Signature) -> Result<Vec<u8>> {
    let raw = SignatureDer {
        name: octets(signature.name.as_bytes())?,
        version: signature.version,
        curve_oid: signature.curve_oid,
        hasher_oid: signature.hasher_oid,
        key_image: PointDer {
            x: octets(signature.key_image.x())?,
            y: octets(signature.key_image.y())?,
        },
        checksum: octets(&signature.checksum)?,
        responses: signature
            .responses
            .iter()
            .map(|response| octets(response))
            .collect::<Result<_>>()?,
    };
    raw.to_der().map_err(|_| Error::Asn1MarshalFailed)
}

pub(crate) fn signature_from_der(bytes: &[u8]) -> Result<Signature> {
    let raw: SignatureDer = decode_exact(bytes)?;
    Ok(Signature {
        name: String::from_utf8_lossy(raw.name.as_bytes()).into_owned(),
        version: raw.version,
        curve_oid: raw.curve_oid,
        hasher_oid: raw.hasher_oid,
        key_image: KeyImage::new(
            raw.key_image.x.as_bytes().to_vec(),
            raw.key_image.y.as_bytes().to_vec(),
        ),
        checksum: raw.checksum.as_bytes().to_vec(),
        responses: raw
            .responses
            .iter()
            .map(|response| response.as_bytes().to_vec())
            .collect(),
    })
}

pub(crate) fn folded_keys_to_der(folded: &FoldedKeys) -> Result<Vec<u8>> {
    let raw = FoldedKeysDer {
        name: octets(folded.name.as_bytes())?,
        curve_oid: folded.curve_oid,
        hasher_oid: folded.hasher_oid,
        digest: octets(&folded.digest)?,
        keys: folded
            .keys
            .iter()
            .map(|key| octets(key))
            .collect::<Result<_>>()?,
    };
    raw.to_der().map_err(|_| Error::Asn1MarshalFailed)
}

pub(crate) fn folded_keys_from_der(bytes: &[u8]) -> Result<FoldedKeys> {
    let raw: FoldedKeysDer = decode_exact(bytes)?;
    Ok(FoldedKeys {
        name: String::from_utf8_lossy(raw.name.as_bytes()).into_owned(),
        curve_oid: raw.curve_oid,
        hasher_oid: raw.hasher_oid,
        digest: raw.digest.as_bytes().to_vec(),
        keys: raw.keys.iter().map(|key| key.as_bytes().to_vec()).collect(),
    })
}

/// Groups a lowercase hex string into colon-separated octet pairs:
/// `c29da7` becomes `c2:9d:a7`.
pub fn format_digest(hex: &str) -> String {
    let mut out = String::with_capacity(hex.len() + hex.len() / 2);
    for (index, ch) in hex.chars().enumerate() {
        if index > 0 && index % 2 == 0 {
            out.push(':');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_digest;

    #[test]
    fn digest_grouping() {
        assert_eq!(format_digest(""), "");
        assert_eq!(format_digest("c2"), "c2");
        assert_eq!(format_digest("c29da7"), "c2:9d:a7");
    }
}
