//! Ring signature artifact, its linkability tag and serialized forms.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use der::asn1::ObjectIdentifier;

use crate::{
    armor,
    encoding::{self, format_digest},
    error::{Error, Result},
    registry::{CurveId, HashId},
};

/// Version emitted into serialized signatures.
pub const SIGNATURE_VERSION: u8 = 1;

/// Fixed tag carried in the unauthenticated `name` fields.
pub(crate) const ORIGIN: &str = "lsag";

/// Linkability tag of a signature: the key image point coordinates in
/// minimal big-endian form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyImage {
    x: Vec<u8>,
    y: Vec<u8>,
}

impl KeyImage {
    /// Builds a key image from raw coordinate bytes.
    pub fn new(x: Vec<u8>, y: Vec<u8>) -> Self {
        Self { x, y }
    }

    /// Big-endian X coordinate.
    pub fn x(&self) -> &[u8] {
        &self.x
    }

    /// Big-endian Y coordinate.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// `X ‖ Y`, the user-visible linkability tag.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.x.clone();
        out.extend_from_slice(&self.y);
        out
    }

    /// Lowercase hex of the tag, optionally colon-grouped per octet.
    pub fn to_hex(&self, separator: bool) -> String {
        let hex = base16ct::lower::encode_string(&self.to_bytes());
        if separator {
            format_digest(&hex)
        } else {
            hex
        }
    }

    /// Indented four-line display used in armor headers.
    pub(crate) fn display_block(&self) -> String {
        let mut out = String::new();
        for half in [&self.x, &self.y] {
            let mid = half.len() / 2;
            for part in [&half[..mid], &half[mid..]] {
                out.push_str("\n  ");
                out.push_str(&format_digest(&base16ct::lower::encode_string(part)));
            }
        }
        out
    }
}

/// LSAG ring signature.
///
/// Carries the algorithm OIDs, the key image, the ring-closure checksum
/// and one response scalar per ring member. The `name` field is
/// informational and ignored by verification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub(crate) name: String,
    pub(crate) version: u8,
    pub(crate) curve_oid: ObjectIdentifier,
    pub(crate) hasher_oid: ObjectIdentifier,
    pub(crate) key_image: KeyImage,
    pub(crate) checksum: Vec<u8>,
    pub(crate) responses: Vec<Vec<u8>>,
}

impl Signature {
    /// Assembles a signature from its parts, with the fixed name and
    /// current version.
    pub fn new(
        curve_oid: ObjectIdentifier,
        hasher_oid: ObjectIdentifier,
        key_image: KeyImage,
        checksum: Vec<u8>,
        responses: Vec<Vec<u8>>,
    ) -> Self {
        let mut name = ORIGIN.to_string();
        name.push_str(" Signature");
        Self {
            name,
            version: SIGNATURE_VERSION,
            curve_oid,
            hasher_oid,
            key_image,
            checksum,
            responses,
        }
    }

    /// Informational name field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structure version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// OID of the signing curve.
    pub fn curve_oid(&self) -> &ObjectIdentifier {
        &self.curve_oid
    }

    /// OID of the hash function.
    pub fn hasher_oid(&self) -> &ObjectIdentifier {
        &self.hasher_oid
    }

    /// The linkability tag.
    pub fn key_image(&self) -> &KeyImage {
        &self.key_image
    }

    /// Ring-closure checksum `c₀`.
    pub fn checksum(&self) -> &[u8] {
        &self.checksum
    }

    /// Response scalars, one per ring member, in ring order.
    pub fn responses(&self) -> &[Vec<u8>] {
        &self.responses
    }

    /// Serializes to DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        encoding::signature_to_der(self)
    }

    /// Parses from DER, rejecting trailing bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        encoding::signature_from_der(bytes)
    }

    /// Serializes to an armored `RING SIGNATURE` block with display
    /// headers.
    pub fn to_pem(&self) -> Result<Vec<u8>> {
        let der = self.to_der()?;
        let curve_name = CurveId::by_oid(&self.curve_oid)
            .map(CurveId::name)
            .unwrap_or_default();
        let hasher_name = HashId::by_oid(&self.hasher_oid)
            .map(HashId::name)
            .unwrap_or_default();
        let headers = [
            ("CurveName", curve_name.to_string()),
            ("CurveOID", self.curve_oid.to_string()),
            ("HasherName", hasher_name.to_string()),
            ("HasherOID", self.hasher_oid.to_string()),
            ("KeyImage", self.key_image.display_block()),
            ("NumberOfKeys", self.responses.len().to_string()),
            ("Origin", ORIGIN.to_string()),
        ];
        Ok(armor::encode(armor::SIGNATURE_LABEL, &headers, &der))
    }

    /// Parses an armored `RING SIGNATURE` block.
    pub fn from_pem(content: &[u8]) -> Result<Self> {
        Self::from_der(&armor::decode(content, armor::SIGNATURE_LABEL)?)
    }

    /// Parses either serialized form. Armored input must carry the
    /// `RING SIGNATURE` label; any other armor label is rejected.
    pub fn parse(content: &[u8]) -> Result<Self> {
        if armor::contains_label(content, armor::SIGNATURE_LABEL) {
            Self::from_pem(content)
        } else if armor::looks_armored(content) {
            Err(Error::DecodePemFailure)
        } else {
            Self::from_der(content)
        }
    }
}

/// Extracts the key image of a serialized signature as lowercase hex,
/// optionally colon-grouped.
pub fn signature_key_image(content: &[u8], separator: bool) -> Result<String> {
    Ok(Signature::parse(content)?.key_image().to_hex(separator))
}
