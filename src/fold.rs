//! Ring builder: canonical ordering and folding of public key sets.
//!
//! A folded key set binds a curve, a hash, an exact key order and a
//! digest over the ordered per-key digests. Signing and verification
//! operate on the keys in the folded order; reordering the set
//! invalidates both signatures and key images.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use der::asn1::ObjectIdentifier;

use crate::{
    armor,
    curve::CurveOps,
    encoding::{self, format_digest, Format},
    error::{Error, Result},
    keys::{self, PublicKey},
    registry::{CurveId, HashId},
    signature::ORIGIN,
};

/// Ordering selector for [`fold_public_keys`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyOrder {
    /// Canonical order: sort by per-key digest, then re-sort by digests
    /// salted with the ring fingerprint. Independent of input order.
    Hashes,
    /// Keep the caller's order.
    Input,
}

impl KeyOrder {
    /// Maps an ordering selector string. Only the literal `hashes`
    /// selects the canonical order; every other value preserves the
    /// input order.
    pub fn from_selector(selector: &str) -> Self {
        if selector == "hashes" {
            Self::Hashes
        } else {
            Self::Input
        }
    }
}

/// Parsed folded-keys artifact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FoldedKeys {
    pub(crate) name: String,
    pub(crate) curve_oid: ObjectIdentifier,
    pub(crate) hasher_oid: ObjectIdentifier,
    pub(crate) digest: Vec<u8>,
    pub(crate) keys: Vec<Vec<u8>>,
}

impl FoldedKeys {
    /// Informational name field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OID of the shared curve.
    pub fn curve_oid(&self) -> &ObjectIdentifier {
        &self.curve_oid
    }

    /// OID of the hash the ordering and digest were built with.
    pub fn hasher_oid(&self) -> &ObjectIdentifier {
        &self.hasher_oid
    }

    /// Digest over the ordered per-key digests.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// SEC1-encoded member points in the bound order.
    pub fn keys(&self) -> &[Vec<u8>] {
        &self.keys
    }

    /// Serializes to DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        encoding::folded_keys_to_der(self)
    }

    /// Parses from DER, rejecting trailing bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        encoding::folded_keys_from_der(bytes)
    }

    /// Serializes to an armored `FOLDED PUBLIC KEYS` block with display
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
            (
                "Digest",
                format_digest(&base16ct::lower::encode_string(&self.digest)),
            ),
            ("HasherName", hasher_name.to_string()),
            ("HasherOID", self.hasher_oid.to_string()),
            ("NumberOfKeys", self.keys.len().to_string()),
            ("Origin", ORIGIN.to_string()),
        ];
        Ok(armor::encode(armor::FOLDED_KEYS_LABEL, &headers, &der))
    }

    /// Parses an armored `FOLDED PUBLIC KEYS` block.
    pub fn from_pem(content: &[u8]) -> Result<Self> {
        Self::from_der(&armor::decode(content, armor::FOLDED_KEYS_LABEL)?)
    }

    /// Parses either serialized form. Armored input must carry the
    /// `FOLDED PUBLIC KEYS` label; any other armor label is rejected.
    pub fn parse(content: &[u8]) -> Result<Self> {
        if armor::contains_label(content, armor::FOLDED_KEYS_LABEL) {
            Self::from_pem(content)
        } else if armor::looks_armored(content) {
            Err(Error::DecodePemFailure)
        } else {
            Self::from_der(content)
        }
    }
}

struct RingKey {
    digest_hex: String,
    key: PublicKey,
}

fn joined_digests(ring: &[RingKey]) -> Vec<u8> {
    let mut out = Vec::new();
    for member in ring {
        out.extend_from_slice(member.digest_hex.as_bytes());
        out.push(b'\n');
    }
    out
}

/// Folds serialized public keys into the canonical bound artifact.
///
/// Every key must parse as a SubjectPublicKeyInfo (DER or armored) and
/// all keys must share one curve.
pub fn fold_public_keys<K: AsRef<[u8]>>(
    members: &[K],
    hash_name: &str,
    format: Format,
    order: KeyOrder,
) -> Result<Vec<u8>> {
    let hash = HashId::by_name(hash_name)?;
    if members.is_empty() {
        return Err(Error::InsufficientPublicKeys);
    }

    let mut ring = Vec::with_capacity(members.len());
    for blob in members {
        let key = keys::parse_public_key(blob.as_ref())?;
        let digest_hex = base16ct::lower::encode_string(&hash.digest(&key.coordinates_bytes()));
        ring.push(RingKey { digest_hex, key });
    }

    if order == KeyOrder::Hashes {
        ring.sort_by(|a, b| a.digest_hex.cmp(&b.digest_hex));
        // Re-key with the ring fingerprint as salt and sort once more,
        // so the final order also depends on the whole set.
        let salt = base16ct::lower::encode_string(&hash.digest(&joined_digests(&ring)));
        let mut salted: Vec<(String, RingKey)> = ring
            .into_iter()
            .map(|member| {
                let mut keyed = salt.clone();
                keyed.push_str(&member.digest_hex);
                (
                    base16ct::lower::encode_string(&hash.digest(keyed.as_bytes())),
                    member,
                )
            })
            .collect();
        salted.sort_by(|a, b| a.0.cmp(&b.0));
        ring = salted.into_iter().map(|(_, member)| member).collect();
    }
    let ring_digest = hash.digest(&joined_digests(&ring));

    let curve = ring[0].key.curve();
    if ring.iter().any(|member| member.key.curve() != curve) {
        return Err(Error::UnexpectedCurveType);
    }

    let ops = CurveOps::new(curve);
    let compress = curve.compress_points();
    let mut encoded = Vec::with_capacity(ring.len());
    for member in &ring {
        encoded.push(ops.encode_point(member.key.point(), compress)?);
    }

    let mut name = ORIGIN.to_string();
    name.push_str(" Public keys");
    let folded = FoldedKeys {
        name,
        curve_oid: curve.oid(),
        hasher_oid: hash.oid(),
        digest: ring_digest,
        keys: encoded,
    };
    match format {
        Format::Pem => folded.to_pem(),
        Format::Der => folded.to_der(),
    }
}

/// Parses a folded artifact and restores the validated member keys in
/// their bound order.
pub fn unfold_public_keys(content: &[u8]) -> Result<(Vec<PublicKey>, FoldedKeys)> {
    let folded = FoldedKeys::parse(content)?;
    let curve = CurveId::by_oid(&folded.curve_oid)?;
    let ops = CurveOps::new(curve);
    let mut members = Vec::with_capacity(folded.keys.len());
    for encoded in &folded.keys {
        let point = ops.decode_point(encoded)?;
        if !ops.is_on_curve(&point) {
            return Err(Error::InvalidPointCoordinates);
        }
        members.push(PublicKey::from_parts(curve, point));
    }
    Ok((members, folded))
}

/// Restores every member of a folded artifact as an individual
/// SubjectPublicKeyInfo blob, in the bound order.
pub fn unfold_public_keys_to_bytes(content: &[u8], format: Format) -> Result<Vec<Vec<u8>>> {
    let (members, _) = unfold_public_keys(content)?;
    members
        .iter()
        .map(|key| keys::marshal_public_key(key, format))
        .collect()
}

/// Recomputes the ring digest of a folded artifact from its member
/// points, as lowercase hex with optional colon grouping.
pub fn public_keys_digest(content: &[u8], separator: bool) -> Result<String> {
    let (members, folded) = unfold_public_keys(content)?;
    let hash = HashId::by_oid(&folded.hasher_oid).map_err(|_| Error::UnexpectedHashType)?;
    let mut digests = Vec::new();
    for key in &members {
        let hex = base16ct::lower::encode_string(&hash.digest(&key.coordinates_bytes()));
        digests.extend_from_slice(hex.as_bytes());
        digests.push(b'\n');
    }
    let hex = base16ct::lower::encode_string(&hash.digest(&digests));
    Ok(if separator { format_digest(&hex) } else { hex })
}
