//! Key material and its codecs.
//!
//! Public keys travel as SubjectPublicKeyInfo (RFC 5280), private keys
//! as `ECPrivateKey` (RFC 5915); both are accepted as raw DER or as
//! armored `PUBLIC KEY` / `EC PRIVATE KEY` blocks.

use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{BitString, ObjectIdentifier},
    Any, AnyRef, Decode, Encode,
};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use sec1::{EcParameters, EcPrivateKey};
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo, SubjectPublicKeyInfoRef};

use crate::{
    arith::{be_bytes, be_bytes_padded},
    armor,
    curve::{CurveOps, Point},
    encoding::Format,
    error::{Error, Result},
    registry::CurveId,
};

/// RFC 5480 `id-ecPublicKey`.
const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Ring member: a point on one of the registry curves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    curve: CurveId,
    point: Point,
}

impl PublicKey {
    /// Builds a key, checking that the point lies on the curve.
    pub fn new(curve: CurveId, point: Point) -> Result<Self> {
        if !CurveOps::new(curve).is_on_curve(&point) {
            return Err(Error::InvalidPointCoordinates);
        }
        Ok(Self { curve, point })
    }

    pub(crate) fn from_parts(curve: CurveId, point: Point) -> Self {
        Self { curve, point }
    }

    /// Curve the key lives on.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// The public point.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// `0x04 ‖ X ‖ Y` with minimal coordinates, the per-key digest
    /// input of the ring builder.
    pub(crate) fn coordinates_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(0x04);
        out.extend_from_slice(&self.point.to_bytes());
        out
    }
}

/// Signing key: a scalar together with its derived public half.
#[derive(Clone)]
pub struct PrivateKey {
    curve: CurveId,
    scalar: BigUint,
    public: PublicKey,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl PrivateKey {
    /// Generates a key with a uniformly random scalar in `[1, q)`.
    pub fn random(curve: CurveId, rng: &mut impl CryptoRngCore) -> Self {
        let ops = CurveOps::new(curve);
        let bound = ops.order() - 1u32;
        let scalar = rand_below(rng, &bound) + 1u32;
        Self::from_scalar(curve, &ops, scalar)
    }

    /// Builds a key from a big-endian scalar, rejecting zero and values
    /// at or beyond the group order.
    pub fn from_scalar_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self> {
        let scalar = BigUint::from_bytes_be(bytes);
        let ops = CurveOps::new(curve);
        if scalar.is_zero() || &scalar >= ops.order() {
            return Err(Error::ParseEcPrivateKeyFailure);
        }
        Ok(Self::from_scalar(curve, &ops, scalar))
    }

    fn from_scalar(curve: CurveId, ops: &CurveOps, scalar: BigUint) -> Self {
        let public = PublicKey::from_parts(curve, ops.base_mul(&be_bytes(&scalar)));
        Self {
            curve,
            scalar,
            public,
        }
    }

    /// Curve the key lives on.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// The derived public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Minimal big-endian scalar bytes.
    pub(crate) fn scalar_bytes(&self) -> Vec<u8> {
        be_bytes(&self.scalar)
    }

    pub(crate) fn scalar(&self) -> &BigUint {
        &self.scalar
    }
}

/// Uniform random integer in `[0, bound)`: sample the exact bit width,
/// mask the excess top bits and retry until the value fits.
pub(crate) fn rand_below(rng: &mut impl CryptoRngCore, bound: &BigUint) -> BigUint {
    let bits = bound.bits();
    let len = ((bits + 7) / 8) as usize;
    let mask = if bits % 8 == 0 {
        0xff
    } else {
        (1u8 << (bits % 8)) - 1
    };
    let mut buf = alloc::vec![0u8; len];
    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= mask;
        let value = BigUint::from_bytes_be(&buf);
        if &value < bound {
            return value;
        }
    }
}

/// Parses a public key from SubjectPublicKeyInfo DER or an armored
/// `PUBLIC KEY` block.
pub fn parse_public_key(content: &[u8]) -> Result<PublicKey> {
    let decoded;
    let der = if armor::contains_label(content, armor::PUBLIC_KEY_LABEL) {
        decoded = armor::decode(content, armor::PUBLIC_KEY_LABEL)?;
        decoded.as_slice()
    } else {
        content
    };
    let info =
        SubjectPublicKeyInfoRef::from_der(der).map_err(|_| Error::ParsePkixPublicKeyFailed)?;
    if info.algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(Error::ParsePkixPublicKeyFailed);
    }
    let params = info
        .algorithm
        .parameters_oid()
        .map_err(|_| Error::ParsePkixPublicKeyFailed)?;
    let curve = CurveId::by_oid(&params).map_err(|_| Error::ParsePkixPublicKeyFailed)?;
    let point_bytes = info
        .subject_public_key
        .as_bytes()
        .ok_or(Error::ParsePkixPublicKeyFailed)?;
    let ops = CurveOps::new(curve);
    let point = ops
        .decode_point(point_bytes)
        .map_err(|_| Error::ParsePkixPublicKeyFailed)?;
    Ok(PublicKey::from_parts(curve, point))
}

/// Serializes a public key as SubjectPublicKeyInfo, raw or armored.
pub fn marshal_public_key(key: &PublicKey, format: Format) -> Result<Vec<u8>> {
    let ops = CurveOps::new(key.curve);
    let encoded = ops
        .encode_point(&key.point, false)
        .map_err(|_| Error::MarshalPkixPublicKeyFailed)?;
    let curve_oid = key.curve.oid();
    let info: SubjectPublicKeyInfo<Any, BitString> = SubjectPublicKeyInfo {
        algorithm: AlgorithmIdentifier {
            oid: ID_EC_PUBLIC_KEY,
            parameters: Some(Any::from(AnyRef::from(&curve_oid))),
        },
        subject_public_key: BitString::from_bytes(&encoded)
            .map_err(|_| Error::MarshalPkixPublicKeyFailed)?,
    };
    let der = info.to_der().map_err(|_| Error::MarshalPkixPublicKeyFailed)?;
    Ok(match format {
        Format::Pem => armor::encode(armor::PUBLIC_KEY_LABEL, &[], &der),
        Format::Der => der,
    })
}

/// Parses a private key from RFC 5915 DER or an armored
/// `EC PRIVATE KEY` block. The embedded named-curve parameters are
/// required.
pub fn parse_private_key(content: &[u8]) -> Result<PrivateKey> {
    let decoded;
    let der = if armor::contains_label(content, armor::EC_PRIVATE_KEY_LABEL) {
        decoded = armor::decode(content, armor::EC_PRIVATE_KEY_LABEL)?;
        decoded.as_slice()
    } else {
        content
    };
    let key = EcPrivateKey::from_der(der).map_err(|_| Error::ParseEcPrivateKeyFailure)?;
    let oid = key
        .parameters
        .and_then(EcParameters::named_curve)
        .ok_or(Error::ParseEcPrivateKeyFailure)?;
    let curve = CurveId::by_oid(&oid).map_err(|_| Error::ParseEcPrivateKeyFailure)?;
    PrivateKey::from_scalar_bytes(curve, key.private_key)
}

/// Serializes a private key as RFC 5915 DER, raw or armored, with the
/// named-curve parameters and public key embedded.
pub fn marshal_private_key(key: &PrivateKey, format: Format) -> Result<Vec<u8>> {
    let ops = CurveOps::new(key.curve);
    let scalar = be_bytes_padded(key.scalar(), ops.order_len());
    let public = ops
        .encode_point(key.public.point(), false)
        .map_err(|_| Error::MarshalKeyFailed)?;
    let ec = EcPrivateKey {
        private_key: &scalar,
        parameters: Some(EcParameters::NamedCurve(key.curve.oid())),
        public_key: Some(&public),
    };
    let der = ec.to_der().map_err(|_| Error::MarshalKeyFailed)?;
    Ok(match format {
        Format::Pem => armor::encode(armor::EC_PRIVATE_KEY_LABEL, &[], &der),
        Format::Der => der,
    })
}

/// Generates a fresh signing key for `curve_name` and serializes it as
/// RFC 5915 DER or an armored block.
pub fn generate_private_key(
    curve_name: &str,
    format: Format,
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<u8>> {
    let curve = CurveId::by_name(curve_name)?;
    let key = PrivateKey::random(curve, rng);
    marshal_private_key(&key, format)
}

/// Re-derives and serializes the public half of a private key blob.
pub fn derive_public_key(private_key: &[u8], format: Format) -> Result<Vec<u8>> {
    let key = parse_private_key(private_key)?;
    marshal_public_key(key.public_key(), format)
}

/// `0x04 ‖ X ‖ Y` coordinates of a serialized public key.
pub fn public_key_coordinates(content: &[u8]) -> Result<Vec<u8>> {
    Ok(parse_public_key(content)?.coordinates_bytes())
}
