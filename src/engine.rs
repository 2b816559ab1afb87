//! LSAG signing and verification.
//!
//! The construction follows Liu–Wei–Wong: for a ring `L = {Y₀,…,Yₙ₋₁}`
//! and signer secret `x` at position `π`, the challenge chain
//! `cᵢ₊₁ = H₁(L, Ỹ, m, G·sᵢ + Yᵢ·cᵢ, h·sᵢ + Ỹ·cᵢ)` is closed with
//! `sπ = (u − x·cπ) mod q`, where `h = H₂(L, case)` and the key image
//! `Ỹ = h·x` links signatures of one signer within a (ring, case)
//! scope.

use alloc::{vec, vec::Vec};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use rand_core::CryptoRngCore;

use crate::{
    arith::be_bytes,
    curve::{CurveOps, Point},
    encoding::Format,
    error::{Error, Result},
    fold, hash2curve,
    keys::{self, rand_below, PrivateKey, PublicKey},
    registry::{pairing_supported, CurveId, HashId},
    signature::{KeyImage, Signature},
};

fn ring_bytes(ring: &[PublicKey]) -> Vec<u8> {
    let mut out = Vec::new();
    for member in ring {
        out.extend_from_slice(&member.point().to_bytes());
    }
    out
}

/// `H₁`: digest over the ring bytes, key image, the two chain points
/// and the message digest.
fn challenge(
    hash: HashId,
    ring: &[u8],
    key_image: &Point,
    message_digest: &[u8],
    left: &Point,
    right: &Point,
) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(ring.len() + 5 * message_digest.len());
    buffer.extend_from_slice(ring);
    buffer.extend_from_slice(&key_image.to_bytes());
    buffer.extend_from_slice(&left.to_bytes());
    buffer.extend_from_slice(&right.to_bytes());
    buffer.extend_from_slice(message_digest);
    hash.digest(&buffer)
}

/// Signs `message` with the ring member at `position`.
///
/// The case identifier scopes linkability: signatures by one signer
/// over the same ring and case identifier share their key image.
#[allow(clippy::too_many_arguments)]
pub fn sign_at(
    curve: CurveId,
    hash: HashId,
    private_key: &PrivateKey,
    ring: &[PublicKey],
    position: usize,
    message: &[u8],
    case_id: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    if !pairing_supported(curve, hash) {
        return Err(Error::UnsupportedCurveHashCombination);
    }
    let n = ring.len();
    if n < 2 {
        return Err(Error::InsufficientPublicKeys);
    }
    if position >= n {
        return Err(Error::PrivateKeyPositionOutOfRange);
    }
    if ring[position].point() != private_key.public_key().point() {
        return Err(Error::PrivateKeyNotFitPublic);
    }
    if ring.iter().any(|member| member.curve() != curve) {
        return Err(Error::UnexpectedCurveType);
    }

    let ops = CurveOps::new(curve);
    let message_digest = hash.digest(message);
    let lb = ring_bytes(ring);

    let mut h2_input = lb.clone();
    h2_input.extend_from_slice(case_id);
    let h = hash2curve::hash_to_point(curve, hash, &h2_input)?;

    let secret = private_key.scalar_bytes();
    let key_image = ops.scalar_mul(&h, &secret);

    let mut c: Vec<Vec<u8>> = vec![Vec::new(); n];
    let mut s: Vec<Vec<u8>> = vec![Vec::new(); n];

    let u = rand_below(rng, ops.order());
    let u_bytes = be_bytes(&u);
    c[(position + 1) % n] = challenge(
        hash,
        &lb,
        &key_image,
        &message_digest,
        &ops.base_mul(&u_bytes),
        &ops.scalar_mul(&h, &u_bytes),
    );

    for step in 1..n {
        let i = (position + step) % n;
        s[i] = be_bytes(&rand_below(rng, ops.order()));
        let left = ops.add(
            &ops.base_mul(&s[i]),
            &ops.scalar_mul(ring[i].point(), &c[i]),
        );
        let right = ops.add(
            &ops.scalar_mul(&h, &s[i]),
            &ops.scalar_mul(&key_image, &c[i]),
        );
        c[(i + 1) % n] = challenge(hash, &lb, &key_image, &message_digest, &left, &right);
    }

    // Close the ring: sπ = (u − x·cπ) mod q.
    let x = BigUint::from_bytes_be(&secret);
    let c_pi = BigUint::from_bytes_be(&c[position]);
    let order = BigInt::from(ops.order().clone());
    let closed = (BigInt::from(u) - BigInt::from(x * c_pi)).mod_floor(&order);
    s[position] = match closed.to_biguint() {
        Some(value) => be_bytes(&value),
        None => Vec::new(),
    };

    let (image_x, image_y) = match key_image.coordinates() {
        Some((x, y)) => (be_bytes(x), be_bytes(y)),
        None => return Err(Error::InvalidKeyImage),
    };

    let checksum = c[0].clone();
    Ok(Signature::new(
        curve.oid(),
        hash.oid(),
        KeyImage::new(image_x, image_y),
        checksum,
        s,
    ))
}

/// Signs `message` after locating the signer's key in the ring.
pub fn sign(
    curve: CurveId,
    hash: HashId,
    private_key: &PrivateKey,
    ring: &[PublicKey],
    message: &[u8],
    case_id: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    let position = ring
        .iter()
        .position(|member| member.point() == private_key.public_key().point())
        .ok_or(Error::PrivateKeyNotFoundAmongPublicKeys)?;
    sign_at(
        curve,
        hash,
        private_key,
        ring,
        position,
        message,
        case_id,
        rng,
    )
}

/// Verifies `signature` over `message` against the ring and case
/// identifier.
pub fn verify(
    signature: &Signature,
    ring: &[PublicKey],
    message: &[u8],
    case_id: &[u8],
) -> Result<()> {
    let n = ring.len();
    if signature.responses().len() != n {
        return Err(Error::IncorrectNumberOfSignatures);
    }
    let curve = CurveId::by_oid(signature.curve_oid())?;
    let hash = HashId::by_oid(signature.hasher_oid())?;
    if !pairing_supported(curve, hash) {
        return Err(Error::UnsupportedCurveHashCombination);
    }
    if ring.iter().any(|member| member.curve() != curve) {
        return Err(Error::UnexpectedCurveType);
    }

    let ops = CurveOps::new(curve);
    let key_image = Point::from_affine(
        BigUint::from_bytes_be(signature.key_image().x()),
        BigUint::from_bytes_be(signature.key_image().y()),
    );
    if !ops.is_on_curve(&key_image) {
        return Err(Error::InvalidKeyImage);
    }

    let message_digest = hash.digest(message);
    let lb = ring_bytes(ring);
    let mut h2_input = lb.clone();
    h2_input.extend_from_slice(case_id);
    let h = hash2curve::hash_to_point(curve, hash, &h2_input)?;

    let mut c = signature.checksum().to_vec();
    for (member, response) in ring.iter().zip(signature.responses()) {
        let left = ops.add(
            &ops.base_mul(response),
            &ops.scalar_mul(member.point(), &c),
        );
        let right = ops.add(
            &ops.scalar_mul(&h, response),
            &ops.scalar_mul(&key_image, &c),
        );
        c = challenge(hash, &lb, &key_image, &message_digest, &left, &right);
    }
    if c == signature.checksum() {
        Ok(())
    } else {
        Err(Error::IncorrectChecksum)
    }
}

/// Signs with serialized inputs: a folded ring, an RFC 5915 private
/// key, and the output format of the signature blob.
pub fn create_signature(
    folded_keys: &[u8],
    private_key: &[u8],
    message: &[u8],
    case_id: &[u8],
    format: Format,
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<u8>> {
    let (ring, folded) = fold::unfold_public_keys(folded_keys)?;
    let curve = CurveId::by_oid(folded.curve_oid()).map_err(|_| Error::UnexpectedCurveType)?;
    let hash = HashId::by_oid(folded.hasher_oid()).map_err(|_| Error::UnexpectedHashType)?;
    let key = keys::parse_private_key(private_key)?;
    let signature = sign(curve, hash, &key, &ring, message, case_id, rng)?;
    match format {
        Format::Pem => signature.to_pem(),
        Format::Der => signature.to_der(),
    }
}

/// Verifies a serialized signature against a folded ring.
pub fn verify_signature(
    folded_keys: &[u8],
    signature: &[u8],
    message: &[u8],
    case_id: &[u8],
) -> Result<()> {
    let signature = Signature::parse(signature)?;
    let (ring, _) = fold::unfold_public_keys(folded_keys)?;
    verify(&signature, &ring, message, case_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn signature_structure() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let privates: Vec<PrivateKey> = (0..3)
            .map(|_| PrivateKey::random(CurveId::Prime256v1, &mut rng))
            .collect();
        let ring: Vec<PublicKey> = privates.iter().map(|key| key.public_key().clone()).collect();
        let signature = sign_at(
            CurveId::Prime256v1,
            HashId::Sha3_256,
            &privates[0],
            &ring,
            0,
            b"m",
            b"c",
            &mut rng,
        )
        .unwrap();

        assert_eq!(signature.responses().len(), ring.len());
        assert_eq!(signature.checksum().len(), HashId::Sha3_256.output_len());
        assert_eq!(signature.name(), "lsag Signature");
        assert_eq!(signature.version(), 1);
        let ops = CurveOps::new(CurveId::Prime256v1);
        for response in signature.responses() {
            assert!(&BigUint::from_bytes_be(response) < ops.order());
        }
    }

    #[test]
    fn ring_closure_reconstructs_the_commitment() {
        // G·sπ + Yπ·cπ must equal G·u for sπ = (u − x·cπ) mod q, even
        // with an unreduced digest as cπ.
        let mut rng = ChaCha20Rng::seed_from_u64(100);
        let ops = CurveOps::new(CurveId::Prime256v1);
        let key = PrivateKey::random(CurveId::Prime256v1, &mut rng);
        let u = rand_below(&mut rng, ops.order());
        let c = HashId::Sha3_512.digest(b"challenge wider than the group order");

        let x = BigUint::from_bytes_be(&key.scalar_bytes());
        let c_value = BigUint::from_bytes_be(&c);
        let order = BigInt::from(ops.order().clone());
        let closed = (BigInt::from(u.clone()) - BigInt::from(x * c_value)).mod_floor(&order);
        let s = closed.to_biguint().unwrap();

        let reconstructed = ops.add(
            &ops.base_mul(&be_bytes(&s)),
            &ops.scalar_mul(key.public_key().point(), &c),
        );
        assert_eq!(reconstructed, ops.base_mul(&be_bytes(&u)));
    }
}
