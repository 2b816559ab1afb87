//! Deterministic mapping of byte strings onto curve points.
//!
//! The input is digested and interpreted as a big-endian integer; its
//! modular square root serves as the `x` candidate and the curve
//! polynomial at `x` is solved for `y`. Failed attempts nudge the
//! search value by the retry counter, with a fixed attempt bound. For
//! R-type Brainpool curves the search runs on the twisted parent curve
//! and the result is mapped back through `z⁻²`, `z⁻³`.

use num_bigint::BigUint;

use crate::{
    arith::{from_hex, mod_inverse, mod_sqrt},
    curve::{CurveOps, Point},
    error::{Error, Result},
    registry::{CurveId, HashId},
};

/// Candidate probes before the search gives up.
const MAX_ATTEMPTS: u64 = 42;

/// Deterministically maps `input` onto a point of `curve`.
///
/// Identical inputs always produce identical points; inputs without a
/// reachable point fail with [`Error::PointNotFound`].
pub fn hash_to_point(curve: CurveId, hash: HashId, input: &[u8]) -> Result<Point> {
    let value = BigUint::from_bytes_be(&hash.digest(input));
    match curve.twist() {
        Some((parent, z_hex)) => {
            let ops = CurveOps::new(parent);
            let (x, y) = find_point(&ops, value)?;
            untwist(&ops, x, y, z_hex)
        }
        None => {
            let ops = CurveOps::new(curve);
            let (x, y) = find_point(&ops, value)?;
            Ok(Point::from_affine(x, y))
        }
    }
}

/// Bounded search for curve coordinates seeded by `value`.
///
/// When a square root of the running value exists, the root itself
/// becomes the new running value before the counter is added; this
/// keeps the candidate sequence identical across implementations.
fn find_point(ops: &CurveOps, mut value: BigUint) -> Result<(BigUint, BigUint)> {
    let prime = ops.field_prime();
    let mut x = mod_sqrt(&value, prime);
    if let Some(root) = &x {
        value = root.clone();
    }
    for attempt in 0..MAX_ATTEMPTS {
        if let Some(candidate) = &x {
            let y_squared = ops.polynomial(candidate);
            if let Some(y) = mod_sqrt(&y_squared, prime) {
                if (&y * &y) % prime == y_squared {
                    return Ok((candidate.clone(), y));
                }
            }
        }
        value += attempt;
        x = mod_sqrt(&value, prime);
        if let Some(root) = &x {
            value = root.clone();
        }
    }
    Err(Error::PointNotFound)
}

/// Maps a point on the twisted parent curve back to the R-curve.
fn untwist(parent: &CurveOps, x: BigUint, y: BigUint, z_hex: &str) -> Result<Point> {
    let prime = parent.field_prime();
    let z = from_hex(z_hex);
    let z_inv = mod_inverse(&z, prime).ok_or(Error::PointNotFound)?;
    let z_inv2 = &z_inv * &z_inv % prime;
    let z_inv3 = &z_inv2 * &z_inv % prime;
    Ok(Point::from_affine(x * z_inv2 % prime, y * z_inv3 % prime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_deterministic() {
        let first = hash_to_point(CurveId::Prime256v1, HashId::Sha3_256, b"input").unwrap();
        let second = hash_to_point(CurveId::Prime256v1, HashId::Sha3_256, b"input").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mapped_points_lie_on_the_target_curve() {
        for curve in CurveId::ALL {
            let ops = CurveOps::new(curve);
            let point = hash_to_point(curve, HashId::Sha3_256, b"ring members").unwrap();
            assert!(ops.is_on_curve(&point), "{}", curve.name());
        }
    }

    #[test]
    fn distinct_inputs_map_to_distinct_points() {
        let first = hash_to_point(CurveId::Secp384r1, HashId::Sha3_384, b"a").unwrap();
        let second = hash_to_point(CurveId::Secp384r1, HashId::Sha3_384, b"b").unwrap();
        assert_ne!(first, second);
    }
}
