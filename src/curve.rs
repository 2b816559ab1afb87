//! Affine point arithmetic over the registry curves.
//!
//! A single adapter serves all registered curves; the curve equation
//! coefficients and group parameters come from the registry tables.
//! Scalars are big-endian byte strings and are processed bit by bit, so
//! values larger than the group order are accepted as-is.

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    arith::{be_bytes, be_bytes_padded, from_hex, mod_inverse, mod_sqrt},
    error::{Error, Result},
    registry::{CurveId, EquationA},
};

/// Affine curve point with a distinguished identity (point at infinity)
/// value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Point {
    coordinates: Option<(BigUint, BigUint)>,
}

impl Point {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self { coordinates: None }
    }

    /// A point from its affine coordinates.
    pub fn from_affine(x: BigUint, y: BigUint) -> Self {
        Self {
            coordinates: Some((x, y)),
        }
    }

    /// Whether this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.coordinates.is_none()
    }

    /// Affine coordinates, or `None` for the identity.
    pub fn coordinates(&self) -> Option<(&BigUint, &BigUint)> {
        self.coordinates.as_ref().map(|(x, y)| (x, y))
    }

    /// Concatenated minimal big-endian `X ‖ Y`; empty for the identity.
    ///
    /// This is the layout every hash in the scheme consumes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.coordinates {
            Some((x, y)) => {
                let mut out = be_bytes(x);
                out.extend_from_slice(&be_bytes(y));
                out
            }
            None => Vec::new(),
        }
    }
}

/// Arithmetic adapter bound to one registry curve.
pub struct CurveOps {
    id: CurveId,
    p: BigUint,
    a: BigUint,
    b: BigUint,
    gx: BigUint,
    gy: BigUint,
    n: BigUint,
}

impl CurveOps {
    /// Materializes the adapter for `id`.
    pub fn new(id: CurveId) -> Self {
        let constants = id.constants();
        let p = from_hex(constants.p);
        let a = match constants.a {
            EquationA::MinusThree => &p - 3u32,
            EquationA::Zero => BigUint::zero(),
            EquationA::Hex(hex) => from_hex(hex),
        };
        Self {
            id,
            a,
            b: from_hex(constants.b),
            gx: from_hex(constants.gx),
            gy: from_hex(constants.gy),
            n: from_hex(constants.n),
            p,
        }
    }

    /// Curve identifier this adapter serves.
    pub fn id(&self) -> CurveId {
        self.id
    }

    /// Group generator.
    pub fn generator(&self) -> Point {
        Point::from_affine(self.gx.clone(), self.gy.clone())
    }

    /// Group order `q`.
    pub fn order(&self) -> &BigUint {
        &self.n
    }

    /// Base field prime `p`.
    pub fn field_prime(&self) -> &BigUint {
        &self.p
    }

    /// Curve equation coefficient `a`.
    pub fn equation_a(&self) -> &BigUint {
        &self.a
    }

    /// Curve equation coefficient `b`.
    pub fn equation_b(&self) -> &BigUint {
        &self.b
    }

    /// Width of a serialized field element in octets.
    pub fn field_len(&self) -> usize {
        ((self.p.bits() + 7) / 8) as usize
    }

    /// Width of a serialized scalar in octets.
    pub fn order_len(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    /// `x³ + ax + b mod p`.
    pub(crate) fn polynomial(&self, x: &BigUint) -> BigUint {
        (x * x * x + &self.a * x + &self.b) % &self.p
    }

    /// Whether `point` satisfies the curve equation. The identity is not
    /// considered on the curve.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point.coordinates() {
            Some((x, y)) => (y * y) % &self.p == self.polynomial(x),
            None => false,
        }
    }

    /// Point addition; adding the identity returns the other operand.
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1) = match lhs.coordinates() {
            Some((x, y)) => (x % &self.p, y % &self.p),
            None => return rhs.clone(),
        };
        let (x2, y2) = match rhs.coordinates() {
            Some((x, y)) => (x % &self.p, y % &self.p),
            None => return lhs.clone(),
        };
        let p = &self.p;

        let lambda = if x1 == x2 {
            if ((&y1 + &y2) % p).is_zero() {
                return Point::identity();
            }
            let numerator = (&x1 * &x1 * 3u32 + &self.a) % p;
            let denominator = (&y1 * 2u32) % p;
            match mod_inverse(&denominator, p) {
                Some(inverse) => numerator * inverse % p,
                None => return Point::identity(),
            }
        } else {
            let numerator = (&y2 + p - &y1) % p;
            let denominator = (&x2 + p - &x1) % p;
            match mod_inverse(&denominator, p) {
                Some(inverse) => numerator * inverse % p,
                None => return Point::identity(),
            }
        };

        let x3 = (&lambda * &lambda + p * 2u32 - &x1 - &x2) % p;
        let y3 = (&lambda * ((&x1 + p - &x3) % p) % p + p - &y1) % p;
        Point::from_affine(x3, y3)
    }

    /// Multiplies `point` by a big-endian byte scalar, most significant
    /// bit first. The scalar is not reduced mod `q`.
    pub fn scalar_mul(&self, point: &Point, scalar: &[u8]) -> Point {
        let mut acc = Point::identity();
        for byte in scalar {
            for shift in (0..8).rev() {
                acc = self.add(&acc, &acc);
                if (byte >> shift) & 1 == 1 {
                    acc = self.add(&acc, point);
                }
            }
        }
        acc
    }

    /// Multiplies the generator by a big-endian byte scalar.
    pub fn base_mul(&self, scalar: &[u8]) -> Point {
        self.scalar_mul(&self.generator(), scalar)
    }

    /// SEC1 encoding, compressed or uncompressed, padded to the curve
    /// width.
    pub fn encode_point(&self, point: &Point, compress: bool) -> Result<Vec<u8>> {
        let (x, y) = point.coordinates().ok_or(Error::NilPointCoordinates)?;
        let width = self.field_len();
        let mut out;
        if compress {
            out = Vec::with_capacity(1 + width);
            out.push(if (y % 2u32).is_zero() { 0x02 } else { 0x03 });
            out.extend_from_slice(&be_bytes_padded(x, width));
        } else {
            out = Vec::with_capacity(1 + 2 * width);
            out.push(0x04);
            out.extend_from_slice(&be_bytes_padded(x, width));
            out.extend_from_slice(&be_bytes_padded(y, width));
        }
        Ok(out)
    }

    /// Parses a SEC1-encoded point, recovering `y` for the compressed
    /// forms. The result is not validated against the curve equation.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<Point> {
        let width = self.field_len();
        match bytes.first().copied() {
            Some(0x04) => {
                if bytes.len() != 1 + 2 * width {
                    return Err(Error::NilPointCoordinates);
                }
                let x = BigUint::from_bytes_be(&bytes[1..1 + width]);
                let y = BigUint::from_bytes_be(&bytes[1 + width..]);
                Ok(Point::from_affine(x, y))
            }
            Some(tag @ (0x02 | 0x03)) => {
                if bytes.len() != 1 + width {
                    return Err(Error::NilPointCoordinates);
                }
                let x = BigUint::from_bytes_be(&bytes[1..]);
                if x >= self.p {
                    return Err(Error::NilPointCoordinates);
                }
                let y_squared = self.polynomial(&x);
                let mut y = mod_sqrt(&y_squared, &self.p).ok_or(Error::NilPointCoordinates)?;
                let is_odd = !(&y % 2u32).is_zero();
                if is_odd != (tag == 0x03) {
                    y = (&self.p - &y) % &self.p;
                }
                Ok(Point::from_affine(x, y))
            }
            _ => Err(Error::NilPointCoordinates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::be_bytes;

    #[test]
    fn generators_are_on_their_curves() {
        for id in CurveId::ALL {
            let ops = CurveOps::new(id);
            assert!(ops.is_on_curve(&ops.generator()), "{}", id.name());
        }
    }

    #[test]
    fn generator_times_order_is_identity() {
        for id in CurveId::ALL {
            let ops = CurveOps::new(id);
            let result = ops.base_mul(&be_bytes(ops.order()));
            assert!(result.is_identity(), "{}", id.name());
        }
    }

    #[test]
    fn doubling_matches_scalar_multiplication() {
        let ops = CurveOps::new(CurveId::Prime256v1);
        let g = ops.generator();
        let doubled = ops.add(&g, &g);
        assert_eq!(doubled, ops.base_mul(&[2]));
        assert_eq!(ops.add(&doubled, &g), ops.base_mul(&[3]));
        assert!(ops.is_on_curve(&doubled));
    }

    #[test]
    fn identity_conventions() {
        let ops = CurveOps::new(CurveId::Prime256v1);
        let g = ops.generator();
        assert_eq!(ops.add(&Point::identity(), &g), g);
        assert_eq!(ops.add(&g, &Point::identity()), g);
        assert!(ops.base_mul(&[]).is_identity());
        assert!(ops.base_mul(&[0, 0]).is_identity());
        assert!(Point::identity().to_bytes().is_empty());
        assert!(!ops.is_on_curve(&Point::identity()));
    }

    #[test]
    fn opposite_points_cancel() {
        let ops = CurveOps::new(CurveId::Prime256v1);
        let g = ops.generator();
        let (x, y) = g.coordinates().map(|(x, y)| (x.clone(), y.clone())).unwrap();
        let negated = Point::from_affine(x, ops.field_prime() - &y);
        assert!(ops.add(&g, &negated).is_identity());
    }

    #[test]
    fn sec1_round_trips() {
        for id in [CurveId::Prime256v1, CurveId::Secp256k1, CurveId::BrainpoolP512r1] {
            let ops = CurveOps::new(id);
            let point = ops.base_mul(&[0x17]);
            for compress in [true, false] {
                let encoded = ops.encode_point(&point, compress).unwrap();
                let coordinates = if compress { 1 } else { 2 };
                assert_eq!(encoded.len(), 1 + coordinates * ops.field_len());
                assert_eq!(ops.decode_point(&encoded).unwrap(), point, "{}", id.name());
            }
        }
    }

    #[test]
    fn malformed_points_are_rejected() {
        let ops = CurveOps::new(CurveId::Prime256v1);
        assert_eq!(ops.decode_point(&[]), Err(Error::NilPointCoordinates));
        assert_eq!(ops.decode_point(&[0x04, 1, 2]), Err(Error::NilPointCoordinates));
        assert_eq!(ops.decode_point(&[0x05; 65]), Err(Error::NilPointCoordinates));
        assert_eq!(
            ops.encode_point(&Point::identity(), true),
            Err(Error::NilPointCoordinates)
        );
    }
}
