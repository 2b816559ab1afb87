//! Modular arithmetic over arbitrary-precision integers.
//!
//! The curve adapter spans eleven base fields of five different widths,
//! so these helpers work on [`BigUint`] values instead of fixed-width
//! limbs. The square-root routine keeps the structure of the classic
//! `ModSqrt`: a Jacobi-symbol gate, the `x^((p+1)/4)` shortcut for
//! `p ≡ 3 (mod 4)` and Tonelli–Shanks for the remaining primes.

use alloc::{vec, vec::Vec};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Parses a hexadecimal curve constant.
pub(crate) fn from_hex(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).expect("valid hexadecimal constant")
}

/// Minimal big-endian encoding: no leading zero octets, empty for zero.
pub(crate) fn be_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Big-endian encoding left-padded to `width` octets. Values wider than
/// `width` are returned unpadded.
pub(crate) fn be_bytes_padded(value: &BigUint, width: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    if raw.len() >= width {
        return raw;
    }
    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(&raw);
    out
}

/// Modular inverse via the extended Euclidean algorithm.
pub(crate) fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let a = BigInt::from(value.clone());
    let m = BigInt::from(modulus.clone());
    let ext = a.extended_gcd(&m);
    if !ext.gcd.is_one() {
        return None;
    }
    ext.x.mod_floor(&m).to_biguint()
}

/// Jacobi symbol `(a/n)` for odd positive `n`.
pub(crate) fn jacobi(a: &BigUint, n: &BigUint) -> i32 {
    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i32;
    while !a.is_zero() {
        while (&a % 2u32).is_zero() {
            a >>= 1usize;
            let r = (&n % 8u32).to_u64();
            if r == Some(3) || r == Some(5) {
                result = -result;
            }
        }
        core::mem::swap(&mut a, &mut n);
        if (&a % 4u32).to_u64() == Some(3) && (&n % 4u32).to_u64() == Some(3) {
            result = -result;
        }
        a %= &n;
    }
    if n.is_one() {
        result
    } else {
        0
    }
}

/// Modular square root mod an odd prime, or `None` when no root exists.
///
/// Non-residues are rejected up front; zero maps to zero.
pub(crate) fn mod_sqrt(value: &BigUint, prime: &BigUint) -> Option<BigUint> {
    let value = value % prime;
    match jacobi(&value, prime) {
        -1 => None,
        0 => Some(BigUint::zero()),
        _ => {
            if (prime % 4u32).to_u64() == Some(3) {
                let exp = (prime + 1u32) >> 2usize;
                Some(value.modpow(&exp, prime))
            } else {
                Some(tonelli_shanks(&value, prime))
            }
        }
    }
}

/// Tonelli–Shanks for a known quadratic residue mod an odd prime, using
/// the smallest quadratic non-residue as group generator.
fn tonelli_shanks(value: &BigUint, prime: &BigUint) -> BigUint {
    let one = BigUint::one();
    let mut q = prime - &one;
    let mut s = 0u32;
    while (&q % 2u32).is_zero() {
        q >>= 1usize;
        s += 1;
    }
    let mut z = BigUint::from(2u32);
    while jacobi(&z, prime) != -1 {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, prime);
    let mut t = value.modpow(&q, prime);
    let mut r = value.modpow(&((&q + &one) >> 1usize), prime);
    loop {
        if t.is_zero() {
            return BigUint::zero();
        }
        if t.is_one() {
            return r;
        }
        let mut i = 0u32;
        let mut probe = t.clone();
        while !probe.is_one() {
            probe = &probe * &probe % prime;
            i += 1;
        }
        let b = c.modpow(&(BigUint::one() << ((m - i - 1) as usize)), prime);
        m = i;
        c = &b * &b % prime;
        t = &t * &c % prime;
        r = &r * &b % prime;
    }
}
