#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod arith;
mod armor;
mod curve;
mod encoding;
mod engine;
mod error;
mod fold;
mod hash2curve;
mod keys;
mod registry;
mod signature;

pub use crate::{
    curve::{CurveOps, Point},
    encoding::{format_digest, Format},
    engine::{create_signature, sign, sign_at, verify, verify_signature},
    error::{Error, Result},
    fold::{
        fold_public_keys, public_keys_digest, unfold_public_keys, unfold_public_keys_to_bytes,
        FoldedKeys, KeyOrder,
    },
    hash2curve::hash_to_point,
    keys::{
        derive_public_key, generate_private_key, marshal_private_key, marshal_public_key,
        parse_private_key, parse_public_key, public_key_coordinates, PrivateKey, PublicKey,
    },
    registry::{pairing_supported, CurveId, HashId},
    signature::{signature_key_image, KeyImage, Signature, SIGNATURE_VERSION},
};

pub use der::asn1::ObjectIdentifier;
pub use num_bigint::BigUint;
pub use rand_core;
