//! Registry of supported curves and hash functions.
//!
//! Algorithms are identified by short names (the OpenSSL spellings) and
//! by their registered OIDs. Curve parameters are kept as hexadecimal
//! constants and materialized into big integers by the arithmetic
//! adapter. The registry is immutable.

use alloc::vec::Vec;
use der::asn1::ObjectIdentifier;
use sha3::{Digest, Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::error::{Error, Result};

/// Supported prime-order Weierstrass curves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CurveId {
    /// NIST P-224 (`secp224r1`).
    Secp224r1,
    /// NIST P-256 (`prime256v1`, a.k.a. `secp256r1`).
    Prime256v1,
    /// NIST P-384 (`secp384r1`).
    Secp384r1,
    /// NIST P-521 (`secp521r1`).
    Secp521r1,
    /// SECG `secp256k1`.
    Secp256k1,
    /// RFC 5639 `brainpoolP256r1`.
    BrainpoolP256r1,
    /// RFC 5639 `brainpoolP256t1`.
    BrainpoolP256t1,
    /// RFC 5639 `brainpoolP384r1`.
    BrainpoolP384r1,
    /// RFC 5639 `brainpoolP384t1`.
    BrainpoolP384t1,
    /// RFC 5639 `brainpoolP512r1`.
    BrainpoolP512r1,
    /// RFC 5639 `brainpoolP512t1`.
    BrainpoolP512t1,
}

/// Supported hash functions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashId {
    /// SHA3-224.
    Sha3_224,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-384.
    Sha3_384,
    /// SHA3-512.
    Sha3_512,
}

/// Curve-equation `a` coefficient, stored in the form the tables use.
#[derive(Copy, Clone, Debug)]
pub(crate) enum EquationA {
    /// `a = p − 3` (NIST and Brainpool T-curves).
    MinusThree,
    /// `a = 0` (`secp256k1`, which has no linear term).
    Zero,
    /// Arbitrary coefficient (Brainpool R-curves).
    Hex(&'static str),
}

/// Raw parameters of one registry curve.
pub(crate) struct CurveConstants {
    pub(crate) name: &'static str,
    pub(crate) oid: ObjectIdentifier,
    pub(crate) p: &'static str,
    pub(crate) a: EquationA,
    pub(crate) b: &'static str,
    pub(crate) gx: &'static str,
    pub(crate) gy: &'static str,
    pub(crate) n: &'static str,
    /// SEC1 point compression used inside folded key sets.
    pub(crate) compress: bool,
    /// For R-type Brainpool curves: the twisted parent curve the
    /// hash-to-curve search runs on, and the twist parameter `z`.
    pub(crate) twist: Option<(CurveId, &'static str)>,
}

const SECP224R1: CurveConstants = CurveConstants {
    name: "secp224r1",
    oid: ObjectIdentifier::new_unwrap("1.3.132.0.33"),
    p: "ffffffffffffffffffffffffffffffff000000000000000000000001",
    a: EquationA::MinusThree,
    b: "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
    gx: "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21",
    gy: "bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34",
    n: "ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
    compress: true,
    twist: None,
};

const PRIME256V1: CurveConstants = CurveConstants {
    name: "prime256v1",
    oid: ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"),
    p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: EquationA::MinusThree,
    b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    compress: true,
    twist: None,
};

const SECP384R1: CurveConstants = CurveConstants {
    name: "secp384r1",
    oid: ObjectIdentifier::new_unwrap("1.3.132.0.34"),
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
    a: EquationA::MinusThree,
    b: "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
    gx: "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
    gy: "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
    n: "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973",
    compress: true,
    twist: None,
};

const SECP521R1: CurveConstants = CurveConstants {
    name: "secp521r1",
    oid: ObjectIdentifier::new_unwrap("1.3.132.0.35"),
    p: "1ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    a: EquationA::MinusThree,
    b: "51953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00",
    gx: "c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66",
    gy: "11839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650",
    n: "1fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409",
    compress: true,
    twist: None,
};

const SECP256K1: CurveConstants = CurveConstants {
    name: "secp256k1",
    oid: ObjectIdentifier::new_unwrap("1.3.132.0.10"),
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: EquationA::Zero,
    b: "07",
    gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    compress: false,
    twist: None,
};

const BRAINPOOL_P256R1: CurveConstants = CurveConstants {
    name: "brainpoolP256r1",
    oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.7"),
    p: "a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377",
    a: EquationA::Hex("7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9"),
    b: "26dc5c6ce94a4b44f330b5d9bbd77cbf958416295cf7e1ce6bccdc18ff8c07b6",
    gx: "8bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace3262",
    gy: "547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f046997",
    n: "a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7",
    compress: false,
    twist: Some((
        CurveId::BrainpoolP256t1,
        "3e2d4bd9597b58639ae7aa669cab9837cf5cf20a2c852d10f655668dfc150ef0",
    )),
};

const BRAINPOOL_P256T1: CurveConstants = CurveConstants {
    name: "brainpoolP256t1",
    oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.8"),
    p: "a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377",
    a: EquationA::MinusThree,
    b: "662c61c430d84ea4fe66a7733d0b76b7bf93ebc4af2f49256ae58101fee92b04",
    gx: "a3e8eb3cc1cfe7b7732213b23a656149afa142c47aafbc2b79a191562e1305f4",
    gy: "2d996c823439c56d7f7b22e14644417e69bcb6de39d027001dabe8f35b25c9be",
    n: "a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7",
    compress: true,
    twist: None,
};

const BRAINPOOL_P384R1: CurveConstants = CurveConstants {
    name: "brainpoolP384r1",
    oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.11"),
    p: "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123acd3a729901d1a71874700133107ec53",
    a: EquationA::Hex("7bc382c63d8c150c3c72080ace05afa0c2bea28e4fb22787139165efba91f90f8aa5814a503ad4eb04a8c7dd22ce2826"),
    b: "04a8c7dd22ce28268b39b55416f0447c2fb77de107dcd2a62e880ea53eeb62d57cb4390295dbc9943ab78696fa504c11",
    gx: "1d1c64f068cf45ffa2a63a81b7c13f6b8847a3e77ef14fe3db7fcafe0cbd10e8e826e03436d646aaef87b2e247d4af1e",
    gy: "8abe1d7520f9c2a45cb1eb8e95cfd55262b70b29feec5864e19c054ff99129280e4646217791811142820341263c5315",
    n: "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7cf3ab6af6b7fc3103b883202e9046565",
    compress: false,
    twist: Some((
        CurveId::BrainpoolP384t1,
        "41dfe8dd399331f7166a66076734a89cd0d2bcdb7d068e44e1f378f41ecbae97d2d63dbc87bccddccc5da39e8589291c",
    )),
};

const BRAINPOOL_P384T1: CurveConstants = CurveConstants {
    name: "brainpoolP384t1",
    oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.12"),
    p: "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123acd3a729901d1a71874700133107ec53",
    a: EquationA::MinusThree,
    b: "7f519eada7bda81bd826dba647910f8c4b9346ed8ccdc64e4b1abd11756dce1d2074aa263b88805ced70355a33b471ee",
    gx: "18de98b02db9a306f2afcd7235f72a819b80ab12ebd653172476fecd462aabffc4ff191b946a5f54d8d0aa2f418808cc",
    gy: "25ab056962d30651a114afd2755ad336747f93475b7a1fca3b88f2b6a208ccfe469408584dc2b2912675bf5b9e582928",
    n: "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7cf3ab6af6b7fc3103b883202e9046565",
    compress: true,
    twist: None,
};

const BRAINPOOL_P512R1: CurveConstants = CurveConstants {
    name: "brainpoolP512r1",
    oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.13"),
    p: "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca703308717d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f3",
    a: EquationA::Hex("7830a3318b603b89e2327145ac234cc594cbdd8d3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94ca"),
    b: "3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94cadc083e67984050b75ebae5dd2809bd638016f723",
    gx: "81aee4bdd82ed9645a21322e9c4c6a9385ed9f70b5d916c1b43b62eef4d0098eff3b1f78e2d0d48d50d1687b93b97d5f7c6d5047406a5e688b352209bcb9f822",
    gy: "7dde385d566332ecc0eabfa9cf7822fdf209f70024a57b1aa000c55b881f8111b2dcde494a5f485e5bca4bd88a2763aed1ca2b2fa8f0540678cd1e0f3ad80892",
    n: "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069",
    compress: false,
    twist: Some((
        CurveId::BrainpoolP512t1,
        "12ee58e6764838b69782136f0f2d3ba06e27695716054092e60a80bedb212b64e585d90bce13761f85c3f1d2a64e3be8fea2220f01eba5eeb0f35dbd29d922ab",
    )),
};

const BRAINPOOL_P512T1: CurveConstants = CurveConstants {
    name: "brainpoolP512t1",
    oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.14"),
    p: "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca703308717d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f3",
    a: EquationA::MinusThree,
    b: "7cbbbcf9441cfab76e1890e46884eae321f70c0bcb4981527897504bec3e36a62bcdfa2304976540f6450085f2dae145c22553b465763689180ea2571867423e",
    gx: "640ece5c12788717b9c1ba06cbc2a6feba85842458c56dde9db1758d39c0313d82ba51735cdb3ea499aa77a7d6943a64f7a3f25fe26f06b51baa2696fa9035da",
    gy: "5b534bd595f5af0fa2c892376c84ace1bb4e3019b71634c01131159cae03cee9d9932184beef216bd71df2dadf86a627306ecff96dbb8bace198b61e00f8b332",
    n: "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069",
    compress: true,
    twist: None,
};

impl CurveId {
    /// Every registered curve.
    pub const ALL: [CurveId; 11] = [
        CurveId::Secp224r1,
        CurveId::Prime256v1,
        CurveId::Secp384r1,
        CurveId::Secp521r1,
        CurveId::Secp256k1,
        CurveId::BrainpoolP256r1,
        CurveId::BrainpoolP256t1,
        CurveId::BrainpoolP384r1,
        CurveId::BrainpoolP384t1,
        CurveId::BrainpoolP512r1,
        CurveId::BrainpoolP512t1,
    ];

    pub(crate) fn constants(self) -> &'static CurveConstants {
        match self {
            Self::Secp224r1 => &SECP224R1,
            Self::Prime256v1 => &PRIME256V1,
            Self::Secp384r1 => &SECP384R1,
            Self::Secp521r1 => &SECP521R1,
            Self::Secp256k1 => &SECP256K1,
            Self::BrainpoolP256r1 => &BRAINPOOL_P256R1,
            Self::BrainpoolP256t1 => &BRAINPOOL_P256T1,
            Self::BrainpoolP384r1 => &BRAINPOOL_P384R1,
            Self::BrainpoolP384t1 => &BRAINPOOL_P384T1,
            Self::BrainpoolP512r1 => &BRAINPOOL_P512R1,
            Self::BrainpoolP512t1 => &BRAINPOOL_P512T1,
        }
    }

    /// Short algorithm name (OpenSSL spelling).
    pub fn name(self) -> &'static str {
        self.constants().name
    }

    /// Registered object identifier.
    pub fn oid(self) -> ObjectIdentifier {
        self.constants().oid
    }

    /// Looks a curve up by its short name.
    pub fn by_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.name() == name)
            .ok_or(Error::UnexpectedCurveType)
    }

    /// Looks a curve up by its object identifier.
    pub fn by_oid(oid: &ObjectIdentifier) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| &curve.oid() == oid)
            .ok_or(Error::OidCurveNotFound)
    }

    /// Whether ring members of this curve are folded in compressed SEC1
    /// form.
    pub fn compress_points(self) -> bool {
        self.constants().compress
    }

    /// Twisted parent curve and twist parameter `z` for R-type Brainpool
    /// curves.
    pub(crate) fn twist(self) -> Option<(CurveId, &'static str)> {
        self.constants().twist
    }
}

impl HashId {
    /// Every registered hash function.
    pub const ALL: [HashId; 4] = [
        HashId::Sha3_224,
        HashId::Sha3_256,
        HashId::Sha3_384,
        HashId::Sha3_512,
    ];

    /// Short algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
        }
    }

    /// Registered object identifier.
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            Self::Sha3_224 => ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.7"),
            Self::Sha3_256 => ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.8"),
            Self::Sha3_384 => ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.9"),
            Self::Sha3_512 => ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.10"),
        }
    }

    /// Digest length in octets.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha3_224 => 28,
            Self::Sha3_256 => 32,
            Self::Sha3_384 => 48,
            Self::Sha3_512 => 64,
        }
    }

    /// Looks a hash up by its short name.
    pub fn by_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|hash| hash.name() == name)
            .ok_or(Error::UnexpectedHashType)
    }

    /// Looks a hash up by its object identifier.
    pub fn by_oid(oid: &ObjectIdentifier) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|hash| &hash.oid() == oid)
            .ok_or(Error::OidHasherNotFound)
    }

    /// One-shot digest of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha3_224 => Sha3_224::digest(data).to_vec(),
            Self::Sha3_256 => Sha3_256::digest(data).to_vec(),
            Self::Sha3_384 => Sha3_384::digest(data).to_vec(),
            Self::Sha3_512 => Sha3_512::digest(data).to_vec(),
        }
    }
}

/// Whether the (curve, hash) pair may be used for signing and
/// verification. `secp256k1` scalar-base multiplication is restricted to
/// digests of at most 256 bits.
pub fn pairing_supported(curve: CurveId, hash: HashId) -> bool {
    match curve {
        CurveId::Secp256k1 => matches!(hash, HashId::Sha3_224 | HashId::Sha3_256),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn curve_lookups_round_trip() {
        for curve in CurveId::ALL {
            assert_eq!(CurveId::by_name(curve.name()), Ok(curve));
            assert_eq!(CurveId::by_oid(&curve.oid()), Ok(curve));
        }
        assert_eq!(CurveId::by_name("edwards25519"), Err(Error::UnexpectedCurveType));
    }

    #[test]
    fn hash_lookups_round_trip() {
        for hash in HashId::ALL {
            assert_eq!(HashId::by_name(hash.name()), Ok(hash));
            assert_eq!(HashId::by_oid(&hash.oid()), Ok(hash));
            assert_eq!(hash.digest(b"x").len(), hash.output_len());
        }
        assert_eq!(HashId::by_name("sha2-256"), Err(Error::UnexpectedHashType));
    }

    #[test]
    fn registered_oids() {
        assert_eq!(CurveId::Prime256v1.oid(), ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"));
        assert_eq!(CurveId::Secp256k1.oid(), ObjectIdentifier::new_unwrap("1.3.132.0.10"));
        assert_eq!(
            CurveId::BrainpoolP512t1.oid(),
            ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.14")
        );
        assert_eq!(HashId::Sha3_512.oid(), ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.10"));
    }

    #[test]
    fn secp256k1_pairing_restriction() {
        assert!(pairing_supported(CurveId::Secp256k1, HashId::Sha3_224));
        assert!(pairing_supported(CurveId::Secp256k1, HashId::Sha3_256));
        assert!(!pairing_supported(CurveId::Secp256k1, HashId::Sha3_384));
        assert!(!pairing_supported(CurveId::Secp256k1, HashId::Sha3_512));
        for hash in HashId::ALL {
            assert!(pairing_supported(CurveId::Prime256v1, hash));
            assert!(pairing_supported(CurveId::BrainpoolP512r1, hash));
        }
    }

    #[test]
    fn sha3_256_known_answer() {
        assert_eq!(
            HashId::Sha3_256.digest(b""),
            hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
        );
    }
}
