//! Status taxonomy shared by every operation.

use core::fmt;

/// Result type with the ring-signature [`Error`] status.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure statuses of signing, verification and codec operations.
///
/// The discriminants are the wire-stable numeric codes surfaced to
/// callers; zero is reserved for success.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum Error {
    /// The ring member at the signer position does not match the private key.
    PrivateKeyNotFitPublic = 1,
    /// Rings need at least two members.
    InsufficientPublicKeys = 2,
    /// The signer position is outside the ring.
    PrivateKeyPositionOutOfRange = 3,
    /// None of the ring members matches the private key.
    PrivateKeyNotFoundAmongPublicKeys = 4,
    /// A key uses a different curve than the rest of the ring, or the
    /// requested curve name is unknown.
    UnexpectedCurveType = 5,
    /// Unknown hash name.
    UnexpectedHashType = 6,
    /// The number of response scalars does not match the ring size.
    IncorrectNumberOfSignatures = 7,
    /// The key image is not a point on the signature's curve.
    InvalidKeyImage = 8,
    /// The challenge chain does not close back onto the checksum.
    IncorrectChecksum = 9,
    /// The hash OID is not registered.
    OidHasherNotFound = 10,
    /// The curve OID is not registered.
    OidCurveNotFound = 11,
    /// The (curve, hash) pair is not allowed.
    UnsupportedCurveHashCombination = 12,
    /// The point search of the hash-to-curve mapping exhausted its attempts.
    PointNotFound = 13,
    /// Text armor was malformed or carried an unexpected label.
    DecodePemFailure = 14,
    /// Trailing bytes after a DER structure.
    UnexpectedRestOfSignature = 15,
    /// DER encoding failed.
    Asn1MarshalFailed = 16,
    /// Armoring failed.
    EncodePemFailed = 17,
    /// A decoded point does not lie on its curve.
    InvalidPointCoordinates = 18,
    /// Point coordinates were absent or malformed.
    NilPointCoordinates = 19,
    /// RFC 5915 private key parsing failed.
    ParseEcPrivateKeyFailure = 20,
    /// DER decoding failed.
    Asn1UnmarshalFailed = 21,
    /// SubjectPublicKeyInfo encoding failed.
    MarshalPkixPublicKeyFailed = 22,
    /// SubjectPublicKeyInfo parsing failed.
    ParsePkixPublicKeyFailed = 23,
    /// Key generation failed.
    CreateKeyFailed = 24,
    /// Private key encoding failed.
    MarshalKeyFailed = 25,
}

impl Error {
    /// Numeric status code carried on the external interface.
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PrivateKeyNotFitPublic => "private key does not fit the public key",
            Self::InsufficientPublicKeys => "insufficient number of public keys",
            Self::PrivateKeyPositionOutOfRange => "private key position out of range",
            Self::PrivateKeyNotFoundAmongPublicKeys => {
                "private key not found among public keys"
            }
            Self::UnexpectedCurveType => "unexpected curve type",
            Self::UnexpectedHashType => "unexpected hash type",
            Self::IncorrectNumberOfSignatures => "incorrect number of signatures",
            Self::InvalidKeyImage => "invalid key image",
            Self::IncorrectChecksum => "incorrect checksum",
            Self::OidHasherNotFound => "OID hasher not found",
            Self::OidCurveNotFound => "OID curve not found",
            Self::UnsupportedCurveHashCombination => "unsupported curve and hash combination",
            Self::PointNotFound => "no curve point was found for the input",
            Self::DecodePemFailure => "PEM decoding failed",
            Self::UnexpectedRestOfSignature => "unexpected trailing bytes",
            Self::Asn1MarshalFailed => "ASN.1 encoding failed",
            Self::EncodePemFailed => "PEM encoding failed",
            Self::InvalidPointCoordinates => "invalid point coordinates",
            Self::NilPointCoordinates => "missing point coordinates",
            Self::ParseEcPrivateKeyFailure => "EC private key parsing failed",
            Self::Asn1UnmarshalFailed => "ASN.1 decoding failed",
            Self::MarshalPkixPublicKeyFailed => "PKIX public key encoding failed",
            Self::ParsePkixPublicKeyFailed => "PKIX public key parsing failed",
            Self::CreateKeyFailed => "key generation failed",
            Self::MarshalKeyFailed => "private key encoding failed",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Error::PrivateKeyNotFitPublic.code(), 1);
        assert_eq!(Error::UnsupportedCurveHashCombination.code(), 12);
        assert_eq!(Error::PointNotFound.code(), 13);
        assert_eq!(Error::MarshalKeyFailed.code(), 25);
    }
}
