//! Serialization round trips and codec failure paths.

use lsag::{
    create_signature, derive_public_key, fold_public_keys, generate_private_key,
    signature_key_image, verify_signature, CurveId, Error, FoldedKeys, Format, HashId, KeyOrder,
    PrivateKey, Signature,
};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

const MESSAGE: &[u8] = b"round trip";

struct Fixture {
    folded: Vec<u8>,
    signature: Vec<u8>,
}

fn fixture(format: Format, rng: &mut ChaCha20Rng) -> Fixture {
    let privates: Vec<Vec<u8>> = (0..3)
        .map(|_| generate_private_key("prime256v1", Format::Pem, rng).unwrap())
        .collect();
    let members: Vec<Vec<u8>> = privates
        .iter()
        .map(|key| derive_public_key(key, Format::Pem).unwrap())
        .collect();
    let folded = fold_public_keys(&members, "sha3-256", format, KeyOrder::Hashes).unwrap();
    let signature =
        create_signature(&folded, &privates[0], MESSAGE, b"case", format, rng).unwrap();
    Fixture { folded, signature }
}

#[test]
fn der_and_pem_blobs_verify() {
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    for format in [Format::Der, Format::Pem] {
        let fixture = fixture(format, &mut rng);
        assert_eq!(
            verify_signature(&fixture.folded, &fixture.signature, MESSAGE, b"case"),
            Ok(())
        );
        assert_eq!(
            verify_signature(&fixture.folded, &fixture.signature, MESSAGE, b"other"),
            Err(Error::IncorrectChecksum)
        );
    }
}

#[test]
fn signature_round_trips_bit_exactly() {
    let mut rng = ChaCha20Rng::seed_from_u64(32);
    let fixture = fixture(Format::Der, &mut rng);
    let signature = Signature::from_der(&fixture.signature).unwrap();
    assert_eq!(signature.to_der().unwrap(), fixture.signature);

    let pem = signature.to_pem().unwrap();
    let reparsed = Signature::from_pem(&pem).unwrap();
    assert_eq!(reparsed, signature);
    assert_eq!(reparsed.version(), lsag::SIGNATURE_VERSION);
    assert_eq!(reparsed.curve_oid(), &CurveId::Prime256v1.oid());
    assert_eq!(reparsed.hasher_oid(), &HashId::Sha3_256.oid());
    assert_eq!(reparsed.responses().len(), 3);
}

#[test]
fn folded_keys_round_trip_bit_exactly() {
    let mut rng = ChaCha20Rng::seed_from_u64(33);
    let fixture = fixture(Format::Der, &mut rng);
    let folded = FoldedKeys::from_der(&fixture.folded).unwrap();
    assert_eq!(folded.to_der().unwrap(), fixture.folded);

    let pem = folded.to_pem().unwrap();
    assert_eq!(FoldedKeys::from_pem(&pem).unwrap(), folded);
    assert_eq!(FoldedKeys::parse(&pem).unwrap(), folded);
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(34);
    let fixture = fixture(Format::Der, &mut rng);

    let mut signature = fixture.signature.clone();
    signature.push(0x00);
    assert!(matches!(
        Signature::from_der(&signature),
        Err(Error::UnexpectedRestOfSignature)
    ));

    let mut folded = fixture.folded.clone();
    folded.push(0x00);
    assert!(matches!(
        FoldedKeys::from_der(&folded),
        Err(Error::UnexpectedRestOfSignature)
    ));
}

#[test]
fn garbage_der_is_rejected() {
    assert!(matches!(
        Signature::from_der(b"not a signature"),
        Err(Error::Asn1UnmarshalFailed)
    ));
    assert!(matches!(
        FoldedKeys::from_der(&[0x30, 0x02, 0xff]),
        Err(Error::Asn1UnmarshalFailed)
    ));
}

#[test]
fn wrong_armor_labels_are_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(35);
    // a PUBLIC KEY block where a RING SIGNATURE is expected
    let private = generate_private_key("prime256v1", Format::Pem, &mut rng).unwrap();
    let public = derive_public_key(&private, Format::Pem).unwrap();
    assert!(matches!(
        Signature::parse(&public),
        Err(Error::DecodePemFailure)
    ));
    assert!(matches!(
        FoldedKeys::parse(&public),
        Err(Error::DecodePemFailure)
    ));
    assert!(matches!(
        verify_signature(&public, &public, MESSAGE, b""),
        Err(Error::DecodePemFailure)
    ));
}

#[test]
fn key_image_extraction_matches_the_parsed_signature() {
    let mut rng = ChaCha20Rng::seed_from_u64(36);
    let fixture = fixture(Format::Pem, &mut rng);
    let signature = Signature::parse(&fixture.signature).unwrap();

    let plain = signature_key_image(&fixture.signature, false).unwrap();
    assert_eq!(plain, signature.key_image().to_hex(false));
    assert!(!plain.contains(':'));

    let grouped = signature_key_image(&fixture.signature, true).unwrap();
    assert_eq!(grouped.matches(':').count(), plain.len() / 2 - 1);
}

#[test]
fn pem_headers_are_informational_only() {
    let mut rng = ChaCha20Rng::seed_from_u64(37);
    let fixture = fixture(Format::Pem, &mut rng);
    let text = String::from_utf8(fixture.signature.clone()).unwrap();
    assert!(text.starts_with("-----BEGIN RING SIGNATURE-----"));
    assert!(text.contains("CurveName: prime256v1"));
    assert!(text.contains("HasherName: sha3-256"));
    assert!(text.contains("NumberOfKeys: 3"));

    // Mangling a header value must not change the parsed signature.
    let mangled = text.replace("CurveName: prime256v1", "CurveName: edwards25519");
    assert_eq!(
        Signature::parse(mangled.as_bytes()).unwrap(),
        Signature::parse(&fixture.signature).unwrap()
    );
}

#[test]
fn marshalled_private_keys_interoperate() {
    let mut rng = ChaCha20Rng::seed_from_u64(38);
    let key = PrivateKey::random(CurveId::Secp521r1, &mut rng);
    let der = lsag::marshal_private_key(&key, Format::Der).unwrap();
    let parsed = lsag::parse_private_key(&der).unwrap();
    assert_eq!(parsed.public_key(), key.public_key());
    assert_eq!(parsed.curve(), CurveId::Secp521r1);
}
