//! tests/hmac_tests.rs
//! HMAC primitive: RFC 2202 / RFC 4231 vectors and PRF name resolution

use hex_literal::hex;
use passforge_rs::{hmac, hmac_named, PassforgeError, Prf};

#[test]
fn rfc2202_hmac_sha1() {
    let digest = hmac(Prf::HmacSha1, &[0x0b; 20], b"Hi There").unwrap();
    assert_eq!(digest, hex!("b617318655057264e28bc0b6fb378c8ef146be00"));

    let digest = hmac(Prf::HmacSha1, b"Jefe", b"what do ya want for nothing?").unwrap();
    assert_eq!(digest, hex!("effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"));

    // Key longer than the 64-byte block is hashed first
    let digest = hmac(
        Prf::HmacSha1,
        &[0xaa; 80],
        b"Test Using Larger Than Block-Size Key - Hash Key First",
    )
    .unwrap();
    assert_eq!(digest, hex!("aa4ae5e15272d00e95705637ce8a3b55ed402112"));
}

#[test]
fn rfc4231_hmac_sha2() {
    let digest = hmac(Prf::HmacSha256, &[0x0b; 20], b"Hi There").unwrap();
    assert_eq!(
        digest,
        hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
    );

    let digest = hmac(Prf::HmacSha512, &[0x0b; 20], b"Hi There").unwrap();
    assert_eq!(
        digest,
        hex!(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde"
            "daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        )
    );

    let digest = hmac(
        Prf::HmacSha256,
        &[0xaa; 131],
        b"Test Using Larger Than Block-Size Key - Hash Key First",
    )
    .unwrap();
    assert_eq!(
        digest,
        hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
    );
}

#[test]
fn digest_length_matches_prf() {
    for prf in Prf::ALL {
        let digest = hmac(prf, b"key", b"message").unwrap();
        assert_eq!(digest.len(), prf.output_len(), "{prf} digest length");
    }
}

#[test]
fn prf_names_resolve() {
    let cases = [
        ("HMACSHA1", Prf::HmacSha1),
        ("HmacSHA1", Prf::HmacSha1),
        ("hmac-sha1", Prf::HmacSha1),
        ("HMAC_SHA256", Prf::HmacSha256),
        ("sha512", Prf::HmacSha512),
    ];
    for (name, expected) in cases {
        assert_eq!(name.parse::<Prf>().unwrap(), expected, "{name}");
    }
    for prf in Prf::ALL {
        assert_eq!(prf.to_string().parse::<Prf>().unwrap(), prf);
    }
}

#[test]
fn unknown_prf_is_unsupported() {
    for name in ["HmacMD5", "", "sha3-256"] {
        match name.parse::<Prf>() {
            Err(PassforgeError::UnsupportedAlgorithm(reported)) => assert_eq!(reported, name),
            other => panic!("{name:?} resolved to {other:?}"),
        }
    }

    assert!(matches!(
        hmac_named("HmacWhirlpool", b"key", b"message"),
        Err(PassforgeError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn named_and_typed_paths_agree() {
    let typed = hmac(Prf::HmacSha256, b"key", b"message").unwrap();
    let named = hmac_named("HmacSHA256", b"key", b"message").unwrap();
    assert_eq!(typed, named);
}

#[test]
fn default_prf_is_legacy_sha1() {
    assert_eq!(Prf::default(), Prf::HmacSha1);
    assert_eq!(passforge_rs::consts::DEFAULT_PRF, Prf::HmacSha1);
    assert_eq!(Prf::HmacSha1.output_len(), 20);
}
