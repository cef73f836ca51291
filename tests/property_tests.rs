//! tests/property_tests.rs
//! Property checks over lengths, encodings and clamping

use passforge_rs::{
    CancelToken, DerivationSession, ExposeSecret, OutputEncoding, Outcome, SessionBuilder,
};
use proptest::prelude::*;

fn encoding_strategy() -> impl Strategy<Value = OutputEncoding> {
    prop_oneof![
        Just(OutputEncoding::Base64),
        Just(OutputEncoding::Base64Url),
        Just(OutputEncoding::Hex),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_password_has_exact_length(
        length in 1i64..=160,
        encoding in encoding_strategy(),
        password in "[ -~]{1,24}",
    ) {
        let session = SessionBuilder::new()
            .with_iterations(2)
            .with_length(length)
            .with_encoding(encoding)
            .build(password, "proptest-salt")
            .unwrap();

        let generated = match session.generate_password(&CancelToken::new()).unwrap() {
            Outcome::Complete(generated) => generated,
            Outcome::Cancelled => panic!("unexpected cancellation"),
        };
        prop_assert_eq!(generated.expose_secret().len(), length as usize);
    }

    #[test]
    fn non_positive_inputs_match_the_unit_case(
        iterations in i64::MIN..=0,
        length in i64::MIN..=0,
    ) {
        let clamped = DerivationSession::new("password", "salt", iterations, length).unwrap();
        let unit = DerivationSession::new("password", "salt", 1, 1).unwrap();

        let a = clamped.generate_password(&CancelToken::new()).unwrap().complete().unwrap();
        let b = unit.generate_password(&CancelToken::new()).unwrap().complete().unwrap();
        prop_assert_eq!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn longer_output_extends_shorter(short in 1i64..40, extra in 1i64..40) {
        let a = DerivationSession::new("master", "site", 3, short).unwrap();
        let b = DerivationSession::new("master", "site", 3, short + extra).unwrap();

        let a = a.generate_password(&CancelToken::new()).unwrap().complete().unwrap();
        let b = b.generate_password(&CancelToken::new()).unwrap().complete().unwrap();
        prop_assert!(b.expose_secret().starts_with(a.expose_secret().as_str()));
    }
}
