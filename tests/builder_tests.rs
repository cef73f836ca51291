//! tests/builder_tests.rs
//! Session builder: defaults, overrides, clamping

mod common;

mod tests {
    use super::common::{TEST_ITERATIONS, TEST_PASSWORD, TEST_SALT};

    use passforge_rs::consts::{DEFAULT_ITERATIONS, DEFAULT_PASSWORD_LENGTH};
    use passforge_rs::{
        CancelToken, ExposeSecret, OutputEncoding, Outcome, PassforgeError, Prf, ScriptedClock,
        SessionBuilder,
    };

    fn password_of<C: passforge_rs::MonotonicClock>(
        session: &passforge_rs::DerivationSession<C>,
    ) -> String {
        match session.generate_password(&CancelToken::new()).unwrap() {
            Outcome::Complete(password) => password.expose_secret().clone(),
            Outcome::Cancelled => panic!("unexpected cancellation"),
        }
    }

    #[test]
    fn session_builder_defaults() {
        let session = SessionBuilder::new().build("hunter2", "example.com").unwrap();

        assert_eq!(session.iterations(), DEFAULT_ITERATIONS);
        assert_eq!(session.length(), DEFAULT_PASSWORD_LENGTH);
        assert_eq!(session.prf(), Prf::HmacSha1);
        assert_eq!(session.encoding(), OutputEncoding::Base64);
    }

    #[test]
    fn session_builder_default_trait() {
        let builder = SessionBuilder::default();
        assert_eq!(builder.iterations(), i64::from(DEFAULT_ITERATIONS));
        assert_eq!(builder.length(), DEFAULT_PASSWORD_LENGTH as i64);
    }

    #[test]
    fn session_builder_custom_params() {
        let cases = [
            (TEST_ITERATIONS, 8, Prf::HmacSha1, OutputEncoding::Base64),
            (TEST_ITERATIONS, 16, Prf::HmacSha256, OutputEncoding::Base64Url),
            (1, 40, Prf::HmacSha512, OutputEncoding::Hex),
        ];

        for (iterations, length, prf, encoding) in cases {
            let session = SessionBuilder::new()
                .with_iterations(iterations)
                .with_length(length)
                .with_prf(prf)
                .with_encoding(encoding)
                .build(TEST_PASSWORD, TEST_SALT)
                .unwrap();

            assert_eq!(password_of(&session).len(), length as usize);
            assert_eq!(session.prf(), prf);
        }
    }

    #[test]
    fn session_builder_clamps_at_build_time() {
        let builder = SessionBuilder::new().with_iterations(0).with_length(-3);
        // The builder keeps the raw request...
        assert_eq!(builder.iterations(), 0);
        assert_eq!(builder.length(), -3);

        // ...and the session sees the clamped one
        let session = builder.build(TEST_PASSWORD, TEST_SALT).unwrap();
        assert_eq!(session.iterations(), 1, "Iterations should clamp to 1");
        assert_eq!(session.length(), 1, "Length should clamp to 1");
    }

    #[test]
    fn session_builder_prf_by_name() {
        let session = SessionBuilder::new()
            .with_prf_name("HMACSHA256")
            .unwrap()
            .build(TEST_PASSWORD, TEST_SALT)
            .unwrap();
        assert_eq!(session.prf(), Prf::HmacSha256);

        let err = SessionBuilder::new().with_prf_name("HmacMD5").unwrap_err();
        assert_eq!(err, PassforgeError::UnsupportedAlgorithm("HmacMD5".into()));
    }

    #[test]
    fn session_builder_clone() {
        let builder1 = SessionBuilder::new()
            .with_iterations(TEST_ITERATIONS)
            .with_length(12);
        let builder2 = builder1.clone();

        assert_eq!(builder1.iterations(), builder2.iterations());
        assert_eq!(builder1.length(), builder2.length());

        let a = builder1.build("pw", "salt").unwrap();
        let b = builder2.build("pw", "salt").unwrap();
        assert_eq!(password_of(&a), password_of(&b));
    }

    #[test]
    fn session_builder_with_clock() {
        let session = SessionBuilder::new()
            .with_iterations(1)
            .with_clock(ScriptedClock::new([0, 1_250]))
            .build(TEST_PASSWORD, TEST_SALT)
            .unwrap();

        password_of(&session);
        assert_eq!(session.elapsed_seconds(), 1.25);
    }

    #[test]
    fn session_builder_rejects_empty_inputs() {
        assert!(matches!(
            SessionBuilder::new().build("", "salt"),
            Err(PassforgeError::InvalidParameter(_))
        ));
        assert!(matches!(
            SessionBuilder::new().build("pw", Vec::<u8>::new()),
            Err(PassforgeError::InvalidParameter(_))
        ));
    }
}
