//! tests/common.rs
//! Common constants and helpers shared across test files

/// Fast iteration count for tests - performance testing is in benches/
#[allow(dead_code)] // Used across multiple test files
pub const TEST_ITERATIONS: i64 = 5;

/// RFC 6070 password and salt
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "password";
#[allow(dead_code)]
pub const TEST_SALT: &[u8] = b"salt";

/// PBKDF2-HMAC-SHA1("password", "salt", 1, 20) from RFC 6070
#[allow(dead_code)]
pub const RFC6070_ONE_ITERATION: [u8; 20] = [
    0x0c, 0x60, 0xc8, 0x0f, 0x96, 0x1f, 0x0e, 0x71, 0xf3, 0xa9, 0xb5, 0x24, 0xaf, 0x60, 0x12, 0x06,
    0x2f, 0xe0, 0x37, 0xa6,
];

/// Enough iterations that a derivation is certain to still be running when
/// a test cancels it.
#[allow(dead_code)]
pub const ENDLESS_ITERATIONS: i64 = u32::MAX as i64;

/// Spin until `session` has recorded its start timestamp.
#[allow(dead_code)]
pub fn wait_for_start<C: passforge_rs::MonotonicClock>(
    session: &passforge_rs::DerivationSession<C>,
) {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    while session.current_elapsed_seconds().is_nan() {
        assert!(
            std::time::Instant::now() < deadline,
            "derivation never started"
        );
        std::thread::yield_now();
    }
}
