//! Shared constants for end-to-end tests.

/// Email of the pre-seeded regular test user.
pub const TEST_EMAIL: &str = "tester@example.com";

/// Password of the pre-seeded regular test user.
pub const TEST_PASS: &str = "test-password-123";

/// JWT secret used by every test server.
pub const TEST_JWT_SECRET: &str = "e2e-test-secret";

/// Per-request timeout for the test HTTP client.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
