//! Public secret-key token generation.

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of a generated secret key in characters.
pub const SECRET_KEY_LEN: usize = 32;

/// Generates a random secret key: 32 characters drawn uniformly from the
/// 62-symbol alphabet `[A-Za-z0-9]` using the OS CSPRNG (~190 bits of
/// entropy).
///
/// Stateless — uniqueness against the store is the caller's job, which
/// retries on collision.
pub fn generate_secret_key() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(SECRET_KEY_LEN)
        .map(char::from)
        .collect()
}

/// Whether `key` has the shape of a generated secret key.
///
/// Lets callers reject malformed input without a store round-trip. A
/// well-formed key is not necessarily an existing one.
pub fn is_well_formed(key: &str) -> bool {
    key.len() == SECRET_KEY_LEN && key.bytes().all(|b| b.is_ascii_alphanumeric())
}
