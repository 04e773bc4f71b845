/**
 * Password Digests
 *
 * A password is never stored. At registration a random 64-byte salt is
 * generated and the stored digest is `HMAC-SHA512(key = salt, msg =
 * password)`. The salt is the HMAC key, so a digest can only ever be
 * verified with the salt of the account it belongs to, and precomputed
 * table attacks do not apply.
 *
 * Verification goes through `Mac::verify_slice`, which compares in
 * constant time. A plain byte-by-byte comparison that bails on the first
 * mismatch leaks timing information and is not used here.
 */

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;

/// Salt length in bytes. Matches the HMAC-SHA512 block-derived key size.
pub const SALT_LEN: usize = 64;

/// Digest length in bytes (SHA-512 output).
pub const DIGEST_LEN: usize = 64;

type HmacSha512 = Hmac<Sha512>;

/// Generate a fresh random salt for a new account.
pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Compute the digest of `password` keyed by `salt`.
///
/// Deterministic: the same salt and password always produce the same
/// digest. This is what makes login verification possible.
pub fn compute_digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut mac = HmacSha512::new_from_slice(salt).expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Check `password` against a stored digest using the account's own salt.
///
/// The comparison is constant-time regardless of where the digests differ.
pub fn verify_password(salt: &[u8], expected_digest: &[u8], password: &str) -> bool {
    let mut mac = HmacSha512::new_from_slice(salt).expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    mac.verify_slice(expected_digest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let salt = generate_salt();
        let a = compute_digest(&salt, "pw123");
        let b = compute_digest(&salt, "pw123");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_has_fixed_length() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_LEN);
        assert_eq!(compute_digest(&salt, "pw123").len(), DIGEST_LEN);
        assert_eq!(compute_digest(&salt, "").len(), DIGEST_LEN);
    }

    #[test]
    fn test_different_salts_produce_different_digests() {
        let salt_a = generate_salt();
        let salt_b = generate_salt();
        assert_ne!(salt_a, salt_b);
        assert_ne!(
            compute_digest(&salt_a, "pw123"),
            compute_digest(&salt_b, "pw123")
        );
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let salt = generate_salt();
        let digest = compute_digest(&salt, "pw123");
        assert!(verify_password(&salt, &digest, "pw123"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let salt = generate_salt();
        let digest = compute_digest(&salt, "pw123");
        assert!(!verify_password(&salt, &digest, "pw124"));
        assert!(!verify_password(&salt, &digest, ""));
    }

    #[test]
    fn test_verify_requires_matching_salt() {
        let salt = generate_salt();
        let other_salt = generate_salt();
        let digest = compute_digest(&salt, "pw123");
        assert!(!verify_password(&other_salt, &digest, "pw123"));
    }
}
