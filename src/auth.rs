//! MySQL authentication scrambles.
//!
//! Implements:
//! - mysql_native_password (SHA1-based, legacy)
//! - caching_sha2_password (SHA256-based, MySQL 8+)
//!
//! Both are pure: no logging, no state, no allocation beyond the fixed
//! digest buffers. Safe to call from any number of connections at once.

use sha1::{Digest, Sha1};
use sha2::Sha256;

/// Length of the scramble (salt) a MySQL server sends in its greeting.
pub const SCRAMBLE_LEN: usize = 20;

/// Length of a mysql_native_password response (one SHA1 digest).
pub const NATIVE_RESPONSE_LEN: usize = 20;

/// Length of a caching_sha2_password response (one SHA256 digest).
pub const SHA2_RESPONSE_LEN: usize = 32;

/// `a XOR b`, byte by byte. Both are digests of length `N`.
fn xor_digests<const N: usize>(a: &[u8], b: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
        *o = x ^ y;
    }
    out
}

/// Compute mysql_native_password authentication response (legacy).
///
/// Formula: SHA1(password) XOR SHA1(salt + SHA1(SHA1(password)))
///
/// The salt is usually [`SCRAMBLE_LEN`] bytes but any length is hashed as-is.
/// An empty password still produces a full 20-byte response; sending an empty
/// auth response for empty passwords is the caller's decision.
pub fn mysql_native_password(password: &[u8], salt: &[u8]) -> [u8; NATIVE_RESPONSE_LEN] {
    let stage1 = Sha1::digest(password);
    let stage2 = Sha1::digest(stage1);

    let mut hasher = Sha1::new();
    hasher.update(salt);
    hasher.update(stage2);
    let stage3 = hasher.finalize();

    xor_digests(&stage1, &stage3)
}

/// Compute caching_sha2_password authentication response (MySQL 8+).
///
/// Formula: SHA256(password) XOR SHA256(SHA256(SHA256(password)) + salt)
///
/// Only sent when configured, or when following a server that advertises it.
/// The scramble is the fast-auth path; a server with a cold cache will still
/// ask for the full exchange, which is left to the caller.
pub fn caching_sha2_password(password: &[u8], salt: &[u8]) -> [u8; SHA2_RESPONSE_LEN] {
    let stage1 = Sha256::digest(password);
    let stage2 = Sha256::digest(stage1);

    // salt goes last here, unlike native
    let stage3 = Sha256::new().chain_update(stage2).chain_update(salt).finalize();

    xor_digests(&stage1, &stage3)
}
