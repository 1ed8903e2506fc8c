//! # QAIL MySQL Auth
//!
//! Auth scrambles for proxies that log in to MySQL on a client's behalf.
//!
//! ## Quick Example
//!
//! ```rust
//! use qail_mysql_auth::compute_native_password_response;
//!
//! let salt = b"12345678901234567890"; // from the server greeting
//! let response = compute_native_password_response(b"secret", salt);
//! assert_eq!(response.len(), 20);
//! ```
//!
//! ## Plugins
//!
//! | Plugin                  | Digest | Response |
//! |-------------------------|--------|----------|
//! | `mysql_native_password` | SHA1   | 20 bytes |
//! | `caching_sha2_password` | SHA256 | 32 bytes |
//!
//! The scramble functions are pure and thread-safe. Parsing the greeting
//! and building the response body live in [`handshake`]; packet framing and
//! the connection itself belong to the caller.

pub mod auth;
pub mod config;
pub mod error;
pub mod handshake;
pub mod marshal;
pub mod plugin;

pub mod prelude {
    pub use crate::auth::{
        NATIVE_RESPONSE_LEN, SCRAMBLE_LEN, SHA2_RESPONSE_LEN, caching_sha2_password,
        mysql_native_password,
    };
    pub use crate::config::{AuthConfig, SaltPolicy};
    pub use crate::error::*;
    pub use crate::handshake::{Authenticator, HandshakeResponse, ServerGreeting};
    pub use crate::plugin::AuthPlugin;
}

/// Compute the `mysql_native_password` response for `password` and the
/// server's `salt`.
///
/// `SHA1(password) XOR SHA1(salt + SHA1(SHA1(password)))`. Never fails, and
/// always returns 20 bytes whatever the input lengths.
///
/// # Example
///
/// ```
/// use qail_mysql_auth::compute_native_password_response;
///
/// let a = compute_native_password_response(b"", b"12345678901234567890");
/// let b = compute_native_password_response(b" ", b"12345678901234567890");
/// assert_ne!(a, b);
/// ```
pub fn compute_native_password_response(
    password: &[u8],
    salt: &[u8],
) -> [u8; auth::NATIVE_RESPONSE_LEN] {
    auth::mysql_native_password(password, salt)
}
