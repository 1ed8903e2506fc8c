use pretty_assertions::{assert_eq, assert_ne};
use qail_mysql_auth::compute_native_password_response;
use qail_mysql_auth::prelude::*;

const SALT: &[u8; 20] = b"12345678901234567890";

#[test]
fn test_interop_vector() {
    let salt = b"NR3HP:qIYa_9=db?Sd{`";
    let response = compute_native_password_response(b"G!ider27", salt);
    assert_eq!(
        response,
        [
            0x09, 0xcf, 0xf8, 0x85, 0x5e, 0x9e, 0x70, 0x53, 0x40, 0xff, 0x22, 0x70, 0xd8, 0xfb,
            0x9f, 0xad, 0xba, 0x90, 0x6b, 0x70,
        ]
    );
}

#[test]
fn test_password_vector() {
    let response = compute_native_password_response(b"password", SALT);
    assert_eq!(
        response,
        [
            0x19, 0x57, 0xdc, 0xe2, 0x72, 0x42, 0x82, 0xe0, 0x18, 0xf4, 0x0d, 0x90, 0x58, 0x24,
            0xcb, 0x63, 0x61, 0xf8, 0x8d, 0x41,
        ]
    );
}

#[test]
fn test_length_invariant() {
    let long = vec![b'x'; 64 * 1024];
    for password in [&b""[..], &b"a"[..], &long[..]] {
        for salt in [&b""[..], &b"s"[..], &SALT[..], &[0x5a; 40][..]] {
            assert_eq!(
                compute_native_password_response(password, salt).len(),
                NATIVE_RESPONSE_LEN
            );
        }
    }
}

#[test]
fn test_single_bit_sensitivity() {
    let password = b"secret".to_vec();
    let base = compute_native_password_response(&password, SALT);

    for i in 0..password.len() {
        for bit in 0..8 {
            let mut flipped = password.clone();
            flipped[i] ^= 1 << bit;
            assert_ne!(compute_native_password_response(&flipped, SALT), base);
        }
    }

    for i in 0..SALT.len() {
        for bit in 0..8 {
            let mut flipped = *SALT;
            flipped[i] ^= 1 << bit;
            assert_ne!(compute_native_password_response(&password, &flipped), base);
        }
    }
}

#[test]
fn test_empty_password_differs_from_space() {
    let empty = compute_native_password_response(b"", SALT);
    assert_eq!(empty, compute_native_password_response(b"", SALT));
    assert_ne!(empty, compute_native_password_response(b" ", SALT));
}

#[test]
fn test_non_utf8_password() {
    let response = compute_native_password_response(&[0xff, 0x00, 0xfe, 0x80], SALT);
    assert_eq!(response.len(), NATIVE_RESPONSE_LEN);
    assert_ne!(response, compute_native_password_response(&[0xff], SALT));
}

#[test]
fn test_concurrent_callers_agree() {
    let expected = compute_native_password_response(b"secret", SALT);
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| compute_native_password_response(b"secret", SALT)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_authenticator_matches_core() {
    let auth = Authenticator::new(AuthConfig::default());
    let response = auth
        .auth_response(AuthPlugin::NativePassword, b"secret", SALT)
        .unwrap();
    assert_eq!(response, compute_native_password_response(b"secret", SALT).to_vec());
}
