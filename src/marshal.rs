//! Conversions at the boundary between raw byte buffers and hosts that
//! speak NUL-terminated strings.
//!
//! A scramble is arbitrary binary data and may contain 0x00. Every helper
//! here either hands back the bytes intact or fails; none truncates.

use std::ffi::CString;

use crate::error::{AuthError, AuthResult};

/// Bytes of a NUL-terminated buffer, without the terminator.
///
/// Fails if there is no terminator, or if anything but padding NULs follows
/// it (bytes a C string reader would silently drop).
pub fn from_nul_terminated(buf: &[u8]) -> AuthResult<&[u8]> {
    let end = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| AuthError::Marshaling("missing NUL terminator".into()))?;

    if buf[end..].iter().any(|&b| b != 0) {
        return Err(AuthError::Marshaling(format!(
            "embedded NUL at offset {} would truncate {} bytes",
            end,
            buf.len() - end
        )));
    }
    Ok(&buf[..end])
}

/// Wrap bytes in a C string, refusing input that contains a NUL.
pub fn to_c_string(bytes: &[u8]) -> AuthResult<CString> {
    CString::new(bytes).map_err(|e| {
        AuthError::Marshaling(format!(
            "embedded NUL at offset {} cannot be represented as a C string",
            e.nul_position()
        ))
    })
}
