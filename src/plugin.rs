//! Supported MySQL auth plugins.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::auth::{
    NATIVE_RESPONSE_LEN, SHA2_RESPONSE_LEN, caching_sha2_password, mysql_native_password,
};
use crate::error::{AuthError, AuthResult};

/// Auth plugin a server advertises in its greeting, or a proxy is configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum AuthPlugin {
    #[default]
    #[serde(rename = "mysql_native_password")]
    NativePassword,
    #[serde(rename = "caching_sha2_password")]
    CachingSha2Password,
}

impl AuthPlugin {
    /// Look up a plugin by its wire name.
    pub fn from_name(name: &str) -> AuthResult<Self> {
        match name {
            "mysql_native_password" => Ok(Self::NativePassword),
            "caching_sha2_password" => Ok(Self::CachingSha2Password),
            other => Err(AuthError::UnsupportedPlugin(other.to_string())),
        }
    }

    /// Wire name, as sent in the greeting and the handshake response.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NativePassword => "mysql_native_password",
            Self::CachingSha2Password => "caching_sha2_password",
        }
    }

    pub fn response_len(&self) -> usize {
        match self {
            Self::NativePassword => NATIVE_RESPONSE_LEN,
            Self::CachingSha2Password => SHA2_RESPONSE_LEN,
        }
    }

    /// Scramble `password` with `salt` using this plugin's transform.
    pub fn scramble(&self, password: &[u8], salt: &[u8]) -> Vec<u8> {
        match self {
            Self::NativePassword => mysql_native_password(password, salt).to_vec(),
            Self::CachingSha2Password => caching_sha2_password(password, salt).to_vec(),
        }
    }
}

impl fmt::Display for AuthPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthPlugin {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_names() {
        for plugin in [AuthPlugin::NativePassword, AuthPlugin::CachingSha2Password] {
            assert_eq!(AuthPlugin::from_name(plugin.name()).unwrap(), plugin);
            assert_eq!(plugin.to_string(), plugin.name());
        }
    }

    #[test]
    fn test_unsupported_plugin() {
        let err = "sha256_password".parse::<AuthPlugin>().unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedPlugin(ref name) if name == "sha256_password"));
    }

    #[test]
    fn test_scramble_len() {
        let salt = b"12345678901234567890";
        for plugin in [AuthPlugin::NativePassword, AuthPlugin::CachingSha2Password] {
            assert_eq!(plugin.scramble(b"pw", salt).len(), plugin.response_len());
        }
        assert_eq!(
            AuthPlugin::NativePassword.scramble(b"pw", salt),
            mysql_native_password(b"pw", salt).to_vec()
        );
    }
}
