//! Auth configuration.
//!
//! ```toml
//! plugin = "mysql_native_password"
//! salt_policy = "strict"
//! follow_server_plugin = false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::auth::SCRAMBLE_LEN;
use crate::error::{AuthError, AuthResult};
use crate::plugin::AuthPlugin;

/// How strictly the salt length is checked before scrambling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltPolicy {
    /// Hash whatever the server sent.
    #[default]
    Permissive,
    /// Reject salts that are not exactly 20 bytes.
    Strict,
}

/// Main auth configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Plugin used to answer every greeting
    #[serde(default)]
    pub plugin: AuthPlugin,

    /// Salt length policy
    #[serde(default)]
    pub salt_policy: SaltPolicy,

    /// Answer with the server's advertised plugin when supported,
    /// using `plugin` only as a fallback
    #[serde(default)]
    pub follow_server_plugin: bool,
}

impl AuthConfig {
    /// Create a new configuration builder
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AuthResult<Self> {
        toml::from_str(content)
            .map_err(|e| AuthError::Config(format!("Failed to parse auth config: {}", e)))
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> AuthResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded auth config from {}: plugin={}, salt_policy={:?}",
            path.display(),
            config.plugin,
            config.salt_policy
        );
        Ok(config)
    }

    /// Enforce the salt policy.
    pub fn check_salt(&self, salt: &[u8]) -> AuthResult<()> {
        match self.salt_policy {
            SaltPolicy::Strict if salt.len() != SCRAMBLE_LEN => {
                Err(AuthError::salt_length(SCRAMBLE_LEN, salt.len()))
            }
            _ => Ok(()),
        }
    }
}

/// Builder for AuthConfig
#[derive(Debug, Default)]
pub struct AuthConfigBuilder {
    config: AuthConfig,
}

impl AuthConfigBuilder {
    /// Set the plugin
    pub fn plugin(mut self, plugin: AuthPlugin) -> Self {
        self.config.plugin = plugin;
        self
    }

    /// Set the salt policy
    pub fn salt_policy(mut self, policy: SaltPolicy) -> Self {
        self.config.salt_policy = policy;
        self
    }

    /// Prefer the plugin the server advertises
    pub fn follow_server_plugin(mut self, follow: bool) -> Self {
        self.config.follow_server_plugin = follow;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AuthConfig {
        self.config
    }
}
