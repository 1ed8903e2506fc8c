//! Handshake packet bodies a proxy needs around the scramble.
//!
//! Covers only:
//! - Initial Handshake v10 (server greeting), to get the salt
//! - Handshake Response 41 (client auth), to carry the scramble
//!
//! Packet headers (3-byte length + sequence id) are left to the caller.

use bytes::{BufMut, BytesMut};

use crate::auth::SCRAMBLE_LEN;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::marshal::to_c_string;
use crate::plugin::AuthPlugin;

pub const CLIENT_CONNECT_WITH_DB: u32 = 0x0000_0008;
pub const CLIENT_PROTOCOL_41: u32 = 0x0000_0200;
pub const CLIENT_SECURE_CONNECTION: u32 = 0x0000_8000;
pub const CLIENT_PLUGIN_AUTH: u32 = 0x0008_0000;

/// Largest packet the client announces it will accept.
const MAX_PACKET_SIZE: u32 = 16_777_215;

fn take<'a>(buf: &mut &'a [u8], n: usize, field: &'static str) -> AuthResult<&'a [u8]> {
    if buf.len() < n {
        return Err(AuthError::truncated(field));
    }
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

fn read_u8(buf: &mut &[u8], field: &'static str) -> AuthResult<u8> {
    Ok(take(buf, 1, field)?[0])
}

fn read_u16_le(buf: &mut &[u8], field: &'static str) -> AuthResult<u16> {
    let b = take(buf, 2, field)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32_le(buf: &mut &[u8], field: &'static str) -> AuthResult<u32> {
    let b = take(buf, 4, field)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Read null-terminated string, consuming the terminator.
fn read_null_string<'a>(buf: &mut &'a [u8], field: &'static str) -> AuthResult<&'a [u8]> {
    let end = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| AuthError::truncated(field))?;
    let s = &buf[..end];
    *buf = &buf[end + 1..];
    Ok(s)
}

/// Initial handshake packet from server.
#[derive(Debug, Clone)]
pub struct ServerGreeting {
    pub protocol_version: u8,
    pub server_version: String,
    pub connection_id: u32,
    pub capability_flags: u32,
    pub character_set: u8,
    pub status_flags: u16,
    pub auth_plugin_name: Option<String>,
    scramble: Vec<u8>,
}

impl ServerGreeting {
    pub fn parse(data: &[u8]) -> AuthResult<Self> {
        let mut buf = data;

        let protocol_version = read_u8(&mut buf, "protocol version")?;
        if protocol_version != 10 {
            return Err(AuthError::Protocol(format!(
                "unsupported handshake protocol version {}",
                protocol_version
            )));
        }

        let server_version =
            String::from_utf8_lossy(read_null_string(&mut buf, "server version")?).into_owned();
        let connection_id = read_u32_le(&mut buf, "connection id")?;

        // Auth plugin data part 1
        let mut scramble = take(&mut buf, 8, "auth plugin data")?.to_vec();
        take(&mut buf, 1, "filler")?;

        let cap_lower = read_u16_le(&mut buf, "capability flags")? as u32;
        let character_set = read_u8(&mut buf, "character set")?;
        let status_flags = read_u16_le(&mut buf, "status flags")?;
        let cap_upper = read_u16_le(&mut buf, "capability flags")? as u32;
        let capability_flags = cap_lower | (cap_upper << 16);

        let auth_data_len = read_u8(&mut buf, "auth plugin data length")? as usize;
        take(&mut buf, 10, "reserved")?;

        if capability_flags & CLIENT_SECURE_CONNECTION != 0 {
            let part2_len = auth_data_len.saturating_sub(8).max(13);
            let part2 = take(&mut buf, part2_len, "auth plugin data")?;
            // part 2 carries the scramble's NUL terminator
            let part2 = part2.strip_suffix(&[0]).unwrap_or(part2);
            scramble.extend_from_slice(part2);
        }

        let auth_plugin_name = if capability_flags & CLIENT_PLUGIN_AUTH != 0 {
            // Some servers omit the final terminator.
            let name = match buf.iter().position(|&b| b == 0) {
                Some(end) => &buf[..end],
                None => buf,
            };
            Some(String::from_utf8_lossy(name).into_owned())
        } else {
            None
        };

        Ok(Self {
            protocol_version,
            server_version,
            connection_id,
            capability_flags,
            character_set,
            status_flags,
            auth_plugin_name,
            scramble,
        })
    }

    /// The challenge to scramble the password with.
    pub fn salt(&self) -> &[u8] {
        &self.scramble
    }

    /// The advertised plugin, if any and if supported.
    pub fn auth_plugin(&self) -> Option<AuthPlugin> {
        self.auth_plugin_name
            .as_deref()
            .and_then(|name| AuthPlugin::from_name(name).ok())
    }
}

/// Handshake response (client authentication).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeResponse {
    pub username: String,
    pub auth_response: Vec<u8>,
    pub database: Option<String>,
    pub character_set: u8,
    pub plugin: AuthPlugin,
}

impl HandshakeResponse {
    pub fn capability_flags(&self) -> u32 {
        let mut caps = CLIENT_PROTOCOL_41 | CLIENT_SECURE_CONNECTION | CLIENT_PLUGIN_AUTH;
        if self.database.is_some() {
            caps |= CLIENT_CONNECT_WITH_DB;
        }
        caps
    }

    /// Encode the packet body. The auth response is copied verbatim.
    pub fn encode(&self) -> AuthResult<BytesMut> {
        let auth_len = u8::try_from(self.auth_response.len()).map_err(|_| {
            AuthError::InvalidArgument(format!(
                "auth response of {} bytes does not fit a 1-byte length",
                self.auth_response.len()
            ))
        })?;

        let mut buf = BytesMut::with_capacity(128);

        buf.put_u32_le(self.capability_flags());
        buf.put_u32_le(MAX_PACKET_SIZE);
        buf.put_u8(self.character_set);

        // Reserved (23 bytes)
        buf.put_slice(&[0u8; 23]);

        buf.put_slice(to_c_string(self.username.as_bytes())?.as_bytes_with_nul());

        buf.put_u8(auth_len);
        buf.put_slice(&self.auth_response);

        if let Some(database) = &self.database {
            buf.put_slice(to_c_string(database.as_bytes())?.as_bytes_with_nul());
        }

        buf.put_slice(self.plugin.name().as_bytes());
        buf.put_u8(0);

        Ok(buf)
    }
}

/// Computes auth responses for a proxy's outgoing handshake.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Plugin to answer a greeting with.
    ///
    /// The configured plugin, unless `follow_server_plugin` is set and the
    /// server advertises a plugin we support.
    pub fn select_plugin(&self, greeting: &ServerGreeting) -> AuthPlugin {
        if !self.config.follow_server_plugin {
            return self.config.plugin;
        }
        match greeting.auth_plugin_name.as_deref() {
            Some(name) => AuthPlugin::from_name(name).unwrap_or_else(|_| {
                tracing::warn!(
                    "Server advertised unsupported plugin '{}', falling back to {}",
                    name,
                    self.config.plugin
                );
                self.config.plugin
            }),
            None => self.config.plugin,
        }
    }

    /// Scramble `password` with `salt`.
    ///
    /// An empty password yields an empty response, which is how MySQL
    /// clients signal "no password".
    pub fn auth_response(
        &self,
        plugin: AuthPlugin,
        password: &[u8],
        salt: &[u8],
    ) -> AuthResult<Vec<u8>> {
        self.config.check_salt(salt)?;
        if salt.len() != SCRAMBLE_LEN {
            tracing::warn!(
                "Scrambling with non-standard salt length {} (expected {})",
                salt.len(),
                SCRAMBLE_LEN
            );
        }

        if password.is_empty() {
            return Ok(Vec::new());
        }
        Ok(plugin.scramble(password, salt))
    }

    /// Build the client's handshake response to `greeting`.
    pub fn respond(
        &self,
        greeting: &ServerGreeting,
        username: &str,
        password: &[u8],
        database: Option<&str>,
    ) -> AuthResult<HandshakeResponse> {
        let plugin = self.select_plugin(greeting);
        let auth_response = self.auth_response(plugin, password, greeting.salt())?;
        debug_assert!(auth_response.is_empty() || auth_response.len() == plugin.response_len());

        tracing::debug!(
            "Auth response for connection {}: user={}, plugin={}, salt_len={}",
            greeting.connection_id,
            username,
            plugin,
            greeting.salt().len()
        );

        Ok(HandshakeResponse {
            username: username.to_string(),
            auth_response,
            database: database.map(str::to_string),
            character_set: greeting.character_set,
            plugin,
        })
    }
}
