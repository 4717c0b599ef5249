use std::net::{AddrParseError, SocketAddr};

/// Relay server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of the command queue in front of the relay loop.
    pub relay_buffer: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            relay_buffer: 256,
        }
    }
}
