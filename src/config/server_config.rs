//! Read API server configuration.

use super::{parse_or, string_or};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEnvConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_address: string_or(lookup, "SERVER_BIND_ADDRESS", &defaults.bind_address),
            port: parse_or(lookup, "SERVER_PORT", defaults.port),
        }
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
