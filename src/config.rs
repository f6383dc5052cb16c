//! Environment configuration

use std::net::SocketAddr;

use crate::domain::value_objects::MAX_SELLER_IDENTIFIER_LEN;
use crate::{CrmError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Width applied to `stored_identifier` when a request does not name one.
    pub storage_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8083, storage_width: MAX_SELLER_IDENTIFIER_LEN }
    }
}

impl Config {
    /// Reads `HOST`, `PORT` and `SELLER_ID_STORAGE_WIDTH`; unset keys keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| CrmError::Config(format!("PORT must be a port number, got {port:?}")))?;
        }
        if let Some(width) = lookup("SELLER_ID_STORAGE_WIDTH") {
            let parsed: usize = width
                .trim()
                .parse()
                .map_err(|_| CrmError::Config(format!("SELLER_ID_STORAGE_WIDTH must be an integer, got {width:?}")))?;
            if !(1..=MAX_SELLER_IDENTIFIER_LEN).contains(&parsed) {
                return Err(CrmError::Config(format!("SELLER_ID_STORAGE_WIDTH must be between 1 and {MAX_SELLER_IDENTIFIER_LEN}, got {parsed}")));
            }
            config.storage_width = parsed;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| CrmError::Config(format!("invalid bind address {}:{}", self.host, self.port)))
    }
}
