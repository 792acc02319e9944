//! Collector configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Where the collector listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    /// Interface to bind (all interfaces by default)
    pub bind: IpAddr,

    /// TCP port to bind
    pub port: u16,
}

impl CollectorSettings {
    pub fn new(bind: IpAddr, port: u16) -> Self {
        Self { bind, port }
    }

    /// Full socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        Ok(())
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
    }
}
