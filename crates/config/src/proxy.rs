#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Proxy {
    /// Serve the pass-through `/api/*` routes.
    pub enabled: bool,

    pub bind: SocketAddr,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
        }
    }
}
