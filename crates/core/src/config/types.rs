use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::ticket::RatingPolicy;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ws: WsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Ticket store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Load the starter tickets when the store is created.
    #[serde(default = "default_true")]
    pub seed: bool,
    /// Reject ratings for tickets that are not completed.
    #[serde(default = "default_true")]
    pub require_completed_for_rating: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: true,
            require_completed_for_rating: true,
        }
    }
}

impl StoreConfig {
    /// Rating policy implied by this configuration.
    pub fn rating_policy(&self) -> RatingPolicy {
        if self.require_completed_for_rating {
            RatingPolicy::CompletedOnly
        } else {
            RatingPolicy::AnyStatus
        }
    }
}

fn default_true() -> bool {
    true
}

/// WebSocket change feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WsConfig {
    /// Seconds between heartbeat messages.
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    /// Messages buffered per subscriber before it starts lagging.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            heartbeat_secs: default_heartbeat_secs(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_heartbeat_secs() -> u64 {
    30
}

fn default_channel_capacity() -> usize {
    256
}

/// Config as reported by the API
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub store: SanitizedStoreConfig,
    pub ws: WsConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedStoreConfig {
    pub seed: bool,
    pub rating_policy: RatingPolicy,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            store: SanitizedStoreConfig {
                seed: config.store.seed,
                rating_policy: config.store.rating_policy(),
            },
            ws: config.ws.clone(),
        }
    }
}
