//! TOML configuration for the server.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! tick_hz = 60
//!
//! [network]
//! input = "mta-input.json"
//!
//! [train]
//! speed = 4.0
//! start_path = 0
//! direction = "forward"
//! turn = "left"
//! ```
//!
//! Every key is optional.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use trackline_core::prelude::{NetworkConfig, TrainConfig};

use crate::error::ServerError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub network: NetworkConfig,
    pub train: TrainConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub bind: SocketAddr,
    /// Animation ticks per second.
    pub tick_hz: u32,
    /// Input events buffered between two ticks before senders wait.
    pub event_buffer: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            tick_hz: 60,
            event_buffer: 64,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ServerError> {
        let config: ServerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ServerError> {
        if self.server.tick_hz == 0 {
            return Err(ServerError::InvalidConfig(
                "server.tick_hz must be at least 1".to_string(),
            ));
        }
        if self.server.event_buffer == 0 {
            return Err(ServerError::InvalidConfig(
                "server.event_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackline_core::prelude::{Direction, TurnDirection};

    #[test]
    fn empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.server.tick_hz, 60);
        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.train, TrainConfig::default());
        assert_eq!(config.network.input, Path::new("network.json"));
    }

    #[test]
    fn sections_override_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            [server]
            bind = "0.0.0.0:9000"
            tick_hz = 30

            [network]
            input = "maps/mta-input.json"

            [train]
            speed = 2.5
            start_path = 12
            direction = "backward"
            turn = "right"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind.port(), 9000);
        assert_eq!(config.server.tick_hz, 30);
        assert_eq!(config.server.event_buffer, 64);
        assert_eq!(config.network.input, Path::new("maps/mta-input.json"));
        assert_eq!(config.train.speed, 2.5);
        assert_eq!(config.train.start_path, 12);
        assert_eq!(config.train.start_distance, 0.0);
        assert_eq!(config.train.direction, Direction::Backward);
        assert_eq!(config.train.turn, TurnDirection::Right);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        assert!(matches!(
            ServerConfig::from_toml("[server]\ntick_hz = 0\n"),
            Err(ServerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        assert!(matches!(
            ServerConfig::from_toml("[train]\ndirection = \"up\"\n"),
            Err(ServerError::ConfigParse(_))
        ));
    }
}
