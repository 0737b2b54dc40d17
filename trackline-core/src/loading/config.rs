use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the network description comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON file with `pathsInput` and `connectionsInput`.
    pub input: PathBuf,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("network.json"),
        }
    }
}
