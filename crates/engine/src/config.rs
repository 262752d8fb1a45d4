//! Engine configuration
//!
//! Only operational knobs live here. The approval rules themselves are fixed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Strip surrounding whitespace from the acting identity before matching
    #[serde(default = "default_trim_identities")]
    pub trim_identities: bool,

    /// Prefix of generated event ids
    #[serde(default = "default_event_id_prefix")]
    pub event_id_prefix: String,
}

fn default_trim_identities() -> bool {
    true
}

fn default_event_id_prefix() -> String {
    "SO".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trim_identities: default_trim_identities(),
            event_id_prefix: default_event_id_prefix(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Apply identity normalization
    pub fn normalize_identity<'a>(&self, identity: &'a str) -> &'a str {
        if self.trim_identities {
            identity.trim()
        } else {
            identity
        }
    }
}
