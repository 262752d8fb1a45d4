//! Application configuration
//!
//! Loaded from an optional JSON file; every field has a default so a
//! partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use signoff_engine::EngineConfig;
use std::path::{Path, PathBuf};

/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "SIGNOFF_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the ledger and, by default, the report file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub ledger: LedgerBackend,

    /// Report file; `<data_dir>/reports.json` when unset
    #[serde(default)]
    pub reports_file: Option<PathBuf>,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Event ledger storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LedgerBackend {
    /// SQLite database with a uniqueness constraint (default)
    #[default]
    Sqlite,

    /// Append-only JSONL file, single writer
    Jsonl,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ledger: LedgerBackend::default(),
            reports_file: None,
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Config rooted at `data_dir` with every other field defaulted
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Effective config for a run
    ///
    /// Starts from `config_path` (or defaults), then applies
    /// `SIGNOFF_DATA_DIR`, then `data_dir`. The last one set wins.
    pub fn resolve(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self, std::io::Error> {
        let config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let env_dir = std::env::var(DATA_DIR_ENV).ok();
        Ok(config.with_overrides(env_dir.as_deref(), data_dir))
    }

    /// Apply a data directory from the environment, then an explicit one
    ///
    /// A blank environment value is ignored.
    pub fn with_overrides(mut self, env_dir: Option<&str>, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn reports_path(&self) -> PathBuf {
        self.reports_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("reports.json"))
    }

    pub fn ledger_path(&self) -> PathBuf {
        match self.ledger {
            LedgerBackend::Sqlite => self.data_dir.join("ledger.db"),
            LedgerBackend::Jsonl => self.data_dir.join("events.jsonl"),
        }
    }
}
