//! Application context - wires everything together

use signoff_core::EventLedger;
use signoff_engine::SignOffEngine;
use signoff_store::{JsonReportDirectory, JsonlLedger, SqliteLedger};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{AppConfig, LedgerBackend};

pub type Engine = SignOffEngine<JsonReportDirectory, Arc<dyn EventLedger>>;

/// Application context - config, backends and engine
pub struct AppContext {
    pub engine: Engine,
    config: AppConfig,
}

impl AppContext {
    /// Open the configured backends under the data directory
    pub fn new(config: AppConfig) -> Result<Self, anyhow::Error> {
        std::fs::create_dir_all(&config.data_dir)?;

        let directory = JsonReportDirectory::load(config.reports_path())?;

        let ledger_path = config.ledger_path();
        let ledger: Arc<dyn EventLedger> = match config.ledger {
            LedgerBackend::Sqlite => Arc::new(SqliteLedger::new(&ledger_path)?),
            LedgerBackend::Jsonl => Arc::new(JsonlLedger::open(&ledger_path)?),
        };

        tracing::debug!(
            data_dir = %config.data_dir.display(),
            ledger = ?config.ledger,
            "Application context ready"
        );

        let engine = SignOffEngine::with_config(directory, ledger, config.engine.clone());
        Ok(Self { engine, config })
    }

    pub fn reports_path(&self) -> PathBuf {
        self.config.reports_path()
    }
}
