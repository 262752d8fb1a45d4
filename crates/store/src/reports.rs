//! Report directory loaded from a JSON file
//!
//! The file holds an array of reports:
//!
//! ```json
//! [
//!   { "id": "daily-pnl", "name": "Daily P&L", "first_level_reviewers": ["alice", "bob"] }
//! ]
//! ```

use signoff_core::{DirectoryError, Report, ReportDirectory};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::memory::InMemoryReportDirectory;

pub struct JsonReportDirectory {
    path: PathBuf,
    inner: InMemoryReportDirectory,
}

impl JsonReportDirectory {
    /// Load reports from `path`; a missing file yields an empty directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let reports: Vec<Report> = serde_json::from_str(&content)?;
            InMemoryReportDirectory::from_reports(reports)
        } else {
            tracing::debug!(path = %path.display(), "Report file missing, starting empty");
            InMemoryReportDirectory::new()
        };

        Ok(Self { path, inner })
    }

    /// Add or replace a report and persist the file
    pub fn upsert(&mut self, report: Report) -> Result<(), StoreError> {
        self.inner.insert(report);
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let reports = self.inner.list_reports().map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, serde_json::to_string_pretty(&reports)?)?;
        Ok(())
    }
}

impl ReportDirectory for JsonReportDirectory {
    fn get_report(&self, report_id: &str) -> Result<Report, DirectoryError> {
        self.inner.get_report(report_id)
    }

    fn list_reports(&self) -> Result<Vec<Report>, DirectoryError> {
        self.inner.list_reports()
    }
}
