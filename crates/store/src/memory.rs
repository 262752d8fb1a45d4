//! In-memory collaborators

use signoff_core::{
    DirectoryError, EventLedger, LedgerError, LedgerKey, Report, ReportDirectory, SignOffEvent,
    SignOffLevel,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Report directory backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportDirectory {
    reports: BTreeMap<String, Report>,
}

impl InMemoryReportDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reports(reports: impl IntoIterator<Item = Report>) -> Self {
        let mut directory = Self::new();
        for report in reports {
            directory.insert(report);
        }
        directory
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.insert(report);
        self
    }

    /// Add or replace a report
    pub fn insert(&mut self, report: Report) {
        self.reports.insert(report.id.clone(), report);
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportDirectory for InMemoryReportDirectory {
    fn get_report(&self, report_id: &str) -> Result<Report, DirectoryError> {
        self.reports
            .get(report_id)
            .cloned()
            .ok_or_else(|| DirectoryError::ReportNotFound(report_id.to_string()))
    }

    fn list_reports(&self) -> Result<Vec<Report>, DirectoryError> {
        Ok(self.reports.values().cloned().collect())
    }
}

/// Event ledger held in a vector, insertion order preserved
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    events: Mutex<Vec<SignOffEvent>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the ledger with existing history
    pub fn with_events(events: impl IntoIterator<Item = SignOffEvent>) -> Self {
        Self {
            events: Mutex::new(events.into_iter().collect()),
        }
    }

    /// Snapshot of every recorded event
    pub fn events(&self) -> Vec<SignOffEvent> {
        self.lock().map(|events| events.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<SignOffEvent>>, LedgerError> {
        self.events
            .lock()
            .map_err(|_| LedgerError::Unavailable("in-memory ledger lock poisoned".to_string()))
    }
}

impl EventLedger for InMemoryLedger {
    fn signed_off_event(
        &self,
        key: &LedgerKey,
        level: SignOffLevel,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        let events = self.lock()?;
        Ok(events
            .iter()
            .find(|e| e.level == level && e.ledger_key() == *key)
            .cloned())
    }

    fn insert_event(&self, event: &SignOffEvent) -> Result<(), LedgerError> {
        let mut events = self.lock()?;
        let key = event.ledger_key();

        if events.iter().any(|e| e.level == event.level && e.ledger_key() == key) {
            return Err(LedgerError::Duplicate {
                key,
                level: event.level,
            });
        }
        if events.iter().any(|e| e.id == event.id) {
            return Err(LedgerError::IdConflict(event.id.clone()));
        }

        events.push(event.clone());
        Ok(())
    }

    fn events_for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, LedgerError> {
        let events = self.lock()?;
        Ok(events
            .iter()
            .filter(|e| e.report_id == report_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use signoff_core::{BusinessDate, SignOffRequest};

    fn event(level: SignOffLevel, report: &str, by: &str) -> SignOffEvent {
        let request = SignOffRequest::new(
            level,
            BusinessDate::from_ymd(2026, 10, 19).unwrap(),
            report,
            "datasetId",
            "dataDNSId",
        );
        SignOffEvent::new("SO", &request, by, Utc::now())
    }

    #[test]
    fn test_directory_lookup() {
        let directory = InMemoryReportDirectory::new()
            .with_report(Report::new("b").with_reviewer("user123"))
            .with_report(Report::new("a"));

        assert_eq!(directory.len(), 2);
        assert!(directory.get_report("b").unwrap().is_first_level_reviewer("user123"));
        assert_eq!(
            directory.get_report("missing").unwrap_err(),
            DirectoryError::ReportNotFound("missing".to_string())
        );

        let ids: Vec<_> = directory.list_reports().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_ledger_insert_and_query() {
        let ledger = InMemoryLedger::new();
        let first = event(SignOffLevel::First, "reportId", "user123");
        let key = first.ledger_key();

        assert!(!ledger.is_signed_off_for_first_level(&key).unwrap());
        ledger.insert_event(&first).unwrap();

        assert!(ledger.is_signed_off_for_first_level(&key).unwrap());
        assert!(!ledger.is_signed_off_for_second_level(&key).unwrap());
        assert_eq!(ledger.first_level_signed_off_event(&key).unwrap(), Some(first));
    }

    #[test]
    fn test_ledger_rejects_duplicate_level() {
        let ledger = InMemoryLedger::new();
        ledger.insert_event(&event(SignOffLevel::First, "reportId", "user123")).unwrap();

        let err = ledger
            .insert_event(&event(SignOffLevel::First, "reportId", "user456"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { level: SignOffLevel::First, .. }));
        assert_eq!(ledger.len(), 1);

        ledger.insert_event(&event(SignOffLevel::Second, "reportId", "user456")).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_ledger_rejects_shared_id() {
        let ledger = InMemoryLedger::new();
        let first = event(SignOffLevel::First, "reportId", "user123");
        let mut clash = event(SignOffLevel::First, "other", "user123");
        clash.id = first.id.clone();

        ledger.insert_event(&first).unwrap();
        assert_eq!(
            ledger.insert_event(&clash).unwrap_err(),
            LedgerError::IdConflict(first.id.clone())
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_events_for_report() {
        let ledger = InMemoryLedger::with_events(vec![
            event(SignOffLevel::First, "reportId", "user123"),
            event(SignOffLevel::First, "other", "user123"),
            event(SignOffLevel::Second, "reportId", "user456"),
        ]);

        let history = ledger.events_for_report("reportId").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].level, SignOffLevel::First);
        assert_eq!(history[1].created_by, "user456");
    }
}
