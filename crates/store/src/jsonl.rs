//! Append-only JSONL event ledger
//!
//! Each line is one JSON-serialized SignOffEvent. Lines are never rewritten.
//! The file is read once on open to build the lookup index; uniqueness is
//! enforced against that index, so only one process may write a file.

use signoff_core::{EventLedger, LedgerError, LedgerKey, SignOffEvent, SignOffLevel};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;

struct Inner {
    file: File,
    events: Vec<SignOffEvent>,
}

pub struct JsonlLedger {
    inner: Mutex<Inner>,
}

impl JsonlLedger {
    /// Open (or create) the ledger file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let events = if path.exists() {
            read_events(path)?
        } else {
            Vec::new()
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::debug!(path = %path.display(), events = events.len(), "Opened JSONL ledger");

        Ok(Self {
            inner: Mutex::new(Inner { file, events }),
        })
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, LedgerError> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::Unavailable("JSONL ledger lock poisoned".to_string()))
    }
}

fn read_events(path: &Path) -> Result<Vec<SignOffEvent>, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: SignOffEvent = serde_json::from_str(&line)
            .map_err(|e| StoreError::Corrupt(format!("{} line {}: {}", path.display(), i + 1, e)))?;
        events.push(event);
    }

    Ok(events)
}

impl EventLedger for JsonlLedger {
    fn signed_off_event(
        &self,
        key: &LedgerKey,
        level: SignOffLevel,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        let inner = self.lock()?;
        Ok(inner
            .events
            .iter()
            .find(|e| e.level == level && e.ledger_key() == *key)
            .cloned())
    }

    fn insert_event(&self, event: &SignOffEvent) -> Result<(), LedgerError> {
        let mut inner = self.lock()?;
        let key = event.ledger_key();

        if inner.events.iter().any(|e| e.level == event.level && e.ledger_key() == key) {
            return Err(LedgerError::Duplicate {
                key,
                level: event.level,
            });
        }
        if inner.events.iter().any(|e| e.id == event.id) {
            return Err(LedgerError::IdConflict(event.id.clone()));
        }

        let json = serde_json::to_string(event).map_err(StoreError::from)?;
        writeln!(inner.file, "{}", json).map_err(StoreError::from)?;
        inner.file.flush().map_err(StoreError::from)?;
        inner.events.push(event.clone());

        Ok(())
    }

    fn events_for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, LedgerError> {
        let inner = self.lock()?;
        Ok(inner
            .events
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
    use tempfile::tempdir;

    fn event(level: SignOffLevel, by: &str) -> SignOffEvent {
        let request = SignOffRequest::new(
            level,
            BusinessDate::from_ymd(2026, 10, 19).unwrap(),
            "reportId",
            "datasetId",
            "dataDNSId",
        );
        SignOffEvent::new("SO", &request, by, Utc::now())
    }

    #[test]
    fn test_write_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger").join("events.jsonl");

        let first = event(SignOffLevel::First, "user123");
        {
            let ledger = JsonlLedger::open(&path).unwrap();
            ledger.insert_event(&first).unwrap();
            ledger.insert_event(&event(SignOffLevel::Second, "user456")).unwrap();
        }

        let ledger = JsonlLedger::open(&path).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.first_level_signed_off_event(&first.ledger_key()).unwrap(),
            Some(first)
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_duplicate_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        JsonlLedger::open(&path)
            .unwrap()
            .insert_event(&event(SignOffLevel::First, "user123"))
            .unwrap();

        let ledger = JsonlLedger::open(&path).unwrap();
        let err = ledger.insert_event(&event(SignOffLevel::First, "user456")).unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_shared_id_rejected() {
        let dir = tempdir().unwrap();
        let ledger = JsonlLedger::open(dir.path().join("events.jsonl")).unwrap();

        let first = event(SignOffLevel::First, "user123");
        let mut clash = event(SignOffLevel::Second, "user456");
        clash.id = first.id.clone();

        ledger.insert_event(&first).unwrap();
        let err = ledger.insert_event(&clash).unwrap_err();

        assert_eq!(err, LedgerError::IdConflict(first.id));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_corrupt_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        std::fs::write(&path, "{\"id\":\"SO-1\"}\n").unwrap();

        let result = JsonlLedger::open(&path);
        assert!(matches!(result, Err(StoreError::Corrupt(ref m)) if m.contains("line 1")));
    }
}
