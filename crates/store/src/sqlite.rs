//! SQLite event ledger
//!
//! Uniqueness per (report_id, business_date, level) is a table constraint,
//! so two writers racing past the engine's check cannot both succeed.
//! A constraint failure is only reported as a duplicate sign-off when the
//! key really holds an event; an event id clash is reported separately.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use signoff_core::{EventLedger, LedgerError, LedgerKey, SignOffEvent, SignOffLevel};
use std::path::Path;

use crate::error::StoreError;

pub struct SqliteLedger {
    conn: Connection,
}

const SELECT_COLUMNS: &str = "SELECT id, level, report_id, dataset_id, data_source_id,
                                     business_date, created_by, created_at
                              FROM signoff_events";

impl SqliteLedger {
    /// Open (or create) a ledger database at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let ledger = Self { conn };
        ledger.init_schema()?;
        Ok(ledger)
    }

    /// Create an in-memory ledger (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let ledger = Self { conn };
        ledger.init_schema()?;
        Ok(ledger)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS signoff_events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                level TEXT NOT NULL,
                report_id TEXT NOT NULL,
                dataset_id TEXT NOT NULL,
                data_source_id TEXT NOT NULL,
                business_date TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (report_id, business_date, level)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_signoff_events_report
             ON signoff_events(report_id)",
            [],
        )?;

        Ok(())
    }

    /// Count all recorded events
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM signoff_events", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn find(&self, key: &LedgerKey, level: SignOffLevel) -> Result<Option<SignOffEvent>, StoreError> {
        let sql = format!(
            "{} WHERE report_id = ?1 AND business_date = ?2 AND level = ?3",
            SELECT_COLUMNS
        );
        let raw = self
            .conn
            .query_row(
                &sql,
                params![key.report_id, key.business_date.to_string(), level.code()],
                RawEvent::from_row,
            )
            .optional()?;

        raw.map(RawEvent::into_event).transpose()
    }

    fn has_id(&self, id: &str) -> Result<bool, StoreError> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM signoff_events WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// Work out which constraint a failed insert ran into
    fn classify_violation(&self, event: &SignOffEvent, err: rusqlite::Error) -> LedgerError {
        let key = event.ledger_key();

        match self.find(&key, event.level) {
            Ok(Some(_)) => {
                return LedgerError::Duplicate {
                    key,
                    level: event.level,
                }
            }
            Ok(None) => {}
            Err(e) => return e.into(),
        }

        match self.has_id(&event.id) {
            Ok(true) => LedgerError::IdConflict(event.id.clone()),
            Ok(false) => StoreError::from(err).into(),
            Err(e) => e.into(),
        }
    }

    fn insert(&self, event: &SignOffEvent) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO signoff_events
             (id, level, report_id, dataset_id, data_source_id, business_date, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.id,
                event.level.code(),
                event.report_id,
                event.dataset_id,
                event.data_source_id,
                event.business_date.to_string(),
                event.created_by,
                event.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, StoreError> {
        let sql = format!("{} WHERE report_id = ?1 ORDER BY seq", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let raws = stmt
            .query_map(params![report_id], RawEvent::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        raws.into_iter().map(RawEvent::into_event).collect()
    }
}

/// Row as stored, before parsing typed columns
struct RawEvent {
    id: String,
    level: String,
    report_id: String,
    dataset_id: String,
    data_source_id: String,
    business_date: String,
    created_by: String,
    created_at: String,
}

impl RawEvent {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            level: row.get(1)?,
            report_id: row.get(2)?,
            dataset_id: row.get(3)?,
            data_source_id: row.get(4)?,
            business_date: row.get(5)?,
            created_by: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_event(self) -> Result<SignOffEvent, StoreError> {
        let corrupt = |what: &str| StoreError::Corrupt(format!("event {}: invalid {}", self.id, what));

        let level = SignOffLevel::parse(&self.level).map_err(|_| corrupt("level"))?;
        let business_date = self.business_date.parse().map_err(|_| corrupt("business_date"))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|_| corrupt("created_at"))?
            .with_timezone(&chrono::Utc);

        Ok(SignOffEvent {
            id: self.id,
            level,
            report_id: self.report_id,
            dataset_id: self.dataset_id,
            data_source_id: self.data_source_id,
            business_date,
            created_by: self.created_by,
            created_at,
        })
    }
}

impl EventLedger for SqliteLedger {
    fn signed_off_event(
        &self,
        key: &LedgerKey,
        level: SignOffLevel,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        Ok(self.find(key, level)?)
    }

    fn insert_event(&self, event: &SignOffEvent) -> Result<(), LedgerError> {
        match self.insert(event) {
            Ok(()) => Ok(()),
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Err(self.classify_violation(event, e))
            }
            Err(e) => Err(StoreError::from(e).into()),
        }
    }

    fn events_for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, LedgerError> {
        Ok(self.for_report(report_id)?)
    }
}
