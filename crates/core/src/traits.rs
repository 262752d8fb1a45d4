//! Collaborator interfaces
//!
//! The engine never owns report or event storage. Backends implement these
//! narrow traits so any storage can be substituted without touching the
//! decision logic.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::error::{DirectoryError, LedgerError};
use crate::event::{LedgerKey, SignOffEvent};
use crate::level::SignOffLevel;
use crate::report::Report;

/// Resolves reports and their authorized reviewers
pub trait ReportDirectory {
    /// Fetch a report, `DirectoryError::ReportNotFound` if it does not exist
    fn get_report(&self, report_id: &str) -> Result<Report, DirectoryError>;

    /// All known reports, ordered by id
    fn list_reports(&self) -> Result<Vec<Report>, DirectoryError>;
}

/// Records and queries sign-off events
///
/// Implementations must reject a second event for the same key and level
/// with [`LedgerError::Duplicate`], even when two callers race past the
/// engine's own check.
pub trait EventLedger {
    /// The event recorded for `key` at `level`, if any
    fn signed_off_event(
        &self,
        key: &LedgerKey,
        level: SignOffLevel,
    ) -> Result<Option<SignOffEvent>, LedgerError>;

    /// Append an event
    fn insert_event(&self, event: &SignOffEvent) -> Result<(), LedgerError>;

    /// Every event recorded for a report, oldest first
    fn events_for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, LedgerError>;

    fn is_signed_off(&self, key: &LedgerKey, level: SignOffLevel) -> Result<bool, LedgerError> {
        Ok(self.signed_off_event(key, level)?.is_some())
    }

    fn is_signed_off_for_first_level(&self, key: &LedgerKey) -> Result<bool, LedgerError> {
        self.is_signed_off(key, SignOffLevel::First)
    }

    fn is_signed_off_for_second_level(&self, key: &LedgerKey) -> Result<bool, LedgerError> {
        self.is_signed_off(key, SignOffLevel::Second)
    }

    fn first_level_signed_off_event(
        &self,
        key: &LedgerKey,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        self.signed_off_event(key, SignOffLevel::First)
    }

    fn second_level_signed_off_event(
        &self,
        key: &LedgerKey,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        self.signed_off_event(key, SignOffLevel::Second)
    }
}

/// Source of event creation timestamps
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant (for tests and replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<T: ReportDirectory + ?Sized> ReportDirectory for &T {
    fn get_report(&self, report_id: &str) -> Result<Report, DirectoryError> {
        (**self).get_report(report_id)
    }

    fn list_reports(&self) -> Result<Vec<Report>, DirectoryError> {
        (**self).list_reports()
    }
}

impl<T: ReportDirectory + ?Sized> ReportDirectory for Arc<T> {
    fn get_report(&self, report_id: &str) -> Result<Report, DirectoryError> {
        (**self).get_report(report_id)
    }

    fn list_reports(&self) -> Result<Vec<Report>, DirectoryError> {
        (**self).list_reports()
    }
}

impl<T: EventLedger + ?Sized> EventLedger for &T {
    fn signed_off_event(
        &self,
        key: &LedgerKey,
        level: SignOffLevel,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        (**self).signed_off_event(key, level)
    }

    fn insert_event(&self, event: &SignOffEvent) -> Result<(), LedgerError> {
        (**self).insert_event(event)
    }

    fn events_for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, LedgerError> {
        (**self).events_for_report(report_id)
    }
}

impl<T: EventLedger + ?Sized> EventLedger for Arc<T> {
    fn signed_off_event(
        &self,
        key: &LedgerKey,
        level: SignOffLevel,
    ) -> Result<Option<SignOffEvent>, LedgerError> {
        (**self).signed_off_event(key, level)
    }

    fn insert_event(&self, event: &SignOffEvent) -> Result<(), LedgerError> {
        (**self).insert_event(event)
    }

    fn events_for_report(&self, report_id: &str) -> Result<Vec<SignOffEvent>, LedgerError> {
        (**self).events_for_report(report_id)
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
