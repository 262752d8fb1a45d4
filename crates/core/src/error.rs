//! Core and collaborator errors

use thiserror::Error;

use crate::event::LedgerKey;
use crate::level::SignOffLevel;

/// Errors raised while building typed values from boundary input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid sign-off level: {0}")]
    InvalidSignOffLevel(String),

    #[error("Invalid business date: {0} (expected YYYY-MM-DD)")]
    InvalidBusinessDate(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

/// Errors from a [`ReportDirectory`](crate::ReportDirectory)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Report directory unavailable: {0}")]
    Unavailable(String),
}

/// Errors from an [`EventLedger`](crate::EventLedger)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger already holds an event for this key and level
    #[error("{level} sign-off already recorded for {key}")]
    Duplicate { key: LedgerKey, level: SignOffLevel },

    /// Another event already carries this event id
    #[error("Event id already recorded: {0}")]
    IdConflict(String),

    #[error("Event ledger unavailable: {0}")]
    Unavailable(String),

    /// Stored history violates the workflow (e.g. second level without first)
    #[error("Event ledger inconsistent: {0}")]
    Inconsistent(String),
}
