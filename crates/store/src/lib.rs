//! SignOff Store - collaborator backends
//!
//! - [`InMemoryReportDirectory`] / [`InMemoryLedger`]: process-local, used by tests
//! - [`JsonReportDirectory`]: reports maintained in a JSON file
//! - [`JsonlLedger`]: append-only JSONL event file
//! - [`SqliteLedger`]: SQLite table with a uniqueness constraint per
//!   report, business date and level

pub mod error;
pub mod jsonl;
pub mod memory;
pub mod reports;
pub mod sqlite;

pub use error::StoreError;
pub use jsonl::JsonlLedger;
pub use memory::{InMemoryLedger, InMemoryReportDirectory};
pub use reports::JsonReportDirectory;
pub use sqlite::SqliteLedger;
