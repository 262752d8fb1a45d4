//! SignOff Core - Domain types and collaborator interfaces
//!
//! This crate contains the types shared by the decision engine and the
//! storage backends:
//! - [`SignOffLevel`], [`BusinessDate`]: typed request attributes
//! - [`SignOffRequest`] / [`SignOffForm`]: typed and boundary request forms
//! - [`Report`]: a report with its authorized first-level reviewers
//! - [`SignOffEvent`]: the append-only audit record
//! - [`ReportDirectory`], [`EventLedger`], [`Clock`]: narrow capability
//!   traits implemented by external collaborators

pub mod date;
pub mod error;
pub mod event;
pub mod level;
pub mod report;
pub mod request;
pub mod traits;

pub use date::BusinessDate;
pub use error::{CoreError, DirectoryError, LedgerError};
pub use event::{LedgerKey, SignOffEvent};
pub use level::SignOffLevel;
pub use report::Report;
pub use request::{SignOffForm, SignOffRequest};
pub use traits::{Clock, EventLedger, FixedClock, ReportDirectory, SystemClock};
