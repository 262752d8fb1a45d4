//! # SignOff Decision Engine
//!
//! Two-level approval of report datasets per business date.
//!
//! ## Rules
//! - Only identities on the report's reviewer list may sign off, at either level
//! - First level is one-shot per report and business date
//! - Second level requires a first level for the same dataset and data source,
//!   by a different identity, and is also one-shot
//! - Every accepted request appends exactly one event; rejections append nothing
//!
//! Workflow state is never held in memory. It is rebuilt from the
//! [`EventLedger`](signoff_core::EventLedger) on each call as a
//! [`SignOffState`] and the decision is a pure function of that state.

mod config;
mod engine;
mod error;
mod state;

pub use config::EngineConfig;
pub use engine::SignOffEngine;
pub use error::{SignOffError, UnauthorizedReason};
pub use state::SignOffState;
