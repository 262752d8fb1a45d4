//! SignOff CLI - command orchestration
//!
//! This crate provides the `signoff` binary and the context that wires
//! configuration, storage backends and the decision engine together.

pub mod commands;
pub mod config;
pub mod context;

pub use config::{AppConfig, LedgerBackend};
pub use context::AppContext;
