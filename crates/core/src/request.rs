//! Sign-off requests

use serde::{Deserialize, Serialize};

use crate::date::BusinessDate;
use crate::error::CoreError;
use crate::event::LedgerKey;
use crate::level::SignOffLevel;

/// A typed, validated sign-off request
///
/// The acting identity is not part of the request; it is supplied by the
/// caller's authentication layer alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOffRequest {
    pub level: SignOffLevel,
    pub business_date: BusinessDate,
    pub report_id: String,
    pub dataset_id: String,
    pub data_source_id: String,
}

impl SignOffRequest {
    pub fn new(
        level: SignOffLevel,
        business_date: BusinessDate,
        report_id: impl Into<String>,
        dataset_id: impl Into<String>,
        data_source_id: impl Into<String>,
    ) -> Self {
        Self {
            level,
            business_date,
            report_id: report_id.into(),
            dataset_id: dataset_id.into(),
            data_source_id: data_source_id.into(),
        }
    }

    /// Key used for ledger lookups
    pub fn ledger_key(&self) -> LedgerKey {
        LedgerKey::new(self.report_id.clone(), self.business_date)
    }
}

/// Untyped request as received at a boundary (CLI, JSON payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOffForm {
    pub level: String,
    pub business_date: String,
    pub report_id: String,
    pub dataset_id: String,
    pub data_source_id: String,
}

impl TryFrom<SignOffForm> for SignOffRequest {
    type Error = CoreError;

    fn try_from(form: SignOffForm) -> Result<Self, Self::Error> {
        let level = SignOffLevel::parse(&form.level)?;
        let business_date = form.business_date.parse()?;

        if form.report_id.trim().is_empty() {
            return Err(CoreError::EmptyField("report_id"));
        }
        if form.dataset_id.trim().is_empty() {
            return Err(CoreError::EmptyField("dataset_id"));
        }
        if form.data_source_id.trim().is_empty() {
            return Err(CoreError::EmptyField("data_source_id"));
        }

        Ok(SignOffRequest {
            level,
            business_date,
            report_id: form.report_id,
            dataset_id: form.dataset_id,
            data_source_id: form.data_source_id,
        })
    }
}
