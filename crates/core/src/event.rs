//! Sign-off audit events
//!
//! Events are append-only: once created they are never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::BusinessDate;
use crate::level::SignOffLevel;
use crate::request::SignOffRequest;

/// Lookup key for ledger queries: one report on one business date
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerKey {
    pub report_id: String,
    pub business_date: BusinessDate,
}

impl LedgerKey {
    pub fn new(report_id: impl Into<String>, business_date: BusinessDate) -> Self {
        Self {
            report_id: report_id.into(),
            business_date,
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.report_id, self.business_date)
    }
}

/// A recorded sign-off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOffEvent {
    pub id: String,
    pub level: SignOffLevel,
    pub report_id: String,
    pub dataset_id: String,
    pub data_source_id: String,
    pub business_date: BusinessDate,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl SignOffEvent {
    /// Record a sign-off of `request` by `created_by`
    pub fn new(
        id_prefix: &str,
        request: &SignOffRequest,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = format!(
            "{}-{}",
            id_prefix,
            uuid::Uuid::new_v4().simple().to_string().to_uppercase()
        );

        Self {
            id,
            level: request.level,
            report_id: request.report_id.clone(),
            dataset_id: request.dataset_id.clone(),
            data_source_id: request.data_source_id.clone(),
            business_date: request.business_date,
            created_by: created_by.into(),
            created_at,
        }
    }

    pub fn ledger_key(&self) -> LedgerKey {
        LedgerKey::new(self.report_id.clone(), self.business_date)
    }

    /// True if the request targets the same dataset and data source
    pub fn covers_dataset_of(&self, request: &SignOffRequest) -> bool {
        self.dataset_id == request.dataset_id && self.data_source_id == request.data_source_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignOffRequest {
        SignOffRequest::new(
            SignOffLevel::First,
            BusinessDate::from_ymd(2026, 10, 19).unwrap(),
            "reportId",
            "datasetId",
            "dataDNSId",
        )
    }

    #[test]
    fn test_event_from_request() {
        let event = SignOffEvent::new("SO", &request(), "user123", Utc::now());

        assert!(event.id.starts_with("SO-"));
        assert_eq!(event.id.len(), 35);
        assert_eq!(event.level, SignOffLevel::First);
        assert_eq!(event.created_by, "user123");
        assert_eq!(event.ledger_key(), request().ledger_key());
        assert_eq!(event.ledger_key().to_string(), "reportId@2026-10-19");
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = SignOffEvent::new("SO", &request(), "user123", Utc::now());
        let b = SignOffEvent::new("SO", &request(), "user123", Utc::now());
        assert_ne!(a.id, b.id);
        assert!(a.id[3..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_covers_dataset_of() {
        let event = SignOffEvent::new("SO", &request(), "user123", Utc::now());

        let mut other = request();
        assert!(event.covers_dataset_of(&other));

        other.dataset_id = "differentDataSetId".to_string();
        assert!(!event.covers_dataset_of(&other));

        let mut other = request();
        other.data_source_id = "differentDataDNSId".to_string();
        assert!(!event.covers_dataset_of(&other));
    }

    #[test]
    fn test_event_json_shape() {
        let event = SignOffEvent::new("SO", &request(), "user123", Utc::now());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["level"], "FIRST");
        assert_eq!(json["business_date"], "2026-10-19");
        assert_eq!(json["created_by"], "user123");

        let parsed: SignOffEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }
}
