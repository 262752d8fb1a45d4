//! Workflow state derived from the ledger

use signoff_core::{EventLedger, LedgerError, LedgerKey, SignOffEvent, SignOffLevel, SignOffRequest};

use crate::error::{SignOffError, UnauthorizedReason};

/// Where one report/business-date workflow stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOffState {
    NotSignedOff,
    FirstDone {
        first: SignOffEvent,
    },
    SecondDone {
        first: SignOffEvent,
        second: SignOffEvent,
    },
}

impl SignOffState {
    /// Rebuild the state from the ledger's recorded events
    pub fn load<L: EventLedger + ?Sized>(ledger: &L, key: &LedgerKey) -> Result<Self, LedgerError> {
        let first = ledger.first_level_signed_off_event(key)?;
        let second = ledger.second_level_signed_off_event(key)?;

        match (first, second) {
            (None, None) => Ok(SignOffState::NotSignedOff),
            (Some(first), None) => Ok(SignOffState::FirstDone { first }),
            (Some(first), Some(second)) => Ok(SignOffState::SecondDone { first, second }),
            (None, Some(second)) => Err(LedgerError::Inconsistent(format!(
                "second-level event {} for {} has no first-level event",
                second.id, key
            ))),
        }
    }

    /// The recorded first-level event, if any
    pub fn first_level(&self) -> Option<&SignOffEvent> {
        match self {
            SignOffState::NotSignedOff => None,
            SignOffState::FirstDone { first } | SignOffState::SecondDone { first, .. } => Some(first),
        }
    }

    pub fn second_level(&self) -> Option<&SignOffEvent> {
        match self {
            SignOffState::SecondDone { second, .. } => Some(second),
            _ => None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, SignOffState::SecondDone { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignOffState::NotSignedOff => "not_signed_off",
            SignOffState::FirstDone { .. } => "first_done",
            SignOffState::SecondDone { .. } => "second_done",
        }
    }

    /// Check whether `identity` may move this workflow forward with `request`
    ///
    /// Reviewer-list membership is checked by the caller before the state is
    /// loaded; this covers the ordering, dataset and four-eyes rules.
    pub fn check_transition(&self, request: &SignOffRequest, identity: &str) -> Result<(), SignOffError> {
        let key = request.ledger_key();

        match request.level {
            SignOffLevel::First => match self {
                SignOffState::NotSignedOff => Ok(()),
                _ => Err(SignOffError::FirstLevelAlreadySignedOff(key)),
            },
            SignOffLevel::Second => {
                let first = self.first_level().ok_or_else(|| {
                    SignOffError::unauthorized(identity, UnauthorizedReason::FirstLevelPending)
                })?;

                if !first.covers_dataset_of(request) {
                    return Err(SignOffError::DataSetIdMismatch {
                        key,
                        expected_dataset: first.dataset_id.clone(),
                        expected_source: first.data_source_id.clone(),
                        actual_dataset: request.dataset_id.clone(),
                        actual_source: request.data_source_id.clone(),
                    });
                }

                if first.created_by == identity {
                    return Err(SignOffError::unauthorized(identity, UnauthorizedReason::SameReviewer));
                }

                if self.is_finalized() {
                    return Err(SignOffError::SecondLevelAlreadySignedOff(key));
                }

                Ok(())
            }
        }
    }
}
