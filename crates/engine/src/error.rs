//! Sign-off errors

use signoff_core::{CoreError, DirectoryError, LedgerError, LedgerKey};
use std::fmt;
use thiserror::Error;

/// Why an identity was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    /// Not on the report's reviewer list
    NotAReviewer,
    /// Second level requested before any first level
    FirstLevelPending,
    /// Same identity already signed the first level
    SameReviewer,
}

impl fmt::Display for UnauthorizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnauthorizedReason::NotAReviewer => "not an authorized reviewer for this report",
            UnauthorizedReason::FirstLevelPending => "first-level sign-off has not been completed",
            UnauthorizedReason::SameReviewer => "already performed the first-level sign-off",
        };
        f.write_str(text)
    }
}

/// Errors from the sign-off engine
#[derive(Debug, Error)]
pub enum SignOffError {
    #[error("Invalid sign-off level: {0}")]
    InvalidSignOffLevel(String),

    #[error("Invalid sign-off request: {0}")]
    InvalidRequest(CoreError),

    #[error("Unauthorized sign-off by {identity}: {reason}")]
    Unauthorized {
        identity: String,
        reason: UnauthorizedReason,
    },

    #[error(
        "Dataset mismatch for {key}: first level covers {expected_dataset}/{expected_source}, \
         request has {actual_dataset}/{actual_source}"
    )]
    DataSetIdMismatch {
        key: LedgerKey,
        expected_dataset: String,
        expected_source: String,
        actual_dataset: String,
        actual_source: String,
    },

    #[error("First-level sign-off already completed for {0}")]
    FirstLevelAlreadySignedOff(LedgerKey),

    #[error("Second-level sign-off already completed for {0}")]
    SecondLevelAlreadySignedOff(LedgerKey),

    #[error("Report directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Event ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl SignOffError {
    pub(crate) fn unauthorized(identity: &str, reason: UnauthorizedReason) -> Self {
        SignOffError::Unauthorized {
            identity: identity.to_string(),
            reason,
        }
    }

    /// True for business-rule rejections, false for collaborator failures
    pub fn is_rejection(&self) -> bool {
        !matches!(self, SignOffError::Directory(_) | SignOffError::Ledger(_))
    }

    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SignOffError::InvalidSignOffLevel(_) => "INVALID_SIGN_OFF_LEVEL",
            SignOffError::InvalidRequest(_) => "INVALID_REQUEST",
            SignOffError::Unauthorized { .. } => "UNAUTHORIZED_SIGN_OFF",
            SignOffError::DataSetIdMismatch { .. } => "DATASET_ID_MISMATCH",
            SignOffError::FirstLevelAlreadySignedOff(_) => "FIRST_LEVEL_ALREADY_SIGNED_OFF",
            SignOffError::SecondLevelAlreadySignedOff(_) => "SECOND_LEVEL_ALREADY_SIGNED_OFF",
            SignOffError::Directory(_) => "REPORT_DIRECTORY_ERROR",
            SignOffError::Ledger(_) => "EVENT_LEDGER_ERROR",
        }
    }
}

impl From<CoreError> for SignOffError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSignOffLevel(level) => SignOffError::InvalidSignOffLevel(level),
            other => SignOffError::InvalidRequest(other),
        }
    }
}
