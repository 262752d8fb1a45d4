//! Reports and their authorized reviewers

use serde::{Deserialize, Serialize};

/// A report whose datasets require sign-off
///
/// Maintained outside this crate; read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Identities allowed to sign off, in the order they were granted
    #[serde(default)]
    pub first_level_reviewers: Vec<String>,
}

impl Report {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            first_level_reviewers: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Grant sign-off rights to an identity; duplicates are ignored
    pub fn with_reviewer(mut self, identity: impl Into<String>) -> Self {
        let identity = identity.into();
        if !self.is_first_level_reviewer(&identity) {
            self.first_level_reviewers.push(identity);
        }
        self
    }

    /// Exact-match membership in the authorized reviewer list
    pub fn is_first_level_reviewer(&self, identity: &str) -> bool {
        self.first_level_reviewers.iter().any(|r| r == identity)
    }
}
