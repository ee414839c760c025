//! Submission results.

use std::collections::BTreeMap;

use form_model::FieldStatus;
use serde::Serialize;

/// Values handed to the host on an accepted submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    /// Text field values by name.
    pub fields: BTreeMap<String, String>,
    /// Selected options by group name, in vocabulary order.
    pub groups: BTreeMap<String, Vec<String>>,
}

impl FormValues {
    /// Value of a text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Selection of a group.
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Nothing was invalid; the values may be sent on.
    Accepted(FormValues),
    /// At least one entry was invalid; messages by entry name.
    Rejected(BTreeMap<String, String>),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Error messages of a rejected attempt; `None` when accepted.
    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Rejected(errors) => Some(errors),
            Self::Accepted(_) => None,
        }
    }
}

/// What a single host event produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventOutcome {
    /// A field or group changed; `status` is what the host should render.
    Entry { name: String, status: FieldStatus },
    /// A submit attempt ran.
    Submit { outcome: SubmitOutcome },
}

impl EventOutcome {
    /// Rendered status of the affected entry, if the event targeted one.
    pub fn status(&self) -> Option<&FieldStatus> {
        match self {
            Self::Entry { status, .. } => Some(status),
            Self::Submit { .. } => None,
        }
    }
}
