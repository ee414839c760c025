//! Inbound events delivered by the host page.

use serde::{Deserialize, Serialize};

/// A single interaction reported by the rendering layer.
///
/// Events are applied synchronously in delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// The value of a text field changed (keystroke, paste, autofill).
    Change { field: String, value: String },
    /// A text field lost focus.
    Blur { field: String },
    /// A checkbox inside a group was clicked.
    Toggle { group: String, option: String },
    /// The user pressed the submit action.
    SubmitAttempt,
}

impl FormEvent {
    /// Name of the field or group the event targets, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Change { field, .. } | Self::Blur { field } => Some(field),
            Self::Toggle { group, .. } => Some(group),
            Self::SubmitAttempt => None,
        }
    }

    /// Short event kind name for logs and tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Change { .. } => "change",
            Self::Blur { .. } => "blur",
            Self::Toggle { .. } => "toggle",
            Self::SubmitAttempt => "submit",
        }
    }
}
