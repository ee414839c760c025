//! Derived per-field display status.

use serde::{Deserialize, Serialize};

/// Status of a field or checkbox group, derived from its current state.
///
/// A status is never stored; controllers recompute it on every read. Because
/// it is a single value, a field can never show an error and a success
/// message at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FieldStatus {
    /// Nothing to show: an empty optional field, or an error not yet revealed.
    Pristine,
    /// The value is missing or rejected by the rule.
    Invalid(String),
    /// The value passes and no success message is configured.
    ValidSilent,
    /// The value passes and the configured success message should be shown.
    ValidWithSuccessMessage(String),
}

impl FieldStatus {
    /// True for [`FieldStatus::Invalid`].
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// True for either valid variant.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::ValidSilent | Self::ValidWithSuccessMessage(_))
    }

    /// True for [`FieldStatus::Pristine`].
    pub fn is_pristine(&self) -> bool {
        matches!(self, Self::Pristine)
    }

    /// Error message, if invalid.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }

    /// Success message, if one should be displayed.
    pub fn success(&self) -> Option<&str> {
        match self {
            Self::ValidWithSuccessMessage(message) => Some(message),
            _ => None,
        }
    }

    /// Either message carried by the status.
    pub fn message(&self) -> Option<&str> {
        self.error().or_else(|| self.success())
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pristine => "Pristine",
            Self::Invalid(_) => "Invalid",
            Self::ValidSilent => "Valid",
            Self::ValidWithSuccessMessage(_) => "Valid",
        }
    }
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {}", self.label(), message),
            None => f.write_str(self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_and_success_are_exclusive() {
        let invalid = FieldStatus::Invalid("Required".to_string());
        assert_eq!(invalid.error(), Some("Required"));
        assert_eq!(invalid.success(), None);

        let success = FieldStatus::ValidWithSuccessMessage("Looks good".to_string());
        assert_eq!(success.error(), None);
        assert_eq!(success.success(), Some("Looks good"));
        assert!(success.is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldStatus::Pristine.to_string(), "Pristine");
        assert_eq!(
            FieldStatus::Invalid("Required".into()).to_string(),
            "Invalid: Required"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&FieldStatus::Invalid("Required".into())).unwrap();
        assert_eq!(json, r#"{"state":"invalid","message":"Required"}"#);
        let json = serde_json::to_string(&FieldStatus::ValidSilent).unwrap();
        assert_eq!(json, r#"{"state":"valid_silent"}"#);
    }
}
