//! Error types for form configuration and definition loading.
//!
//! User input problems are never errors: they surface as
//! [`FieldStatus::Invalid`](crate::FieldStatus::Invalid). Everything here is
//! a programming or configuration mistake.

use std::path::PathBuf;
use thiserror::Error;

/// Which kind of form entry a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Text input field.
    Field,
    /// Checkbox group.
    Group,
}

impl EntryKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Group => "checkbox group",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while configuring or driving a form.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormError {
    /// A field or group with this name is already registered.
    #[error("'{name}' is already registered")]
    DuplicateField { name: String },

    /// No field or group with this name is registered.
    #[error("no field or group named '{name}' is registered")]
    UnknownField { name: String },

    /// The name is registered, but as the other kind of entry.
    #[error("'{name}' is not a {expected}")]
    KindMismatch { name: String, expected: EntryKind },

    /// Toggled option is outside the group's vocabulary.
    #[error("option '{option}' is not part of checkbox group '{group}'")]
    UnknownOption { group: String, option: String },

    /// The same option appears twice in a group's vocabulary.
    #[error("option '{option}' is declared twice in checkbox group '{group}'")]
    DuplicateOption { group: String, option: String },

    /// A checkbox group was declared with no options.
    #[error("checkbox group '{group}' has no options")]
    EmptyVocabulary { group: String },

    /// A pattern rule failed to compile.
    #[error("invalid pattern for field '{field}' ({pattern}): {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    /// A field has neither a pattern nor a custom predicate.
    #[error("field '{field}' has no pattern or predicate and can never be valid")]
    MissingRule { field: String },

    /// Failed to read a form definition file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a form definition.
    #[error("failed to parse {format} form definition {path}: {reason}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        reason: String,
    },

    /// Definition file extension is neither TOML nor JSON.
    #[error("unsupported form definition format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl FormError {
    /// True for developer mistakes in form configuration or usage, as
    /// opposed to failures reading a definition file.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::Io { .. } | Self::Parse { .. } | Self::UnsupportedFormat { .. }
        )
    }
}

/// Result type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        let duplicate = FormError::DuplicateField {
            name: "email".to_string(),
        };
        assert!(duplicate.is_configuration());
        assert_eq!(duplicate.to_string(), "'email' is already registered");

        let unsupported = FormError::UnsupportedFormat {
            path: PathBuf::from("form.yaml"),
        };
        assert!(!unsupported.is_configuration());
    }

    #[test]
    fn test_kind_mismatch_message() {
        let error = FormError::KindMismatch {
            name: "category".to_string(),
            expected: EntryKind::Field,
        };
        assert_eq!(error.to_string(), "'category' is not a field");
    }
}
