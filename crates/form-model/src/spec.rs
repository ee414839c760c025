//! Declarative form definitions.
//!
//! A [`FormSpec`] lists the text fields and checkbox groups of one form. It
//! can be written in TOML or JSON:
//!
//! ```toml
//! title = "Open a writing room"
//!
//! [[fields]]
//! name = "email"
//! label = "Email"
//! input_type = "email"
//! required = "Please enter your email"
//! pattern = '\S+@\S+\.\S+'
//! validate_error_message = "Not a valid email address"
//!
//! [[groups]]
//! name = "category"
//! label = "Category"
//! options = ["Romance", "Fantasy", "SF"]
//! required = true
//! ```
//!
//! Custom closures cannot be expressed in a file; a field may instead name
//! one of the built-in [`NamedRule`]s.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// HTML-style input type of a text field. Display metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
}

impl InputType {
    /// Lowercase name as used in the definition file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
        }
    }
}

/// Built-in validity checks that can be referenced from a definition file.
///
/// Lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedRule {
    /// `local@domain.tld` with no whitespace.
    Email,
    /// One or more ASCII digits.
    Digits,
    /// At least one non-whitespace character.
    NonBlank,
    /// At least `n` characters.
    MinLength(usize),
    /// At most `n` characters.
    MaxLength(usize),
    /// Between `min` and `max` characters, inclusive.
    LengthBetween { min: usize, max: usize },
}

/// Configuration of a single text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSpec {
    /// Unique key within the form.
    pub name: String,
    /// Label rendered above the input.
    pub label: Option<String>,
    /// Placeholder rendered inside the empty input.
    pub placeholder: Option<String>,
    /// Input widget type.
    pub input_type: InputType,
    /// Message shown when the field is empty. Absent means optional.
    pub required: Option<String>,
    /// Regular expression the whole value must match.
    pub pattern: Option<String>,
    /// Built-in rule used when no pattern is given.
    pub rule: Option<NamedRule>,
    /// Message shown when the value is rejected by the rule.
    pub validate_error_message: Option<String>,
    /// Message shown when the value passes the rule.
    pub success_message: Option<String>,
}

impl FieldSpec {
    /// Create a spec with only a name; every option is absent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark the field required with the given message.
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Set the pattern rule.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set a built-in rule.
    #[must_use]
    pub fn rule(mut self, rule: NamedRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Set the rule-failure message.
    #[must_use]
    pub fn validate_error_message(mut self, message: impl Into<String>) -> Self {
        self.validate_error_message = Some(message.into());
        self
    }

    /// Set the success message.
    #[must_use]
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the input type.
    #[must_use]
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }
}

/// Configuration of a checkbox group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupSpec {
    /// Unique key within the form.
    pub name: String,
    /// Label rendered above the checkboxes.
    pub label: Option<String>,
    /// Fixed vocabulary, in display order.
    pub options: Vec<String>,
    /// Whether at least one option must be selected.
    pub required: bool,
    /// Message shown when a required group has no selection.
    pub required_message: Option<String>,
}

impl GroupSpec {
    /// Create an optional group with the given vocabulary.
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Require at least one selection.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the message shown when nothing is selected.
    #[must_use]
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A complete form definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormSpec {
    /// Optional form title.
    pub title: Option<String>,
    /// Text fields in display order.
    pub fields: Vec<FieldSpec>,
    /// Checkbox groups in display order.
    pub groups: Vec<GroupSpec>,
}

impl FormSpec {
    /// Parse a TOML definition.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| FormError::Parse {
            path: path.to_path_buf(),
            format: "TOML",
            reason: e.to_string(),
        })
    }

    /// Parse a JSON definition.
    pub fn from_json_str(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| FormError::Parse {
            path: path.to_path_buf(),
            format: "JSON",
            reason: e.to_string(),
        })
    }

    /// Load a definition file, choosing the parser from the extension
    /// (`.toml` or `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str, &Path) -> Result<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(FormError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let content = fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&content, path)
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Number of fields plus groups.
    pub fn entry_count(&self) -> usize {
        self.fields.len() + self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECRUITMENT_TOML: &str = r#"
title = "공방 개설"

[[fields]]
name = "email"
label = "이메일"
input_type = "email"
required = "이메일을 입력해주세요"
pattern = '^\S+@\S+\.\S+$'
validate_error_message = "이메일 형식이 올바르지 않습니다"

[[fields]]
name = "nickname"
rule = { length_between = { min = 2, max = 10 } }
success_message = "사용 가능한 닉네임입니다"

[[fields]]
name = "phone"
rule = "digits"

[[groups]]
name = "category"
label = "카테고리"
options = ["로맨스", "판타지", "SF"]
required = true
"#;

    #[test]
    fn test_parse_toml_definition() {
        let spec = FormSpec::from_toml_str(RECRUITMENT_TOML, Path::new("form.toml")).unwrap();
        assert_eq!(spec.title.as_deref(), Some("공방 개설"));
        assert_eq!(spec.entry_count(), 4);

        let email = spec.field("email").unwrap();
        assert_eq!(email.input_type, InputType::Email);
        assert_eq!(email.required.as_deref(), Some("이메일을 입력해주세요"));
        assert_eq!(email.pattern.as_deref(), Some(r"^\S+@\S+\.\S+$"));

        let nickname = spec.field("nickname").unwrap();
        assert_eq!(
            nickname.rule,
            Some(NamedRule::LengthBetween { min: 2, max: 10 })
        );
        assert_eq!(spec.field("phone").unwrap().rule, Some(NamedRule::Digits));

        let category = spec.group("category").unwrap();
        assert!(category.required);
        assert_eq!(category.options, vec!["로맨스", "판타지", "SF"]);
    }

    #[test]
    fn test_parse_json_definition() {
        let json = r#"{
            "fields": [{"name": "title", "required": "Required", "rule": {"max_length": 40}}],
            "groups": [{"name": "tags", "options": ["a", "b"]}]
        }"#;
        let spec = FormSpec::from_json_str(json, Path::new("form.json")).unwrap();
        assert_eq!(spec.fields[0].rule, Some(NamedRule::MaxLength(40)));
        assert!(!spec.groups[0].required);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let toml = r#"
[[fields]]
name = "email"
requried = "typo"
"#;
        let error = FormSpec::from_toml_str(toml, Path::new("form.toml")).unwrap_err();
        assert!(matches!(error, FormError::Parse { format: "TOML", .. }));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let error = FormSpec::load(Path::new("form.yaml")).unwrap_err();
        assert!(matches!(error, FormError::UnsupportedFormat { .. }));

        let error = FormSpec::load(Path::new("missing-form-definition.toml")).unwrap_err();
        assert!(matches!(error, FormError::Io { .. }));
    }

    #[test]
    fn test_builders() {
        let field = FieldSpec::new("code")
            .required("Required")
            .pattern("[0-9]+")
            .validate_error_message("Digits only");
        assert_eq!(field.required.as_deref(), Some("Required"));
        assert_eq!(field.input_type, InputType::Text);

        let group = GroupSpec::new("category", ["a", "b"]).required(true);
        assert_eq!(group.options.len(), 2);
        assert!(group.required);
    }
}
