//! Text field controller.
//!
//! A [`FieldController`] owns one input's value and `touched` flag and
//! derives its [`FieldStatus`] from them on every read:
//!
//! 1. empty and required        -> `Invalid(required message)`
//! 2. empty and optional        -> `Pristine`
//! 3. rejected by the rule      -> `Invalid(validate error message)`
//! 4. success message non-empty -> `ValidWithSuccessMessage`
//! 5. otherwise                 -> `ValidSilent`
//!
//! Required-ness is always checked before the rule, so an empty required
//! field reports the required message even if the rule would also reject
//! the empty string.

use form_model::{FieldSpec, FieldStatus, InputType, Result};
use tracing::{debug, warn};

use crate::rule::Rule;

/// Message used when a value is rejected and no message is configured.
pub const DEFAULT_VALIDATE_ERROR_MESSAGE: &str = "Invalid value";

/// Validation and display configuration of a text field.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    /// Message shown when empty. `None` makes the field optional.
    pub required: Option<String>,
    /// Validity rule for non-empty values.
    pub rule: Rule,
    /// Message shown when the rule rejects the value.
    pub validate_error_message: Option<String>,
    /// Message shown when the value passes.
    pub success_message: Option<String>,
    /// Label rendered above the input.
    pub label: Option<String>,
    /// Placeholder rendered inside the empty input.
    pub placeholder: Option<String>,
    /// Input widget type.
    pub input_type: InputType,
}

impl FieldConfig {
    /// Optional field with no rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a declarative spec. A pattern takes precedence over a named
    /// rule when both are given.
    pub fn from_spec(spec: &FieldSpec) -> Result<Self> {
        let rule = match (&spec.pattern, spec.rule) {
            (Some(pattern), named) => {
                if let Some(named) = named {
                    warn!(
                        field = %spec.name,
                        ?named,
                        "both pattern and named rule configured; using the pattern"
                    );
                }
                Rule::pattern(&spec.name, pattern)?
            }
            (None, Some(named)) => Rule::Named(named),
            (None, None) => Rule::Unconfigured,
        };
        Ok(Self {
            required: spec.required.clone(),
            rule,
            validate_error_message: spec.validate_error_message.clone(),
            success_message: spec.success_message.clone(),
            label: spec.label.clone(),
            placeholder: spec.placeholder.clone(),
            input_type: spec.input_type,
        })
    }

    /// Mark the field required with the given message.
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Set the rule. A custom predicate already in place is kept: the
    /// host-supplied check wins over patterns and built-in rules whichever
    /// builder call comes last.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        if matches!(self.rule, Rule::Custom(_)) && !matches!(rule, Rule::Custom(_)) {
            warn!(
                ignored = %rule.describe(),
                "custom predicate already configured; ignoring rule"
            );
            return self;
        }
        self.rule = rule;
        self
    }

    /// Use a custom predicate. Replaces any configured pattern.
    #[must_use]
    pub fn custom(mut self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        if let Rule::Pattern(regex) = &self.rule {
            warn!(pattern = regex.as_str(), "custom predicate replaces configured pattern");
        }
        self.rule = Rule::custom(predicate);
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

    fn validate_error_text(&self) -> &str {
        self.validate_error_message
            .as_deref()
            .unwrap_or(DEFAULT_VALIDATE_ERROR_MESSAGE)
    }
}

/// Runtime state of one text field.
#[derive(Debug, Clone)]
pub struct FieldController {
    name: String,
    config: FieldConfig,
    value: String,
    touched: bool,
}

impl FieldController {
    /// Create an empty, untouched field.
    pub fn new(name: impl Into<String>, config: FieldConfig) -> Self {
        Self {
            name: name.into(),
            config,
            value: String::new(),
            touched: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn is_required(&self) -> bool {
        self.config.required.is_some()
    }

    /// Whether the field has been blurred or revealed by a submit attempt.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Replace the value. Never clears `touched`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let before = self.status();
        self.value = value.into();
        let after = self.status();
        if before != after {
            debug!(
                field = %self.name,
                from = before.label(),
                to = after.label(),
                touched = self.touched,
                "field status changed"
            );
        }
    }

    /// Mark the field touched and return its recomputed status.
    pub fn on_blur(&mut self) -> FieldStatus {
        self.mark_touched();
        let status = self.status();
        debug!(field = %self.name, status = status.label(), "field blurred");
        status
    }

    /// Reveal validation without a blur (submit attempt).
    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Current status, derived from value and configuration.
    pub fn status(&self) -> FieldStatus {
        let config = &self.config;
        if self.value.is_empty() {
            return match &config.required {
                Some(message) => FieldStatus::Invalid(message.clone()),
                None => FieldStatus::Pristine,
            };
        }
        if !config.rule.evaluate(&self.value) {
            return FieldStatus::Invalid(config.validate_error_text().to_string());
        }
        match config.success_message.as_deref() {
            Some(message) if !message.is_empty() => {
                FieldStatus::ValidWithSuccessMessage(message.to_string())
            }
            _ => FieldStatus::ValidSilent,
        }
    }

    /// Status the host should render: errors stay hidden until the field is
    /// touched. Success messages are shown whether touched or not.
    pub fn display_status(&self) -> FieldStatus {
        match self.status() {
            FieldStatus::Invalid(_) if !self.touched => FieldStatus::Pristine,
            status => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_field() -> FieldController {
        FieldController::new(
            "email",
            FieldConfig::new()
                .required("이메일을 입력해주세요")
                .rule(Rule::pattern("email", r"^\S+@\S+\.\S+$").unwrap())
                .validate_error_message("이메일 형식이 올바르지 않습니다"),
        )
    }

    #[test]
    fn test_required_checked_before_rule() {
        let field = FieldController::new(
            "code",
            FieldConfig::new()
                .required("Required")
                .rule(Rule::pattern("code", "^[0-9]+$").unwrap())
                .validate_error_message("Digits only"),
        );
        assert_eq!(field.status(), FieldStatus::Invalid("Required".to_string()));
    }

    #[test]
    fn test_empty_optional_is_pristine() {
        let field = FieldController::new("bio", FieldConfig::new().rule(Rule::custom(|_| false)));
        assert_eq!(field.status(), FieldStatus::Pristine);
    }

    #[test]
    fn test_email_scenario() {
        let mut field = email_field();
        field.set_value("");
        assert_eq!(
            field.on_blur(),
            FieldStatus::Invalid("이메일을 입력해주세요".to_string())
        );

        field.set_value("a@b.com");
        assert_eq!(field.status(), FieldStatus::ValidSilent);

        field.set_value("not-an-email");
        assert_eq!(
            field.status(),
            FieldStatus::Invalid("이메일 형식이 올바르지 않습니다".to_string())
        );
    }

    #[test]
    fn test_default_validate_error_message() {
        let mut field =
            FieldController::new("code", FieldConfig::new().rule(Rule::custom(|v| v == "ok")));
        field.set_value("nope");
        assert_eq!(
            field.status(),
            FieldStatus::Invalid(DEFAULT_VALIDATE_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_success_message() {
        let mut field = FieldController::new(
            "nickname",
            FieldConfig::new()
                .rule(Rule::custom(|v| v.len() >= 2))
                .success_message("사용 가능한 닉네임입니다"),
        );
        field.set_value("ab");
        assert_eq!(
            field.status(),
            FieldStatus::ValidWithSuccessMessage("사용 가능한 닉네임입니다".to_string())
        );
    }

    #[test]
    fn test_empty_success_message_is_silent() {
        let mut field = FieldController::new(
            "nickname",
            FieldConfig::new()
                .rule(Rule::custom(|_| true))
                .success_message(""),
        );
        field.set_value("ab");
        assert_eq!(field.status(), FieldStatus::ValidSilent);
    }

    #[test]
    fn test_unconfigured_rule_never_succeeds() {
        let mut field = FieldController::new("anything", FieldConfig::new().success_message("ok"));
        for value in ["a", "a@b.com", "12345", " "] {
            field.set_value(value);
            assert!(field.status().is_invalid(), "{value:?} should fail closed");
        }
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut field = email_field();
        field.set_value("not-an-email");
        assert!(field.status().is_invalid());
        assert_eq!(field.display_status(), FieldStatus::Pristine);

        field.on_blur();
        assert!(field.display_status().is_invalid());
    }

    #[test]
    fn test_success_shown_before_touch() {
        let mut field = FieldController::new(
            "nickname",
            FieldConfig::new()
                .rule(Rule::custom(|_| true))
                .success_message("Looks good"),
        );
        field.set_value("prefilled");
        assert!(!field.is_touched());
        assert_eq!(field.display_status().success(), Some("Looks good"));
    }

    #[test]
    fn test_touched_is_sticky() {
        let mut field = email_field();
        field.on_blur();
        field.set_value("a@b.com");
        field.set_value("");
        assert!(field.is_touched());
        assert_eq!(
            field.display_status(),
            FieldStatus::Invalid("이메일을 입력해주세요".to_string())
        );
    }

    #[test]
    fn test_from_spec_prefers_pattern() {
        let spec = FieldSpec::new("code")
            .pattern("[0-9]+")
            .rule(form_model::NamedRule::Email);
        let config = FieldConfig::from_spec(&spec).unwrap();
        assert!(matches!(config.rule, Rule::Pattern(_)));
        assert!(config.rule.evaluate("42"));
    }

    #[test]
    fn test_custom_replaces_pattern() {
        let config = FieldConfig::new()
            .rule(Rule::pattern("code", "[0-9]+").unwrap())
            .custom(|v| v == "letters");
        assert!(config.rule.evaluate("letters"));
        assert!(!config.rule.evaluate("42"));
    }

    #[test]
    fn test_custom_wins_over_later_pattern() {
        let config = FieldConfig::new()
            .custom(|v| v == "letters")
            .rule(Rule::pattern("code", "[0-9]+").unwrap());
        assert!(matches!(config.rule, Rule::Custom(_)));
        assert!(config.rule.evaluate("letters"));
        assert!(!config.rule.evaluate("42"));

        let config = FieldConfig::new()
            .custom(|v| v == "letters")
            .rule(Rule::Named(form_model::NamedRule::Digits));
        assert!(!config.rule.evaluate("42"));

        let config = FieldConfig::new()
            .custom(|v| v == "a")
            .rule(Rule::custom(|v| v == "b"));
        assert!(config.rule.evaluate("b"));
    }
}
