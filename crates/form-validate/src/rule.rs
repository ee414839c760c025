//! Rule evaluation.
//!
//! A [`Rule`] answers one question: does this whole value pass? It never
//! panics and never has side effects. An unconfigured rule fails closed.

use std::fmt;
use std::sync::{Arc, LazyLock};

use form_model::{FormError, NamedRule, Result};
use regex::Regex;

/// Email shape: `local@domain.tld`, no whitespace.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid email regex"));

/// Caller-supplied validity check.
///
/// Must be pure and must return `false` (not panic) for malformed input,
/// including the empty string.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A compiled validity rule for a text field.
#[derive(Clone, Default)]
pub enum Rule {
    /// Whole-value regular expression match.
    Pattern(Regex),
    /// One of the built-in checks.
    Named(NamedRule),
    /// Arbitrary caller-supplied check.
    Custom(Predicate),
    /// Nothing configured; every value is rejected.
    #[default]
    Unconfigured,
}

impl Rule {
    /// Compile a pattern rule. The pattern is anchored at both ends so only
    /// a match of the entire value passes.
    ///
    /// The raw pattern must compile on its own before it is wrapped, so a
    /// stray `)` cannot close the anchoring group early.
    pub fn pattern(field: &str, pattern: &str) -> Result<Self> {
        let invalid = |e: regex::Error| FormError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        };
        Regex::new(pattern).map_err(invalid)?;
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Self::Pattern)
            .map_err(invalid)
    }

    /// Wrap a closure as a custom rule.
    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Whether a check is configured at all.
    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::Unconfigured)
    }

    /// Evaluate the rule against a value.
    pub fn evaluate(&self, value: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(value),
            Self::Named(named) => evaluate_named(*named, value),
            Self::Custom(predicate) => predicate(value),
            Self::Unconfigured => false,
        }
    }

    /// Short description for logs and tables.
    pub fn describe(&self) -> String {
        match self {
            Self::Pattern(regex) => format!("pattern {}", regex.as_str()),
            Self::Named(named) => describe_named(*named),
            Self::Custom(_) => "custom predicate".to_string(),
            Self::Unconfigured => "none".to_string(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Named(named) => f.debug_tuple("Named").field(named).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Evaluate a rule; free-function form of [`Rule::evaluate`].
pub fn evaluate(value: &str, rule: &Rule) -> bool {
    rule.evaluate(value)
}

fn evaluate_named(rule: NamedRule, value: &str) -> bool {
    match rule {
        NamedRule::Email => EMAIL_REGEX.is_match(value),
        NamedRule::Digits => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
        NamedRule::NonBlank => value.chars().any(|c| !c.is_whitespace()),
        NamedRule::MinLength(min) => !value.is_empty() && char_len(value) >= min,
        NamedRule::MaxLength(max) => !value.is_empty() && char_len(value) <= max,
        NamedRule::LengthBetween { min, max } => {
            let len = char_len(value);
            len >= min && len <= max && len > 0
        }
    }
}

fn describe_named(rule: NamedRule) -> String {
    match rule {
        NamedRule::Email => "email".to_string(),
        NamedRule::Digits => "digits".to_string(),
        NamedRule::NonBlank => "non-blank".to_string(),
        NamedRule::MinLength(min) => format!("min length {min}"),
        NamedRule::MaxLength(max) => format!("max length {max}"),
        NamedRule::LengthBetween { min, max } => format!("length {min}..={max}"),
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_requires_full_match() {
        let rule = Rule::pattern("code", "[0-9]+").unwrap();
        assert!(rule.evaluate("12345"));
        assert!(!rule.evaluate("123a"));
        assert!(!rule.evaluate("a123"));
        assert!(!rule.evaluate(""));
    }

    #[test]
    fn test_already_anchored_pattern() {
        let rule = Rule::pattern("email", r"^\S+@\S+\.\S+$").unwrap();
        assert!(rule.evaluate("a@b.com"));
        assert!(!rule.evaluate("not-an-email"));
        assert!(!rule.evaluate("a@b.com and more"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let rule = Rule::pattern("answer", "yes|no").unwrap();
        assert!(rule.evaluate("yes"));
        assert!(rule.evaluate("no"));
        assert!(!rule.evaluate("yesno"));
        assert!(!rule.evaluate("nope"));
    }

    #[test]
    fn test_invalid_pattern() {
        let error = Rule::pattern("code", "[0-9").unwrap_err();
        assert!(matches!(error, FormError::InvalidPattern { ref field, .. } if field == "code"));
    }

    #[test]
    fn test_unbalanced_group_cannot_escape_anchors() {
        let error = Rule::pattern("code", "a)|(b").unwrap_err();
        assert!(matches!(error, FormError::InvalidPattern { ref pattern, .. } if pattern == "a)|(b"));

        for pattern in ["[0-9]+)|(.*", ")", "x)(?:y"] {
            assert!(
                Rule::pattern("code", pattern).is_err(),
                "{pattern:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_custom_predicate_is_delegated() {
        let rule = Rule::custom(|v| v.starts_with("novel-"));
        assert!(rule.evaluate("novel-1"));
        assert!(!rule.evaluate("poem-1"));
    }

    #[test]
    fn test_unconfigured_fails_closed() {
        let rule = Rule::default();
        assert!(!rule.is_configured());
        assert!(!rule.evaluate(""));
        assert!(!rule.evaluate("anything"));
        assert!(!evaluate("a@b.com", &rule));
    }

    #[test]
    fn test_named_rules() {
        assert!(Rule::Named(NamedRule::Email).evaluate("writer@novel.kr"));
        assert!(!Rule::Named(NamedRule::Email).evaluate("writer@novel"));

        assert!(Rule::Named(NamedRule::Digits).evaluate("01012345678"));
        assert!(!Rule::Named(NamedRule::Digits).evaluate(""));
        assert!(!Rule::Named(NamedRule::Digits).evaluate("010-1234"));

        assert!(Rule::Named(NamedRule::NonBlank).evaluate(" a "));
        assert!(!Rule::Named(NamedRule::NonBlank).evaluate("   "));

        assert!(Rule::Named(NamedRule::MaxLength(3)).evaluate("abc"));
        assert!(!Rule::Named(NamedRule::MaxLength(3)).evaluate("abcd"));
        assert!(!Rule::Named(NamedRule::MaxLength(3)).evaluate(""));
    }

    #[test]
    fn test_lengths_count_characters() {
        let rule = Rule::Named(NamedRule::LengthBetween { min: 2, max: 4 });
        // Four Hangul syllables are twelve bytes.
        assert!(rule.evaluate("판타지물"));
        assert!(!rule.evaluate("판"));
        assert!(!rule.evaluate("판타지소설"));
        assert!(Rule::Named(NamedRule::MinLength(2)).evaluate("SF"));
    }

    #[test]
    fn test_debug_and_describe() {
        let rule = Rule::pattern("code", "[0-9]+").unwrap();
        assert_eq!(format!("{rule:?}"), r#"Pattern("^(?:[0-9]+)$")"#);
        assert_eq!(rule.describe(), "pattern ^(?:[0-9]+)$");
        assert_eq!(Rule::custom(|_| true).describe(), "custom predicate");
        assert_eq!(
            Rule::Named(NamedRule::LengthBetween { min: 2, max: 10 }).describe(),
            "length 2..=10"
        );
    }
}
