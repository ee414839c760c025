//! Checkbox-group controller.
//!
//! A group is one logical field over a fixed vocabulary of options. Each
//! option toggles independently; a required group is invalid while nothing
//! is selected.

use std::collections::HashSet;

use form_model::{FieldStatus, FormError, GroupSpec, Result};
use tracing::{debug, warn};

/// Message used when a required group has no selection and no message is
/// configured.
pub const DEFAULT_GROUP_REQUIRED_MESSAGE: &str = "Select at least one option";

/// Configuration of a checkbox group.
#[derive(Debug, Clone, Default)]
pub struct GroupConfig {
    /// Fixed vocabulary in display order.
    pub options: Vec<String>,
    /// Whether at least one option must be selected.
    pub required: bool,
    /// Message shown when a required group has no selection.
    pub required_message: Option<String>,
    /// Label rendered above the checkboxes.
    pub label: Option<String>,
}

impl GroupConfig {
    /// Optional group over the given vocabulary.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_spec(spec: &GroupSpec) -> Self {
        Self {
            options: spec.options.clone(),
            required: spec.required,
            required_message: spec.required_message.clone(),
            label: spec.label.clone(),
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

/// Runtime state of one checkbox group.
#[derive(Debug, Clone)]
pub struct CheckboxGroup {
    name: String,
    config: GroupConfig,
    /// Parallel to `config.options`.
    selected: Vec<bool>,
    touched: bool,
}

impl CheckboxGroup {
    /// Create a group with nothing selected.
    ///
    /// The vocabulary must be non-empty and free of duplicates.
    pub fn new(name: impl Into<String>, config: GroupConfig) -> Result<Self> {
        let name = name.into();
        if config.options.is_empty() {
            return Err(FormError::EmptyVocabulary { group: name });
        }
        let mut seen = HashSet::new();
        for option in &config.options {
            if !seen.insert(option.as_str()) {
                return Err(FormError::DuplicateOption {
                    group: name,
                    option: option.clone(),
                });
            }
        }
        let selected = vec![false; config.options.len()];
        Ok(Self {
            name,
            config,
            selected,
            touched: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Vocabulary in display order.
    pub fn options(&self) -> &[String] {
        &self.config.options
    }

    pub fn is_required(&self) -> bool {
        self.config.required
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Reveal validation without a toggle (submit attempt).
    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Selected options in vocabulary order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.config
            .options
            .iter()
            .zip(&self.selected)
            .filter(|(_, on)| **on)
            .map(|(option, _)| option.as_str())
    }

    /// Number of selected options.
    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|on| **on).count()
    }

    /// Whether `option` is currently selected. Unknown options are not.
    pub fn is_selected(&self, option: &str) -> bool {
        self.position(option)
            .is_some_and(|index| self.selected[index])
    }

    /// Flip `option` and return whether it is now selected.
    ///
    /// An option outside the vocabulary leaves the selection untouched and
    /// returns [`FormError::UnknownOption`].
    pub fn toggle(&mut self, option: &str) -> Result<bool> {
        let Some(index) = self.position(option) else {
            warn!(group = %self.name, option, "toggle ignored: option not in vocabulary");
            return Err(FormError::UnknownOption {
                group: self.name.clone(),
                option: option.to_string(),
            });
        };
        let now = !self.selected[index];
        self.selected[index] = now;
        self.touched = true;
        debug!(
            group = %self.name,
            option,
            selected = now,
            selected_count = self.selected_count(),
            "option toggled"
        );
        Ok(now)
    }

    /// `Invalid` when required and nothing is selected, otherwise
    /// `ValidSilent`. Groups have no success message.
    pub fn status(&self) -> FieldStatus {
        if self.config.required && self.selected_count() == 0 {
            let message = self
                .config
                .required_message
                .as_deref()
                .unwrap_or(DEFAULT_GROUP_REQUIRED_MESSAGE);
            FieldStatus::Invalid(message.to_string())
        } else {
            FieldStatus::ValidSilent
        }
    }

    /// Status the host should render: the required error stays hidden until
    /// the group is touched.
    pub fn display_status(&self) -> FieldStatus {
        match self.status() {
            FieldStatus::Invalid(_) if !self.touched => FieldStatus::Pristine,
            status => status,
        }
    }

    fn position(&self, option: &str) -> Option<usize> {
        self.config.options.iter().position(|o| o == option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> CheckboxGroup {
        CheckboxGroup::new(
            "category",
            GroupConfig::new(["로맨스", "판타지", "SF"])
                .required(true)
                .label("카테고리"),
        )
        .unwrap()
    }

    #[test]
    fn test_category_scenario() {
        let mut group = category();
        assert!(group.status().is_invalid());
        assert_eq!(group.selected().count(), 0);

        assert!(group.toggle("SF").unwrap());
        assert_eq!(group.selected().collect::<Vec<_>>(), vec!["SF"]);
        assert_eq!(group.status(), FieldStatus::ValidSilent);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut group = category();
        group.toggle("판타지").unwrap();
        let before: Vec<String> = group.selected().map(String::from).collect();
        group.toggle("SF").unwrap();
        group.toggle("SF").unwrap();
        let after: Vec<String> = group.selected().map(String::from).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_selected_in_vocabulary_order() {
        let mut group = category();
        group.toggle("SF").unwrap();
        group.toggle("로맨스").unwrap();
        assert_eq!(group.selected().collect::<Vec<_>>(), vec!["로맨스", "SF"]);
        assert!(group.is_selected("SF"));
        assert!(!group.is_selected("판타지"));
    }

    #[test]
    fn test_unknown_option_is_a_no_op() {
        let mut group = category();
        group.toggle("SF").unwrap();
        let error = group.toggle("호러").unwrap_err();
        assert!(matches!(error, FormError::UnknownOption { .. }));
        assert!(error.is_configuration());
        assert_eq!(group.selected().collect::<Vec<_>>(), vec!["SF"]);
        assert!(!group.is_selected("호러"));
    }

    #[test]
    fn test_optional_group_is_valid_when_empty() {
        let group = CheckboxGroup::new("tags", GroupConfig::new(["a", "b"])).unwrap();
        assert_eq!(group.status(), FieldStatus::ValidSilent);
    }

    #[test]
    fn test_required_message() {
        let group = CheckboxGroup::new(
            "category",
            GroupConfig::new(["a"])
                .required(true)
                .required_message("카테고리를 선택해주세요"),
        )
        .unwrap();
        assert_eq!(
            group.status(),
            FieldStatus::Invalid("카테고리를 선택해주세요".to_string())
        );

        let group = CheckboxGroup::new("category", GroupConfig::new(["a"]).required(true)).unwrap();
        assert_eq!(group.status().error(), Some(DEFAULT_GROUP_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_display_hidden_until_touched() {
        let mut group = category();
        assert_eq!(group.display_status(), FieldStatus::Pristine);
        group.toggle("SF").unwrap();
        group.toggle("SF").unwrap();
        assert!(group.display_status().is_invalid());
    }

    #[test]
    fn test_vocabulary_validation() {
        let error = CheckboxGroup::new("empty", GroupConfig::default()).unwrap_err();
        assert!(matches!(error, FormError::EmptyVocabulary { .. }));

        let error = CheckboxGroup::new("dup", GroupConfig::new(["a", "b", "a"])).unwrap_err();
        assert!(matches!(error, FormError::DuplicateOption { ref option, .. } if option == "a"));
    }
}
