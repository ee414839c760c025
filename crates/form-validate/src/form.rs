//! Form state container.
//!
//! A [`Form`] owns every field and checkbox group of one form instance and
//! answers the questions the host asks on each render: what does each entry
//! show, which entries are invalid, and may the form be submitted.
//!
//! All operations are synchronous and take `&mut self`; a form is owned by
//! exactly one page lifecycle and dropped when the page goes away or the
//! submission is accepted ([`Form::into_values`]).

use std::collections::{BTreeMap, HashMap};

use form_model::{EntryKind, FieldStatus, FormError, FormEvent, FormSpec, Result};
use tracing::{debug, info, warn};

use crate::field::{FieldConfig, FieldController};
use crate::group::{CheckboxGroup, GroupConfig};
use crate::submit::{EventOutcome, FormValues, SubmitOutcome};

/// How registration treats fields that can never validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConfigPolicy {
    /// Reject a field with neither pattern nor predicate
    /// ([`FormError::MissingRule`]). Use during development.
    Strict,
    /// Accept it with a warning; the field fails closed.
    #[default]
    Lenient,
}

#[derive(Debug, Clone)]
enum Entry {
    Field(FieldController),
    Group(CheckboxGroup),
}

/// Borrowed view of one registered entry.
#[derive(Debug, Clone, Copy)]
pub enum EntryRef<'a> {
    Field(&'a FieldController),
    Group(&'a CheckboxGroup),
}

impl<'a> EntryRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Field(field) => field.name(),
            Self::Group(group) => group.name(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Field(_) => EntryKind::Field,
            Self::Group(_) => EntryKind::Group,
        }
    }

    pub fn label(&self) -> Option<&'a str> {
        match self {
            Self::Field(field) => field.config().label.as_deref(),
            Self::Group(group) => group.config().label.as_deref(),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Self::Field(field) => field.is_required(),
            Self::Group(group) => group.is_required(),
        }
    }

    pub fn is_touched(&self) -> bool {
        match self {
            Self::Field(field) => field.is_touched(),
            Self::Group(group) => group.is_touched(),
        }
    }

    pub fn status(&self) -> FieldStatus {
        match self {
            Self::Field(field) => field.status(),
            Self::Group(group) => group.status(),
        }
    }

    pub fn display_status(&self) -> FieldStatus {
        match self {
            Self::Field(field) => field.display_status(),
            Self::Group(group) => group.display_status(),
        }
    }

    /// Field value, or the comma-joined selection of a group.
    pub fn value_text(&self) -> String {
        match self {
            Self::Field(field) => field.value().to_string(),
            Self::Group(group) => group.selected().collect::<Vec<_>>().join(", "),
        }
    }
}

impl Entry {
    fn view(&self) -> EntryRef<'_> {
        match self {
            Self::Field(field) => EntryRef::Field(field),
            Self::Group(group) => EntryRef::Group(group),
        }
    }

    fn mark_touched(&mut self) {
        match self {
            Self::Field(field) => field.mark_touched(),
            Self::Group(group) => group.mark_touched(),
        }
    }
}

/// Aggregate state of one form instance.
#[derive(Debug, Clone, Default)]
pub struct Form {
    title: Option<String>,
    policy: ConfigPolicy,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    submit_attempts: usize,
}

impl Form {
    /// Empty form with the lenient policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty form with the given policy.
    pub fn with_policy(policy: ConfigPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a form from a declarative definition. Fields are registered
    /// before groups, each in definition order.
    pub fn from_spec(spec: &FormSpec, policy: ConfigPolicy) -> Result<Self> {
        let mut form = Self::with_policy(policy);
        form.title = spec.title.clone();
        for field in &spec.fields {
            form.register_field(&field.name, FieldConfig::from_spec(field)?)?;
        }
        for group in &spec.groups {
            form.register_group(&group.name, GroupConfig::from_spec(group))?;
        }
        info!(
            title = form.title.as_deref().unwrap_or(""),
            fields = spec.fields.len(),
            groups = spec.groups.len(),
            "form built from definition"
        );
        Ok(form)
    }

    /// Set the title.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn policy(&self) -> ConfigPolicy {
        self.policy
    }

    /// Number of registered fields and groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many submit attempts have run.
    pub fn submit_attempts(&self) -> usize {
        self.submit_attempts
    }

    /// Register a text field. Names are unique across fields and groups.
    pub fn register_field(&mut self, name: &str, config: FieldConfig) -> Result<()> {
        self.ensure_unregistered(name)?;
        if !config.rule.is_configured() {
            match self.policy {
                ConfigPolicy::Strict => {
                    return Err(FormError::MissingRule {
                        field: name.to_string(),
                    });
                }
                ConfigPolicy::Lenient => {
                    warn!(field = name, "field has no pattern or predicate; it will never validate");
                }
            }
        }
        debug!(field = name, rule = %config.rule.describe(), "field rule");
        self.insert(name, Entry::Field(FieldController::new(name, config)));
        Ok(())
    }

    /// Register a checkbox group. Names are unique across fields and groups.
    pub fn register_group(&mut self, name: &str, config: GroupConfig) -> Result<()> {
        self.ensure_unregistered(name)?;
        let group = CheckboxGroup::new(name, config)?;
        self.insert(name, Entry::Group(group));
        Ok(())
    }

    /// Current value of a text field.
    pub fn value(&self, name: &str) -> Result<&str> {
        Ok(self.field(name)?.value())
    }

    /// Replace the value of a text field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.field_mut(name)?.set_value(value);
        Ok(())
    }

    /// Blur a text field and return its recomputed status.
    pub fn blur(&mut self, name: &str) -> Result<FieldStatus> {
        Ok(self.field_mut(name)?.on_blur())
    }

    /// Selected options of a group, in vocabulary order.
    pub fn selected(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.group(name)?.selected().map(String::from).collect())
    }

    /// Toggle an option of a group; returns whether it is now selected.
    pub fn toggle_option(&mut self, name: &str, option: &str) -> Result<bool> {
        self.group_mut(name)?.toggle(option)
    }

    /// Status of a field or group.
    pub fn status(&self, name: &str) -> Result<FieldStatus> {
        Ok(self.entry(name)?.view().status())
    }

    /// Rendered status of a field or group.
    pub fn display_status(&self, name: &str) -> Result<FieldStatus> {
        Ok(self.entry(name)?.view().display_status())
    }

    /// Every entry in registration order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRef<'_>> {
        self.entries.iter().map(Entry::view)
    }

    /// Borrow a registered text field.
    pub fn field(&self, name: &str) -> Result<&FieldController> {
        match self.entry(name)? {
            Entry::Field(field) => Ok(field),
            Entry::Group(_) => Err(kind_mismatch(name, EntryKind::Field)),
        }
    }

    /// Borrow a registered checkbox group.
    pub fn group(&self, name: &str) -> Result<&CheckboxGroup> {
        match self.entry(name)? {
            Entry::Group(group) => Ok(group),
            Entry::Field(_) => Err(kind_mismatch(name, EntryKind::Group)),
        }
    }

    /// True iff no field or group is `Invalid`. `Pristine` does not block.
    pub fn is_submittable(&self) -> bool {
        self.entries().all(|entry| !entry.status().is_invalid())
    }

    /// Messages of every invalid entry, touched or not.
    pub fn errors_snapshot(&self) -> BTreeMap<String, String> {
        self.entries()
            .filter_map(|entry| match entry.status() {
                FieldStatus::Invalid(message) => Some((entry.name().to_string(), message)),
                _ => None,
            })
            .collect()
    }

    /// Current values of every entry.
    pub fn values(&self) -> FormValues {
        let mut values = FormValues::default();
        for entry in self.entries() {
            match entry {
                EntryRef::Field(field) => {
                    values
                        .fields
                        .insert(field.name().to_string(), field.value().to_string());
                }
                EntryRef::Group(group) => {
                    values.groups.insert(
                        group.name().to_string(),
                        group.selected().map(String::from).collect(),
                    );
                }
            }
        }
        values
    }

    /// Reveal every entry's status and decide whether the form may be sent.
    pub fn attempt_submit(&mut self) -> SubmitOutcome {
        self.submit_attempts += 1;
        for entry in &mut self.entries {
            entry.mark_touched();
        }
        let errors = self.errors_snapshot();
        if errors.is_empty() {
            info!(attempt = self.submit_attempts, "submit accepted");
            SubmitOutcome::Accepted(self.values())
        } else {
            info!(
                attempt = self.submit_attempts,
                invalid = errors.len(),
                "submit rejected"
            );
            SubmitOutcome::Rejected(errors)
        }
    }

    /// Consume the form after an accepted submission.
    pub fn into_values(self) -> FormValues {
        self.values()
    }

    /// Apply one host event.
    pub fn apply(&mut self, event: FormEvent) -> Result<EventOutcome> {
        debug!(event = event.kind(), target = event.target().unwrap_or(""), "applying event");
        match event {
            FormEvent::Change { field, value } => {
                self.set_value(&field, value)?;
                let status = self.display_status(&field)?;
                Ok(EventOutcome::Entry {
                    name: field,
                    status,
                })
            }
            FormEvent::Blur { field } => {
                let status = self.blur(&field)?;
                Ok(EventOutcome::Entry {
                    name: field,
                    status,
                })
            }
            FormEvent::Toggle { group, option } => {
                self.toggle_option(&group, &option)?;
                let status = self.display_status(&group)?;
                Ok(EventOutcome::Entry {
                    name: group,
                    status,
                })
            }
            FormEvent::SubmitAttempt => Ok(EventOutcome::Submit {
                outcome: self.attempt_submit(),
            }),
        }
    }

    fn ensure_unregistered(&self, name: &str) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(FormError::DuplicateField {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, entry: Entry) {
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(entry);
        debug!(name, "entry registered");
    }

    fn entry(&self, name: &str) -> Result<&Entry> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| unknown(name))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut Entry> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.entries[i]),
            None => Err(unknown(name)),
        }
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FieldController> {
        match self.entry_mut(name)? {
            Entry::Field(field) => Ok(field),
            Entry::Group(_) => Err(kind_mismatch(name, EntryKind::Field)),
        }
    }

    fn group_mut(&mut self, name: &str) -> Result<&mut CheckboxGroup> {
        match self.entry_mut(name)? {
            Entry::Group(group) => Ok(group),
            Entry::Field(_) => Err(kind_mismatch(name, EntryKind::Group)),
        }
    }
}

fn unknown(name: &str) -> FormError {
    FormError::UnknownField {
        name: name.to_string(),
    }
}

fn kind_mismatch(name: &str, expected: EntryKind) -> FormError {
    FormError::KindMismatch {
        name: name.to_string(),
        expected,
    }
}
