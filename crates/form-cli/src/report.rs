//! Serializable views of a form's state for `check` and `replay` output.

use form_validate::{
    EntryRef, EventOutcome, FieldController, FieldStatus, Form, InputType, SubmitOutcome,
};
use serde::Serialize;

/// Shown instead of the value of a password field.
pub const MASKED_VALUE: &str = "********";

/// One row of the status table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub name: String,
    pub kind: &'static str,
    pub required: bool,
    pub touched: bool,
    pub value: String,
    /// What the host would render.
    pub display: FieldStatus,
}

fn is_secret(field: &FieldController) -> bool {
    field.config().input_type == InputType::Password && !field.value().is_empty()
}

impl StatusRow {
    pub fn from_entry(entry: EntryRef<'_>) -> Self {
        let value = match entry {
            EntryRef::Field(field) if is_secret(field) => MASKED_VALUE.to_string(),
            _ => entry.value_text(),
        };
        Self {
            name: entry.name().to_string(),
            kind: entry.kind().label(),
            required: entry.is_required(),
            touched: entry.is_touched(),
            value,
            display: entry.display_status(),
        }
    }
}

/// Rows for every entry in registration order.
pub fn status_rows(form: &Form) -> Vec<StatusRow> {
    form.entries().map(StatusRow::from_entry).collect()
}

/// Replace password values in an accepted submission with [`MASKED_VALUE`].
pub fn mask_outcome(form: &Form, outcome: SubmitOutcome) -> SubmitOutcome {
    match outcome {
        SubmitOutcome::Accepted(mut values) => {
            for entry in form.entries() {
                if let EntryRef::Field(field) = entry
                    && is_secret(field)
                    && let Some(value) = values.fields.get_mut(field.name())
                {
                    *value = MASKED_VALUE.to_string();
                }
            }
            SubmitOutcome::Accepted(values)
        }
        rejected @ SubmitOutcome::Rejected(_) => rejected,
    }
}

/// Final state of a form after `check` or `replay`.
#[derive(Debug, Clone, Serialize)]
pub struct FormReport {
    pub title: Option<String>,
    pub entries: Vec<StatusRow>,
    pub submittable: bool,
    pub submit_attempts: usize,
    /// Most recent submit attempt, if any ran. Password values are masked.
    pub outcome: Option<SubmitOutcome>,
}

impl FormReport {
    pub fn new(form: &Form, outcome: Option<SubmitOutcome>) -> Self {
        Self {
            title: form.title().map(String::from),
            entries: status_rows(form),
            submittable: form.is_submittable(),
            submit_attempts: form.submit_attempts(),
            outcome: outcome.map(|outcome| mask_outcome(form, outcome)),
        }
    }
}

/// One replayed event and what it produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub event: &'static str,
    pub target: Option<String>,
    #[serde(flatten)]
    pub outcome: EventOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_validate::{FieldConfig, GroupConfig, Rule};

    #[test]
    fn test_password_values_are_masked() {
        let mut form = Form::new();
        form.register_field(
            "password",
            FieldConfig::new()
                .input_type(InputType::Password)
                .rule(Rule::custom(|v| v.len() >= 8)),
        )
        .unwrap();
        form.register_group("tags", GroupConfig::new(["a", "b"]))
            .unwrap();

        let rows = status_rows(&form);
        assert_eq!(rows[0].value, "");

        form.set_value("password", "hunter22").unwrap();
        form.toggle_option("tags", "b").unwrap();
        form.toggle_option("tags", "a").unwrap();
        let rows = status_rows(&form);
        assert_eq!(rows[0].value, MASKED_VALUE);
        assert_eq!(rows[1].value, "a, b");
        assert_eq!(rows[1].kind, "checkbox group");
    }

    #[test]
    fn test_accepted_outcome_masks_passwords() {
        let mut form = Form::new();
        form.register_field("user", FieldConfig::new().rule(Rule::custom(|_| true)))
            .unwrap();
        form.register_field(
            "password",
            FieldConfig::new()
                .input_type(InputType::Password)
                .rule(Rule::custom(|v| v.len() >= 8)),
        )
        .unwrap();
        form.set_value("user", "writer").unwrap();
        form.set_value("password", "hunter22secret").unwrap();

        let report = FormReport::new(&form, Some(form.clone().attempt_submit()));
        let Some(SubmitOutcome::Accepted(values)) = &report.outcome else {
            panic!("expected accepted submission");
        };
        assert_eq!(values.field("password"), Some(MASKED_VALUE));
        assert_eq!(values.field("user"), Some("writer"));
    }
}
