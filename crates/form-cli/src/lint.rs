//! Whole-definition linting.
//!
//! [`Form::from_spec`](form_validate::Form::from_spec) stops at the first
//! configuration error. Linting checks every entry independently so an author
//! sees all problems in one pass.

use std::collections::HashSet;

use form_validate::{CheckboxGroup, FieldConfig, FormError, FormSpec, GroupConfig, NamedRule};
use serde::Serialize;
use tracing::debug;

/// How bad a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The form still builds under the lenient policy.
    Warning,
    /// The form cannot be built.
    Error,
}

/// One problem found in a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    pub entry: String,
    pub severity: Severity,
    pub message: String,
}

impl LintFinding {
    fn from_error(entry: &str, severity: Severity, error: &FormError) -> Self {
        Self {
            entry: entry.to_string(),
            severity,
            message: error.to_string(),
        }
    }
}

/// Check every field and group of a definition.
///
/// Fields with neither pattern nor named rule are warnings: they are accepted
/// leniently but will never validate.
pub fn lint_spec(spec: &FormSpec) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let mut seen = HashSet::new();

    for field in &spec.fields {
        if !seen.insert(field.name.as_str()) {
            let error = FormError::DuplicateField {
                name: field.name.clone(),
            };
            findings.push(LintFinding::from_error(&field.name, Severity::Error, &error));
        }
        match FieldConfig::from_spec(field) {
            Ok(config) if !config.rule.is_configured() => {
                let error = FormError::MissingRule {
                    field: field.name.clone(),
                };
                findings.push(LintFinding::from_error(&field.name, Severity::Warning, &error));
            }
            Ok(_) => {}
            Err(error) => {
                findings.push(LintFinding::from_error(&field.name, Severity::Error, &error));
            }
        }
        if field.pattern.is_none()
            && let Some(NamedRule::LengthBetween { min, max }) = field.rule
            && min > max
        {
            findings.push(LintFinding {
                entry: field.name.clone(),
                severity: Severity::Warning,
                message: format!("length_between min {min} exceeds max {max}; no value can pass"),
            });
        }
    }

    for group in &spec.groups {
        if !seen.insert(group.name.as_str()) {
            let error = FormError::DuplicateField {
                name: group.name.clone(),
            };
            findings.push(LintFinding::from_error(&group.name, Severity::Error, &error));
        }
        if let Err(error) = CheckboxGroup::new(&group.name, GroupConfig::from_spec(group)) {
            findings.push(LintFinding::from_error(&group.name, Severity::Error, &error));
        }
        if !group.required && group.required_message.is_some() {
            findings.push(LintFinding {
                entry: group.name.clone(),
                severity: Severity::Warning,
                message: "required_message is set but the group is optional".to_string(),
            });
        }
    }

    debug!(
        entries = spec.entry_count(),
        findings = findings.len(),
        "lint complete"
    );
    findings
}

/// True if any finding prevents the form from being built.
pub fn has_errors(findings: &[LintFinding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
