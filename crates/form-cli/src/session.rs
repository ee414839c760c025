//! Driving a [`Form`] from command-line assignments or an event script.

use form_validate::{EventOutcome, Form, FormError, FormEvent, SubmitOutcome};
use tracing::{debug, trace};

use crate::logging::redact_value;
use crate::report::{ReplayStep, mask_outcome};

/// A form operation that failed, with the position that caused it.
#[derive(Debug, thiserror::Error)]
#[error("{position}: {source}")]
pub struct SessionError {
    pub position: String,
    #[source]
    pub source: FormError,
}

/// Apply `--set` and `--select` assignments, then attempt one submission.
///
/// Fields are blurred after they are set so errors show as they would after
/// a user tabs through the form.
pub fn fill_and_submit(
    form: &mut Form,
    sets: &[(String, String)],
    selects: &[(String, String)],
) -> Result<SubmitOutcome, SessionError> {
    for (name, value) in sets {
        trace!(field = %name, value = redact_value(value), "set");
        form.set_value(name, value.as_str())
            .and_then(|()| form.blur(name))
            .map_err(|source| SessionError {
                position: format!("--set {name}"),
                source,
            })?;
    }
    for (group, option) in selects {
        let selected = form
            .toggle_option(group, option)
            .map_err(|source| SessionError {
                position: format!("--select {group}={option}"),
                source,
            })?;
        debug!(group = %group, option = %option, selected, "toggled");
    }
    Ok(form.attempt_submit())
}

/// Apply events in order. Stops at the first event the form rejects.
pub fn replay(form: &mut Form, events: Vec<FormEvent>) -> Result<Vec<ReplayStep>, SessionError> {
    let mut steps = Vec::with_capacity(events.len());
    for (index, event) in events.into_iter().enumerate() {
        if let FormEvent::Change { field, value } = &event {
            trace!(index, field = %field, value = redact_value(value), "change");
        }
        let kind = event.kind();
        let target = event.target().map(String::from);
        let outcome = match form.apply(event) {
            Ok(EventOutcome::Submit { outcome }) => EventOutcome::Submit {
                outcome: mask_outcome(form, outcome),
            },
            Ok(outcome) => outcome,
            Err(source) => {
                return Err(SessionError {
                    position: format!("event {}", index + 1),
                    source,
                });
            }
        };
        steps.push(ReplayStep {
            index: index + 1,
            event: kind,
            target,
            outcome,
        });
    }
    Ok(steps)
}

/// Outcome of the last submit attempt in a replay, if any.
pub fn last_submit(steps: &[ReplayStep]) -> Option<SubmitOutcome> {
    steps.iter().rev().find_map(|step| match &step.outcome {
        EventOutcome::Submit { outcome } => Some(outcome.clone()),
        EventOutcome::Entry { .. } => None,
    })
}
