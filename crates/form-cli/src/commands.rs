use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use form_cli::lint::{LintFinding, has_errors, lint_spec};
use form_cli::report::{FormReport, ReplayStep};
use form_cli::session::{fill_and_submit, last_submit, replay};
use form_validate::{ConfigPolicy, Form, FormEvent, FormSpec};

use crate::cli::{CheckArgs, LintArgs, ReplayArgs};

pub fn run_lint(args: &LintArgs) -> Result<Vec<LintFinding>> {
    let span = info_span!("lint", form = %args.form.display());
    let _guard = span.enter();
    let spec = load_spec(&args.form)?;
    let findings = lint_spec(&spec);
    if has_errors(&findings) {
        warn!(findings = findings.len(), "definition has errors");
    } else {
        info!(findings = findings.len(), "definition is usable");
    }
    Ok(findings)
}

pub fn run_check(args: &CheckArgs) -> Result<FormReport> {
    let span = info_span!("check", form = %args.form.display());
    let _guard = span.enter();
    let start = Instant::now();
    let mut form = build_form(&args.form, policy(args.strict))?;
    let outcome = fill_and_submit(&mut form, &args.set, &args.select)?;
    info!(
        accepted = outcome.is_accepted(),
        duration_ms = start.elapsed().as_millis(),
        "check complete"
    );
    Ok(FormReport::new(&form, Some(outcome)))
}

pub fn run_replay(args: &ReplayArgs) -> Result<(Vec<ReplayStep>, FormReport)> {
    let span = info_span!("replay", form = %args.form.display());
    let _guard = span.enter();
    let start = Instant::now();
    let mut form = build_form(&args.form, policy(args.strict))?;
    let events = load_events(&args.events)?;
    let count = events.len();
    let steps = replay(&mut form, events)?;
    let report = FormReport::new(&form, last_submit(&steps));
    info!(
        events = count,
        submittable = report.submittable,
        duration_ms = start.elapsed().as_millis(),
        "replay complete"
    );
    Ok((steps, report))
}

fn policy(strict: bool) -> ConfigPolicy {
    if strict {
        ConfigPolicy::Strict
    } else {
        ConfigPolicy::Lenient
    }
}

fn load_spec(path: &Path) -> Result<FormSpec> {
    FormSpec::load(path).with_context(|| format!("load form definition {}", path.display()))
}

fn build_form(path: &Path, policy: ConfigPolicy) -> Result<Form> {
    let spec = load_spec(path)?;
    let form = Form::from_spec(&spec, policy)
        .with_context(|| format!("build form from {}", path.display()))?;
    if form.is_empty() {
        bail!("{} defines no fields or groups", path.display());
    }
    Ok(form)
}

fn load_events(path: &Path) -> Result<Vec<FormEvent>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read events {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse events {}", path.display()))
}
