//! Row processor — resolves each row into three stage emails and drives
//! the batch.
//!
//! Resolution is pure (no I/O) so it can be previewed and tested on its
//! own; the batch runner adds the materializer and archive calls. Rows are
//! processed strictly sequentially in input order — the materializer holds
//! one open session and is not reentrant — and no row's outcome affects any
//! other row.

use chrono::{Local, NaiveDate};

use crate::archive::{ArchiveSink, sanitize_filename};
use crate::artifact::Materializer;
use crate::config::GeneratorConfig;
use crate::error::RenderError;
use crate::recipients::{
    RecipientCheck, RecipientValidator, dedup_against_to, derive_display_name, merge_recipients,
};
use crate::render::{RenderContext, render};
use crate::row::{Row, RowStatus, StageResult};
use crate::templates::{Stage, TemplateSet};

// ── Resolution ──────────────────────────────────────────────────────

/// Why a row was skipped rather than processed.
#[derive(Debug, Clone)]
pub enum SkipReason {
    /// `client_name`, `case_code`, or `to` was blank.
    MissingRequiredField,
    /// One or more recipient lists failed validation.
    InvalidRecipients(Vec<RecipientCheck>),
}

impl SkipReason {
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::MissingRequiredField => "missing client/code/to",
            SkipReason::InvalidRecipients(_) => "invalid recipients",
        }
    }
}

/// Outcome of resolving one row. No artifacts exist yet at this point.
#[derive(Debug)]
pub enum RowResolution {
    Resolved {
        /// Sanitized `<client> - <code>` base, used for filenames and the
        /// OK status label.
        label: String,
        /// The three stages in fixed order.
        stages: Vec<StageResult>,
    },
    Skipped(SkipReason),
}

/// Resolves rows against one category's template set.
pub struct RowProcessor {
    config: GeneratorConfig,
    templates: TemplateSet,
    validator: RecipientValidator,
}

impl RowProcessor {
    pub fn new(config: GeneratorConfig) -> Self {
        let templates = TemplateSet::for_category(config.category);
        Self {
            config,
            templates,
            validator: RecipientValidator::new(),
        }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Resolve a row with `today` taken from the local clock.
    pub fn resolve_row(&self, row: &Row) -> Result<RowResolution, RenderError> {
        self.resolve_row_on(row, Local::now().date_naive())
    }

    /// Resolve a row against a fixed `today` (deterministic for tests and
    /// previews; `today` is fixed once per batch invocation).
    pub fn resolve_row_on(&self, row: &Row, today: NaiveDate) -> Result<RowResolution, RenderError> {
        let client = row.get("client_name");
        let code = row.get("case_code");
        let to = row.get("to");
        if client.is_empty() || code.is_empty() || to.is_empty() {
            return Ok(RowResolution::Skipped(SkipReason::MissingRequiredField));
        }

        let team_lead = row.get("team_lead_email");
        let poc = row.get("poc_name");
        let explicit_display = row.get("poc_display_name");
        let poc_display = if explicit_display.is_empty() {
            derive_display_name(&poc)
        } else {
            explicit_display
        };
        let extra_cc = row.get("extra_cc");

        let mut ctx = RenderContext::new();
        ctx.set("client_name", &client);
        ctx.set("case_code", &code);
        ctx.set("case_manager_name", row.get("case_manager_name"));
        ctx.set("poc_display_name", poc_display);
        ctx.set("today", today.format(&self.config.date_format).to_string());

        // Subject is shared across all three stages.
        let subject = render(&self.templates.subject, &ctx)?;

        let ccs = self.stage_ccs(&to, &team_lead, &poc, &extra_cc);

        let mut failed = Vec::new();
        let to_check = self.validator.check("To", &to);
        if !to_check.is_valid() {
            failed.push(to_check);
        }
        for (stage, cc) in Stage::ALL.iter().zip(&ccs) {
            let check = self.validator.check(&format!("CC ({})", stage.signer()), cc);
            if !check.is_valid() {
                failed.push(check);
            }
        }
        if !failed.is_empty() {
            return Ok(RowResolution::Skipped(SkipReason::InvalidRecipients(failed)));
        }

        let mut stages = Vec::with_capacity(Stage::ALL.len());
        for (stage, cc) in Stage::ALL.into_iter().zip(ccs) {
            let body_html = render(self.templates.body(stage), &ctx)?;
            stages.push(StageResult {
                stage,
                subject: subject.clone(),
                body_html,
                to: to.clone(),
                cc,
                bcc: self.config.bcc.clone(),
            });
        }

        Ok(RowResolution::Resolved {
            label: sanitize_filename(&format!("{client} - {code}")),
            stages,
        })
    }

    /// The fixed CC formulas, one merged-and-deduped list per stage.
    fn stage_ccs(&self, to: &str, team_lead: &str, poc: &str, extra_cc: &str) -> Vec<String> {
        let team = self.config.benchmarking_team.as_str();
        let manager = self.config.practice_manager.as_str();
        [
            merge_recipients([team_lead, poc, extra_cc, team]),
            merge_recipients([team, team_lead, manager]),
            merge_recipients([manager, team_lead, team, poc]),
        ]
        .iter()
        .map(|cc| dedup_against_to(to, cc))
        .collect()
    }
}

// ── Batch runner ────────────────────────────────────────────────────

/// Process rows strictly sequentially, materializing and archiving each
/// resolved stage. Returns one status per row; no failure aborts the batch.
pub fn run_batch<M, A>(
    processor: &RowProcessor,
    rows: &[Row],
    materializer: &mut M,
    archive: &mut A,
) -> Vec<RowStatus>
where
    M: Materializer + ?Sized,
    A: ArchiveSink + ?Sized,
{
    let today = Local::now().date_naive();
    let mut statuses = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let status = process_one(processor, row, today, materializer, archive);
        tracing::info!("{}", status.line(idx + 1));
        statuses.push(status);
    }
    statuses
}

/// Resolve rows without materializing anything (preview path).
pub fn dry_run(processor: &RowProcessor, rows: &[Row]) -> Vec<RowStatus> {
    let today = Local::now().date_naive();
    rows.iter()
        .map(|row| match processor.resolve_row_on(row, today) {
            Ok(RowResolution::Resolved { label, .. }) => RowStatus::Ok { label },
            Ok(RowResolution::Skipped(reason)) => {
                warn_invalid(&reason);
                RowStatus::Skipped {
                    reason: reason.message().to_string(),
                }
            }
            Err(e) => RowStatus::Failed {
                error: e.to_string(),
            },
        })
        .collect()
}

fn process_one<M, A>(
    processor: &RowProcessor,
    row: &Row,
    today: NaiveDate,
    materializer: &mut M,
    archive: &mut A,
) -> RowStatus
where
    M: Materializer + ?Sized,
    A: ArchiveSink + ?Sized,
{
    let (label, stages) = match processor.resolve_row_on(row, today) {
        Ok(RowResolution::Resolved { label, stages }) => (label, stages),
        Ok(RowResolution::Skipped(reason)) => {
            warn_invalid(&reason);
            return RowStatus::Skipped {
                reason: reason.message().to_string(),
            };
        }
        Err(e) => {
            return RowStatus::Failed {
                error: e.to_string(),
            };
        }
    };

    for result in &stages {
        let bytes = match materializer.materialize(
            &result.subject,
            &result.to,
            &result.cc,
            &result.bcc,
            &result.body_html,
        ) {
            Ok(bytes) => bytes,
            Err(e) => {
                return RowStatus::Failed {
                    error: e.to_string(),
                };
            }
        };
        let path = format!("{}/{label}.oft", result.stage.folder());
        if let Err(e) = archive.put(&path, &bytes) {
            return RowStatus::Failed {
                error: e.to_string(),
            };
        }
    }

    RowStatus::Ok { label }
}

fn warn_invalid(reason: &SkipReason) {
    if let SkipReason::InvalidRecipients(checks) = reason {
        for check in checks {
            tracing::warn!(
                label = %check.label,
                entries = %check.invalid.join(", "),
                "invalid recipients"
            );
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
