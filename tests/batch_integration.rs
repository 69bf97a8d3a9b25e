//! End-to-end batch tests: rows in, statuses and archive entries out.
//!
//! The Outlook-backed materializer is replaced by a stub that records its
//! calls and fabricates artifact bytes; the archive is the in-memory sink.

use oftgen::archive::{MemoryArchive, ZipSink};
use oftgen::artifact::Materializer;
use oftgen::config::GeneratorConfig;
use oftgen::error::ArtifactError;
use oftgen::processor::{RowProcessor, run_batch};
use oftgen::row::{Row, RowStatus};
use oftgen::templates::Category;

/// Stub materializer: one fabricated blob per call, optional injected
/// failure on the nth call (1-based).
struct StubMaterializer {
    calls: usize,
    fail_on_call: Option<usize>,
}

impl StubMaterializer {
    fn new() -> Self {
        Self {
            calls: 0,
            fail_on_call: None,
        }
    }

    fn failing_on(call: usize) -> Self {
        Self {
            calls: 0,
            fail_on_call: Some(call),
        }
    }
}

impl Materializer for StubMaterializer {
    fn materialize(
        &mut self,
        subject: &str,
        to: &str,
        cc: &str,
        bcc: &str,
        html_body: &str,
    ) -> Result<Vec<u8>, ArtifactError> {
        self.calls += 1;
        if self.fail_on_call == Some(self.calls) {
            return Err(ArtifactError::GenerationFailed {
                reason: "session dropped".to_string(),
            });
        }
        Ok(format!("{subject}\n{to}\n{cc}\n{bcc}\n{html_body}").into_bytes())
    }
}

fn valid_row(client: &str, code: &str) -> Row {
    [
        ("client_name", client),
        ("case_code", code),
        ("case_manager_name", "Jane Manager"),
        ("to", "cm@acme.com"),
        ("team_lead_email", "tl@acme.com"),
        ("POC_name", "poc@acme.com"),
    ]
    .into_iter()
    .collect()
}

fn erd_processor() -> RowProcessor {
    RowProcessor::new(GeneratorConfig::for_category(Category::Erd))
}

#[test]
fn erd_row_end_to_end() {
    let mut materializer = StubMaterializer::new();
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(
        &erd_processor(),
        &[valid_row("Acme", "C100")],
        &mut materializer,
        &mut archive,
    );

    assert_eq!(
        statuses,
        vec![RowStatus::Ok {
            label: "Acme - C100".to_string()
        }]
    );
    assert_eq!(statuses[0].line(1), "Row 1: OK – Acme - C100");
    assert_eq!(materializer.calls, 3);

    let paths: Vec<&str> = archive.entries().iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "1_Sebastian_Initial/Acme - C100.oft",
            "2_POC_Follow_Up/Acme - C100.oft",
            "3_Aseem_Escalation/Acme - C100.oft",
        ]
    );

    let initial = String::from_utf8(
        archive
            .get("1_Sebastian_Initial/Acme - C100.oft")
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    let mut lines = initial.lines();
    assert_eq!(
        lines.next(),
        Some("ER&D Data Collection - C100 (Acme)")
    );
    assert_eq!(lines.next(), Some("cm@acme.com"));
    assert_eq!(
        lines.next(),
        Some("tl@acme.com; poc@acme.com; ERDDBTeam.Global@Bain.com")
    );
    assert_eq!(lines.next(), Some("//"));
}

#[test]
fn client_name_is_sanitized_in_archive_paths() {
    let mut materializer = StubMaterializer::new();
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(
        &erd_processor(),
        &[valid_row("Acme/Global", "C1?")],
        &mut materializer,
        &mut archive,
    );

    assert_eq!(
        statuses[0],
        RowStatus::Ok {
            label: "Acme-Global - C1-".to_string()
        }
    );
    assert!(archive.get("1_Sebastian_Initial/Acme-Global - C1-.oft").is_some());
}

#[test]
fn missing_to_skips_row_and_batch_continues() {
    let mut skipped = valid_row("NoTo Corp", "C200");
    skipped.insert("to", "");
    let rows = [skipped, valid_row("Acme", "C100")];

    let mut materializer = StubMaterializer::new();
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(&erd_processor(), &rows, &mut materializer, &mut archive);

    assert_eq!(
        statuses[0],
        RowStatus::Skipped {
            reason: "missing client/code/to".to_string()
        }
    );
    assert!(statuses[1].is_ok());
    // Nothing was materialized or archived for the skipped row.
    assert_eq!(materializer.calls, 3);
    assert_eq!(archive.len(), 3);
}

#[test]
fn invalid_cc_skips_row_without_cross_row_interference() {
    let mut bad = valid_row("Bad Corp", "C300");
    bad.insert("team_lead_email", "not-an-email");
    let rows = [bad, valid_row("Acme", "C100")];

    let mut materializer = StubMaterializer::new();
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(&erd_processor(), &rows, &mut materializer, &mut archive);

    assert_eq!(
        statuses[0],
        RowStatus::Skipped {
            reason: "invalid recipients".to_string()
        }
    );
    assert_eq!(
        statuses[1],
        RowStatus::Ok {
            label: "Acme - C100".to_string()
        }
    );
    assert_eq!(archive.len(), 3);
}

#[test]
fn materializer_failure_fails_row_and_batch_continues() {
    let rows = [valid_row("First", "C1"), valid_row("Second", "C2")];

    // Fail on the second stage of the first row.
    let mut materializer = StubMaterializer::failing_on(2);
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(&erd_processor(), &rows, &mut materializer, &mut archive);

    assert_eq!(
        statuses[0],
        RowStatus::Failed {
            error: "Artifact generation failed: session dropped".to_string()
        }
    );
    assert!(statuses[1].is_ok());
    // First row got one entry in before failing; second row all three.
    assert_eq!(archive.len(), 4);
    assert!(archive.get("1_Sebastian_Initial/Second - C2.oft").is_some());
}

#[test]
fn duplicate_rows_overwrite_archive_entries_silently() {
    let rows = [valid_row("Acme", "C100"), valid_row("Acme", "C100")];

    let mut materializer = StubMaterializer::new();
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(&erd_processor(), &rows, &mut materializer, &mut archive);

    // Both rows report OK; the collision resolves last-write-wins.
    assert!(statuses.iter().all(RowStatus::is_ok));
    assert_eq!(archive.len(), 3);
}

#[test]
fn non_erd_category_runs_the_same_pipeline() {
    let processor = RowProcessor::new(GeneratorConfig::for_category(Category::SupplyChain));
    let mut materializer = StubMaterializer::new();
    let mut archive = MemoryArchive::new();
    let statuses = run_batch(
        &processor,
        &[valid_row("Acme", "C100")],
        &mut materializer,
        &mut archive,
    );

    assert!(statuses[0].is_ok());
    let initial = String::from_utf8(
        archive
            .get("1_Sebastian_Initial/Acme - C100.oft")
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(initial.starts_with("Supply Chain Data Collection - C100 (Acme)"));
}

#[test]
fn batch_results_package_into_a_zip() {
    let mut materializer = StubMaterializer::new();
    let mut sink = ZipSink::new();
    let statuses = run_batch(
        &erd_processor(),
        &[valid_row("Acme", "C100")],
        &mut materializer,
        &mut sink,
    );
    assert!(statuses[0].is_ok());

    let bytes = sink.finish().unwrap();
    let mut reader = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len(), 3);
    let names: Vec<String> = (0..reader.len())
        .map(|i| reader.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(names.contains(&"2_POC_Follow_Up/Acme - C100.oft".to_string()));
}
