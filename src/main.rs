//! oftgen CLI — preview generation statuses and filter case repositories.
//!
//! The binary never materializes artifacts; the `.oft` materializer is an
//! external session-backed program. `preview` dry-runs row resolution so a
//! sheet can be checked before a generation run; `filter` shortlists a case
//! repository for data collection.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use oftgen::config::GeneratorConfig;
use oftgen::filter::{CaseRecord, FilterCriteria, check_filter_columns, shortlist};
use oftgen::input::{check_required_columns, load_table};
use oftgen::processor::{RowProcessor, RowResolution, dry_run};
use oftgen::templates::Category;

const USAGE: &str = "\
Usage:
  oftgen preview <cases.csv|cases.xlsx> [--category <label>] [--json]
  oftgen filter <repo.csv|repo.xlsx> <start YYYY-MM-DD> <end YYYY-MM-DD> [--json]

Categories: ER&D (default), Supply Chain, Procurement, Manufacturing.";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("preview") => preview(&args[1..]),
        Some("filter") => filter(&args[1..]),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

fn preview(args: &[String]) -> Result<()> {
    let mut file = None;
    let mut category = Category::Erd;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--category" => {
                let label = iter.next().context("--category needs a value")?;
                category = Category::from_label(label)
                    .with_context(|| format!("unknown category: {label}"))?;
            }
            other if file.is_none() => file = Some(other.to_string()),
            other => bail!("unexpected argument: {other}\n{USAGE}"),
        }
    }
    let file = file.with_context(|| format!("missing input file\n{USAGE}"))?;

    let table = load_table(Path::new(&file))?;
    check_required_columns(&table.headers)?;

    let processor = RowProcessor::new(GeneratorConfig::for_category(category));
    let statuses = dry_run(&processor, &table.rows);

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for (i, status) in statuses.iter().enumerate() {
        println!("{}", status.line(i + 1));
    }
    if let Some(row) = table.rows.first()
        && let Ok(RowResolution::Resolved { stages, .. }) = processor.resolve_row(row)
    {
        println!("\nPreview (from first row):");
        for stage in stages {
            println!("── {} ──", stage.stage);
            println!("To:      {}", stage.to);
            println!("CC:      {}", stage.cc);
            println!("BCC:     {}", stage.bcc);
            println!("Subject: {}", stage.subject);
        }
    }
    Ok(())
}

fn filter(args: &[String]) -> Result<()> {
    let mut positional = Vec::new();
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            other => positional.push(other.to_string()),
        }
    }
    let [file, start, end] = positional.as_slice() else {
        bail!("filter needs <file> <start> <end>\n{USAGE}");
    };
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("invalid start date: {start}"))?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
        .with_context(|| format!("invalid end date: {end}"))?;

    let table = load_table(Path::new(file))?;
    check_filter_columns(&table.headers)?;

    let records: Vec<CaseRecord> = table.rows.iter().map(CaseRecord::from_row).collect();
    let criteria = FilterCriteria::new(start, end)?;
    let kept = shortlist(&records, &criteria);

    if json {
        println!("{}", serde_json::to_string_pretty(&kept)?);
    } else {
        println!("Matched {} of {} cases", kept.len(), records.len());
        for record in &kept {
            println!("{}", record.case_code);
        }
    }
    Ok(())
}
