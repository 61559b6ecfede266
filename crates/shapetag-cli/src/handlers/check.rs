//! Check command handler and related utilities

use crate::cli::{CheckArgs, DeclarationSource};
use crate::config::{is_yaml_path, Config};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::de::DeserializeOwned;
use shapetag_core::{
    AbortSignal, ErrorSink, FailureReport, Map, ProcessAbort, RawDeclaration, RecordChecker,
    TracingSink, Value,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Sink that keeps reports for rendering and logs each one
#[derive(Default)]
struct ReportCollector {
    reports: Vec<FailureReport>,
    log: TracingSink,
}

impl ErrorSink for ReportCollector {
    fn report(&mut self, label: &str, failed_fields: &[String]) {
        self.log.report(label, failed_fields);
        self.reports.report(label, failed_fields);
    }
}

/// Handle the check command
#[instrument(skip(config, output), fields(file = %args.records.display()))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("check_command", &format!("file: {}", args.records.display()));

    let declaration = load_declaration(&args.declaration, config)?;
    debug!(fields = declaration.len(), "Declaration loaded");

    let document: Value = read_document(&args.records)?;
    let label = args
        .label
        .clone()
        .unwrap_or_else(|| default_label(&args.records));
    output.info(&format!("Checking {} against {} declared field(s)", args.records.display(), declaration.len()))?;

    let records = split_records(&document, &args.records, &label)?;
    let reports = collect_reports(&records, &declaration, ProcessAbort);
    output.failure_reports(&reports)?;

    if reports.is_empty() {
        info!(records = records.len(), "All records passed");
        output.success(&format!("✓ {} record(s) passed", records.len()))?;
        Ok(())
    } else {
        warn!(failed = reports.len(), total = records.len(), "Type check failed");
        Err(Error::ValidationFailed {
            failed: reports.len(),
            total: records.len(),
        })
    }
}

/// Run the checker over labelled records, collecting one report per failing record
fn collect_reports<A: AbortSignal>(
    records: &[(String, &Map)],
    declaration: &RawDeclaration,
    abort: A,
) -> Vec<FailureReport> {
    let mut checker = RecordChecker::with_abort(ReportCollector::default(), abort);
    let reported = checker.check_records_named(
        records.iter().map(|(label, record)| (label.as_str(), *record)),
        declaration,
    );
    debug!(reported, total = records.len(), "Records checked");
    checker.into_sink().reports
}

fn load_declaration(source: &DeclarationSource, config: &Config) -> Result<RawDeclaration> {
    match (&source.file, &source.name) {
        (Some(path), _) => read_document(path),
        (None, Some(name)) => config.declaration(name).cloned(),
        (None, None) => Err(Error::other("a declaration file or name is required")),
    }
}

/// Read a JSON or YAML document, choosing the parser by extension
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!("File read successfully, {} bytes", content.len());

    if is_yaml_path(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("YAML ({})", e),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("JSON ({})", e),
        })
    }
}

fn default_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("records")
        .to_string()
}

/// A single map is one record; a sequence of maps is one record per element
fn split_records<'a>(document: &'a Value, path: &Path, label: &str) -> Result<Vec<(String, &'a Map)>> {
    let invalid = || Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: "a map or a list of maps".to_string(),
    };

    match document {
        Value::Map(map) => Ok(vec![(label.to_string(), map)]),
        Value::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_map()
                    .map(|map| (format!("{}[{}]", label, i), map))
                    .ok_or_else(invalid)
            })
            .collect(),
        _ => Err(invalid()),
    }
}
