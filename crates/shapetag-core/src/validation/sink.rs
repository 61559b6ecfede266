//! Collaborator interfaces: where failure reports go, and how fatal
//! configuration errors stop the process
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Receives the failing field names of one record
pub trait ErrorSink {
    /// Called at most once per checked record, with a non-empty field list
    fn report(&mut self, label: &str, failed_fields: &[String]);
}

/// Stops the process on a configuration error
pub trait AbortSignal {
    fn abort(&self, error: &ConfigError) -> !;
}

/// One report handed to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    /// Where the record came from
    pub label: String,
    /// Failing fields, in declaration order
    pub fields: Vec<String>,
}

impl FailureReport {
    pub fn new(label: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            label: label.into(),
            fields,
        }
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} JSON data with erroneous types: {}",
            self.label,
            self.fields.join(", ")
        )
    }
}

impl ErrorSink for Vec<FailureReport> {
    fn report(&mut self, label: &str, failed_fields: &[String]) {
        self.push(FailureReport::new(label, failed_fields.to_vec()));
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn report(&mut self, label: &str, failed_fields: &[String]) {
        (**self).report(label, failed_fields)
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F> ErrorSink for FnSink<F>
where
    F: FnMut(&str, &[String]),
{
    fn report(&mut self, label: &str, failed_fields: &[String]) {
        (self.0)(label, failed_fields)
    }
}

/// Logs each report as an error event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&mut self, label: &str, failed_fields: &[String]) {
        error!(
            label,
            fields = ?failed_fields,
            "{} JSON data with erroneous types",
            label
        );
    }
}

/// Logs the configuration error and exits with status 1
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessAbort;

impl AbortSignal for ProcessAbort {
    fn abort(&self, error: &ConfigError) -> ! {
        error!(%error, "{} -> STOP", error);
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<FailureReport> = Vec::new();
        sink.report("params", &["a".to_string(), "b".to_string()]);
        assert_eq!(sink, vec![FailureReport::new("params", vec!["a".into(), "b".into()])]);
    }

    #[test]
    fn test_closure_sink() {
        let mut calls = 0;
        {
            let mut sink = FnSink(|_: &str, fields: &[String]| calls += fields.len());
            sink.report("x", &["f".to_string()]);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failure_report_display() {
        let report = FailureReport::new("eco", vec!["tags".into(), "meta".into()]);
        assert_eq!(report.to_string(), "eco JSON data with erroneous types: tags, meta");
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.report("eco", &["tags".to_string()]);
    }
}
