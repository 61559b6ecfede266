//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialised
//! rendering for failure reports and the tag vocabulary.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use shapetag_core::{FailureReport, TypeTag};
use std::io::{self, Write};
use tracing::debug;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format failure reports, one block per failing record
    fn format_failure_reports(&self, reports: &[FailureReport], use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // For human format, use pretty JSON as fallback
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_failure_reports(&self, reports: &[FailureReport], use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_failure_reports_human(reports, use_color)),
            _ => self.format(&reports),
        }
    }
}

fn format_failure_reports_human(reports: &[FailureReport], use_color: bool) -> String {
    let mut out = String::new();
    for report in reports {
        let title = format!("{} JSON data with erroneous types", report.label);
        if use_color {
            out.push_str(&format!("{} {}\n", "✗".red(), title.bold()));
        } else {
            out.push_str(&format!("✗ {}\n", title));
        }
        for field in &report.fields {
            out.push_str(&format!("  - {}\n", field));
        }
    }
    out
}

/// One vocabulary entry as rendered by `shapetag tags`
#[derive(Debug, Serialize)]
pub struct TagInfo {
    pub tag: &'static str,
    pub shape: &'static str,
}

impl From<TypeTag> for TagInfo {
    fn from(tag: TypeTag) -> Self {
        Self {
            tag: tag.as_str(),
            shape: tag.description(),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        if self.format == OutputFormat::Yaml {
            // serde_yaml already terminates with a newline
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write failure reports; machine formats always emit the (possibly empty) list
    pub fn failure_reports(&mut self, reports: &[FailureReport]) -> Result<()> {
        if self.format == OutputFormat::Human && reports.is_empty() {
            return Ok(());
        }
        let formatted = self.format.format_failure_reports(reports, self.use_color)?;
        match self.format {
            OutputFormat::Human | OutputFormat::Yaml => self.write(&formatted),
            OutputFormat::Json | OutputFormat::JsonPretty => self.writeln(&formatted),
        }
    }

    /// Write the tag vocabulary
    pub fn tags(&mut self, tags: &[TypeTag]) -> Result<()> {
        if self.format != OutputFormat::Human {
            let infos: Vec<TagInfo> = tags.iter().copied().map(TagInfo::from).collect();
            return self.data(&infos);
        }

        let width = tags.iter().map(|t| t.as_str().len()).max().unwrap_or(0);
        for tag in tags {
            let name = format!("{:width$}", tag.as_str(), width = width);
            let line = if self.use_color {
                format!("{}  {}", name.bold(), tag.description())
            } else {
                format!("{}  {}", name, tag.description())
            };
            self.writeln(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
