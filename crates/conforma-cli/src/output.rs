//! Output formatting and writing utilities
//!
//! Formats results in human-readable, JSON, or YAML form with optional
//! colored output.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use conforma_core::ValidationReport;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// Trait for formatting output with specialized support for reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report
    fn format_report(&self, report: &ValidationReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
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
    /// Create a new output writer targeting stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
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

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
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

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.writeln(&formatted)
    }

    /// Write a validation report in the configured format
    pub fn report(&mut self, report: &ValidationReport) -> Result<()> {
        let formatted = self.format.format_report(report)?;
        self.writeln(&formatted)
    }
}

/// Format a validation report for human reading
fn format_report_human(report: &ValidationReport) -> String {
    if report.is_valid() {
        return "Document is valid".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{} violation(s):\n",
        report.violations().len()
    ));
    for violation in report.violations() {
        output.push_str(&format!(
            "  {}: {}\n",
            violation.path, violation.message
        ));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use conforma_core::{validate, Schema};
    use serde_json::json;

    fn failing_report() -> ValidationReport {
        let schema: Schema = Schema::object()
            .field("a", Schema::string().required())
            .into();
        validate(&json!({}), &schema)
    }

    #[test]
    fn test_human_report_lists_paths() {
        let formatted = OutputFormat::Human.format_report(&failing_report()).unwrap();
        assert!(formatted.contains("1 violation(s)"));
        assert!(formatted.contains("$.a: \"a\" is required"));
    }

    #[test]
    fn test_json_report_is_machine_readable() {
        let formatted = OutputFormat::Json.format_report(&failing_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["violations"][0]["message"], "\"a\" is required");
    }

    #[test]
    fn test_writer_respects_quiet() {
        let mut sink = OutputWriter::with_writer(
            OutputFormat::Human,
            false,
            true,
            Box::new(Vec::new()),
        );
        // Quiet mode swallows info/success without error.
        sink.info("hello").unwrap();
        sink.success("done").unwrap();
    }
}
