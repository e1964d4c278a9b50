//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated
//! layouts for example records, response reports and model listings.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use exemplar_core::ExampleRecord;
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Examples rendered for one operation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseReport {
    pub method: String,
    pub path: String,
    pub status_code: String,
    pub examples: Vec<ExampleRecord>,
}

/// One row of the model listing
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub kind: String,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the records generated for one model or schema
    fn format_examples(&self, records: &[ExampleRecord]) -> Result<String>;

    /// Format per-response example reports
    fn format_responses(&self, reports: &[ResponseReport]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Pretty JSON is the human fallback for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_examples(&self, records: &[ExampleRecord]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_examples_human(records)),
            _ => self.format(&records),
        }
    }

    fn format_responses(&self, reports: &[ResponseReport]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_responses_human(reports)),
            _ => self.format(&reports),
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
    /// Create a new output writer on stdout
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

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.emit(&formatted)
    }

    /// Write the records generated for one model
    pub fn examples(&mut self, records: &[ExampleRecord]) -> Result<()> {
        trace!(count = records.len(), "Writing example records");
        let formatted = self.format.format_examples(records)?;
        self.emit(&formatted)
    }

    /// Write per-response example reports
    pub fn responses(&mut self, reports: &[ResponseReport]) -> Result<()> {
        trace!(count = reports.len(), "Writing response reports");
        let formatted = self.format.format_responses(reports)?;
        self.emit(&formatted)
    }

    /// Write the model listing: a table for humans, data otherwise
    pub fn models(&mut self, models: &[ModelSummary]) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(&models);
        }

        let rows = models
            .iter()
            .map(|model| vec![model.name.clone(), model.kind.clone()])
            .collect();
        self.table(&["MODEL", "KIND"], rows)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = *width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        if self.format == OutputFormat::Human || self.format == OutputFormat::JsonPretty {
            self.writeln(formatted.trim_end())
        } else if self.format == OutputFormat::Json {
            self.writeln(formatted)
        } else {
            // serde_yaml already ends with a newline
            self.write(formatted)
        }
    }
}

/// Format example records for human reading
fn format_examples_human(records: &[ExampleRecord]) -> String {
    let mut output = String::new();

    for record in records {
        match record.as_rendered() {
            Some(rendered) => {
                output.push_str(&format!("▸ {}", rendered.content_type));
                if let Some(generated) = rendered.generated_content_type {
                    output.push_str(&format!(" (generated as {})", generated.mime_type()));
                }
                if let Some(status) = &rendered.status_code {
                    output.push_str(&format!(" [{}]", status));
                }
                output.push('\n');
                if let Some(example) = &rendered.example {
                    output.push_str(example);
                    output.push('\n');
                }
                output.push('\n');
            }
            None => output.push_str("No example available\n\n"),
        }
    }

    output
}

/// Format response reports for human reading
fn format_responses_human(reports: &[ResponseReport]) -> String {
    if reports.is_empty() {
        return "No responses with examples\n".to_string();
    }

    let mut output = String::new();
    for report in reports {
        output.push_str(&format!(
            "═══ {} {} → {} ═══\n",
            report.method.to_uppercase(),
            report.path,
            report.status_code
        ));
        output.push_str(&format_examples_human(&report.examples));
    }

    output
}
