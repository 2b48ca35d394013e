//! User-facing reporting
//!
//! Every error, warning and notice the CLI prints goes through a `Reporter`.
//! Reporting is best-effort: write failures are ignored and nothing here
//! returns an error. Each block is padded by blank lines.

use crate::api::RemoteFailure;
use crate::error::ApiError;
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

/// Severity of a reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One printable line derived from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub severity: Severity,
    pub text: String,
}

impl ReportLine {
    fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// Lines printed for a classified failure.
pub fn report_lines(failure: &RemoteFailure) -> Vec<ReportLine> {
    match failure {
        RemoteFailure::Unauthorized => vec![ReportLine::error("Error trying to authenticate")],
        RemoteFailure::ValidationErrors(messages) => messages
            .iter()
            .map(|message| ReportLine::error(format!("Error: {}", message)))
            .collect(),
        RemoteFailure::FieldErrors(errors) => errors
            .values()
            .map(|message| ReportLine::error(format!("Error: {}", message)))
            .collect(),
        RemoteFailure::Warnings(warnings) => warnings
            .iter()
            .map(|warning| ReportLine::warning(format!("Warning: {}", warning)))
            .collect(),
        RemoteFailure::Unknown(raw) => vec![ReportLine::error(raw.clone())],
    }
}

/// In-memory sink shared with a `Reporter` built by [`Reporter::buffered`].
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(Arc<Mutex<Vec<u8>>>);

impl OutputBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writes colored, blank-line padded output to a sink.
pub struct Reporter {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

impl Reporter {
    pub fn stdout() -> Self {
        Self::with_sink(Box::new(std::io::stdout()))
    }

    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// A reporter writing into memory, plus a handle to read what it wrote.
    pub fn buffered() -> (Self, OutputBuffer) {
        let buffer = OutputBuffer::default();
        (Self::with_sink(Box::new(buffer.clone())), buffer)
    }

    /// Print every line of a classified failure.
    pub fn show_errors(&self, failure: &RemoteFailure) {
        let lines: Vec<String> = report_lines(failure)
            .into_iter()
            .map(|line| match line.severity {
                Severity::Error => format!("  {}", line.text.red()),
                Severity::Warning => format!(" {}", line.text.yellow()),
            })
            .collect();
        self.block(&lines);
    }

    /// Print any API error, local ones collapsing into a generic error line.
    pub fn show_api_error(&self, error: &ApiError) {
        self.show_errors(&error.to_failure());
    }

    /// Print warnings carried by an otherwise successful response.
    pub fn show_warnings(&self, warnings: &[String]) {
        self.show_errors(&RemoteFailure::Warnings(warnings.to_vec()));
    }

    /// Print one pre-formatted error line.
    pub fn show_error(&self, message: &str) {
        self.block(&[format!("  {}", message.red())]);
    }

    /// Print one padded informational line.
    pub fn notice(&self, message: impl Display) {
        self.block(&[format!("  {}", message)]);
    }

    /// Print text verbatim.
    pub fn print(&self, text: impl Display) {
        let mut sink = self.sink.lock();
        let _ = writeln!(sink, "{}", text);
        let _ = sink.flush();
    }

    fn block(&self, lines: &[String]) {
        let mut sink = self.sink.lock();
        let _ = writeln!(sink);
        for line in lines {
            let _ = writeln!(sink, "{}", line);
        }
        let _ = writeln!(sink);
        let _ = sink.flush();
    }
}
