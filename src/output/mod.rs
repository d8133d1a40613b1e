//
//  smartling-files
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering of command results for the `sl` CLI.
//!
//! - **Text format**: a styled status line followed by the response data,
//!   pretty-printed
//! - **JSON format**: a stable summary object for scripting (see
//!   [`response_summary`])
//!
//! Download commands do not render: their body is the file content and is
//! written verbatim to a file or stdout by [`write_download`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use smartling_files::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_output(&output)?;
//! writer.write_success("File uploaded");
//! ```

mod json;

pub use json::*;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;

use crate::api::CommandOutput;

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes command results to stdout and status lines to stderr.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders a command result to stdout.
    pub fn write_output(&self, output: &CommandOutput) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        render(&mut handle, output, self.format)
    }

    /// Writes a styled success line to stderr.
    pub fn write_success(&self, message: &str) {
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            eprintln!("{} {}", style("✓").green(), message);
        } else {
            eprintln!("✓ {}", message);
        }
    }

    /// Writes a styled failure line to stderr.
    pub fn write_error(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", style("✗").red(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }
}

/// Renders `output` in `format` to `writer`.
///
/// Raw outputs are written verbatim, with nothing appended.
pub fn render<W: Write>(writer: &mut W, output: &CommandOutput, format: OutputFormat) -> Result<()> {
    let response = match output {
        CommandOutput::Raw { body, .. } => {
            writer.write_all(body)?;
            writer.flush()?;
            return Ok(());
        }
        CommandOutput::Response(response) => response,
    };

    match format {
        OutputFormat::Json => write_json_to(writer, &response_summary(response)),
        OutputFormat::Text => {
            match response.envelope() {
                Some(envelope) => {
                    writeln!(writer, "{} (HTTP {})", envelope.code, response.status())?;
                    for message in envelope.error_messages() {
                        writeln!(writer, "  {}", message)?;
                    }
                    if let Some(data) = envelope.data.as_ref().filter(|d| !d.is_null()) {
                        serde_json::to_writer_pretty(&mut *writer, data)?;
                        writeln!(writer)?;
                    }
                }
                None => {
                    writeln!(writer, "HTTP {}", response.status())?;
                    if !response.body().is_empty() {
                        writeln!(writer, "{}", response.text())?;
                    }
                }
            }
            Ok(())
        }
    }
}

/// Writes a successful download body to `destination`, or stdout when `None`.
///
/// A non-2xx output is not written; its reason is returned as the error.
pub fn write_download(output: &CommandOutput, destination: Option<&Path>) -> Result<usize> {
    if !output.is_success() {
        bail!("Download failed: {}", failure_reason(output));
    }

    let body = output.body();
    match destination {
        Some(path) => save_body(body, path)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(body)?;
            handle.flush()?;
        }
    }
    Ok(body.len())
}

/// Writes `body` to `path` unchanged, creating parent directories.
pub fn save_body(body: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}

/// One-line description of why a command did not succeed.
pub fn failure_reason(output: &CommandOutput) -> String {
    let envelope = output.response().and_then(|r| r.envelope());
    match envelope {
        Some(envelope) => {
            let messages = envelope.error_messages();
            if messages.is_empty() {
                format!("{} (HTTP {})", envelope.code, output.status())
            } else {
                format!("{} (HTTP {}): {}", envelope.code, output.status(), messages.join("; "))
            }
        }
        None => {
            let text = String::from_utf8_lossy(output.body());
            let text = text.trim();
            if text.is_empty() {
                format!("HTTP {}", output.status())
            } else {
                format!("HTTP {}: {}", output.status(), text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;

    fn rendered(output: &CommandOutput, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer, output, format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_render_text_envelope() {
        let output = CommandOutput::Response(ApiResponse::new(
            r#"{"response":{"code":"SUCCESS","data":{"totalCount":1}}}"#,
            200,
        ));
        let text = rendered(&output, OutputFormat::Text);
        assert!(text.starts_with("SUCCESS (HTTP 200)\n"));
        assert!(text.contains("\"totalCount\": 1"));
    }

    #[test]
    fn test_render_text_unparsed() {
        let output = CommandOutput::Response(ApiResponse::new("oops", 500));
        assert_eq!(rendered(&output, OutputFormat::Text), "HTTP 500\noops\n");
    }

    #[test]
    fn test_render_raw_is_verbatim() {
        let output = CommandOutput::Raw {
            body: b"{\"a\":1}".to_vec(),
            status: 200,
        };
        assert_eq!(rendered(&output, OutputFormat::Json), "{\"a\":1}");

        let output = CommandOutput::Raw {
            body: b"key=value\n".to_vec(),
            status: 200,
        };
        assert_eq!(rendered(&output, OutputFormat::Text), "key=value\n");
    }

    #[test]
    fn test_failure_reason() {
        let output = CommandOutput::Response(ApiResponse::new(
            r#"{"response":{"code":"VALIDATION_ERROR","errors":[{"key":"parse.error","message":"bad"}]}}"#,
            400,
        ));
        assert_eq!(
            failure_reason(&output),
            "VALIDATION_ERROR (HTTP 400): parse.error: bad"
        );

        let output = CommandOutput::Raw {
            body: Vec::new(),
            status: 502,
        };
        assert_eq!(failure_reason(&output), "HTTP 502");
    }

    #[test]
    fn test_write_download_to_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out").join("fr.json");
        let output = CommandOutput::Response(ApiResponse::new("{\"hello\":\"bonjour\"}\n", 200));

        let written = write_download(&output, Some(&path)).unwrap();
        assert_eq!(written, 20);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"hello\":\"bonjour\"}\n");
    }

    #[test]
    fn test_write_download_refuses_failure() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("fr.json");
        let output = CommandOutput::Response(ApiResponse::new("not found", 404));

        let err = write_download(&output, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
        assert!(!path.exists());
    }
}
