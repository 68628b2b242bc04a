//! LaTeX source diagnostics
//!
//! This module provides error detection and reporting for preview sources.
//! It runs the same preprocessing and scan the renderer uses and reports:
//!
//! - Unmatched braces and unclosed environments
//! - Commands outside the allow-list
//! - Malformed arguments (e.g. non-numeric `\vspace` lengths)
//!
//! ## Example
//!
//! ```rust
//! use texview::diagnostics::check_latex;
//!
//! let result = check_latex(r"\textbf{unterminated");
//! assert!(result.has_errors());
//! ```

use serde::Serialize;
use std::fmt;

use crate::core::latex2html::context::{preprocess, RenderOptions, RenderState};
use crate::core::latex2html::markup;
use crate::core::latex2html::scanner::{scan, ScanLimits};
use crate::utils::error::WarningKind;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the preview might not be faithful
    Warning,
    /// Error - part of the document was absorbed or dropped
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed, into the preprocessed body)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }
        Ok(())
    }
}

/// Check result with summary counts
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of informational notes
    pub infos: usize,
}

impl CheckResult {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.warnings == 0
    }
}

/// Check a LaTeX source for issues that would degrade the preview.
pub fn check_latex(source: &str) -> CheckResult {
    let mut result = CheckResult::default();
    if source.trim().is_empty() {
        return result;
    }

    if !source.contains("\\begin{document}") {
        result.push(Diagnostic::new(
            DiagnosticLevel::Info,
            "no \\begin{document} found; the entire input is treated as document body",
        ));
    }

    let mut state = RenderState::new(RenderOptions::default());
    let body = preprocess(source, &mut state);
    let (spans, scan_warnings) = scan(&body, ScanLimits::default());
    state.warnings.extend(scan_warnings);
    let _ = markup::transform_blocks(&mut state, &spans);

    for warning in &state.warnings {
        let level = match warning.kind {
            WarningKind::UnmatchedDelimiter => DiagnosticLevel::Error,
            WarningKind::UnknownCommand | WarningKind::MalformedArgument => {
                DiagnosticLevel::Warning
            }
        };
        let mut diagnostic = Diagnostic::new(level, warning.message.clone());
        if let Some(pos) = warning.position {
            let (line, column) = offset_to_line_col(&body, pos);
            diagnostic = diagnostic.with_location(line, column);
        }
        result.push(diagnostic);
    }

    result
}

/// Format a check result for terminal output.
pub fn format_diagnostics(result: &CheckResult) -> String {
    let mut out = String::new();
    if result.diagnostics.is_empty() {
        out.push_str("no issues found\n");
        return out;
    }
    for diagnostic in &result.diagnostics {
        out.push_str(&diagnostic.to_string());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!(
        "{} error(s), {} warning(s), {} note(s)\n",
        result.errors, result.warnings, result.infos
    ));
    out
}

/// Translate a byte offset into a 1-indexed line and column.
fn offset_to_line_col(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|nl| offset - nl)
        .unwrap_or(offset + 1);
    (line, column)
}
