//! Error handling for Texview rendering
//!
//! The renderer never fails: every anomaly in the input degrades to a
//! best-effort visual approximation and is recorded as a [`RenderWarning`].
//! Hard errors ([`PreviewError`]) only exist at the file/CLI boundary.

use serde::Serialize;
use std::fmt;

/// Categories of recoverable parse anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A brace or environment was opened but never closed; the rest of the
    /// enclosing scope was absorbed as its content.
    UnmatchedDelimiter,
    /// A command outside the allow-list; its argument text (if any) was
    /// emitted as literal content.
    UnknownCommand,
    /// A recognized command with an argument the renderer could not make
    /// sense of (e.g. a non-numeric `\vspace` length).
    MalformedArgument,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnmatchedDelimiter => write!(f, "unmatched delimiter"),
            WarningKind::UnknownCommand => write!(f, "unknown command"),
            WarningKind::MalformedArgument => write!(f, "malformed argument"),
        }
    }
}

/// A non-fatal issue found while rendering.
///
/// `position` is a byte offset into the preprocessed document body (after
/// comment and preamble stripping), intended for developer diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderWarning {
    pub kind: WarningKind,
    pub message: String,
    pub position: Option<usize>,
}

impl RenderWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    pub fn unmatched(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(WarningKind::UnmatchedDelimiter, message, position)
    }

    pub fn unknown_command(name: &str, position: Option<usize>) -> Self {
        Self::new(
            WarningKind::UnknownCommand,
            format!("unknown command \\{}", name),
            position,
        )
    }

    pub fn malformed(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(WarningKind::MalformedArgument, message, position)
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.position {
            write!(f, "{} at offset {}: {}", self.kind, pos, self.message)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

/// Hard error type for the CLI and file-level operations.
#[derive(Debug, Clone)]
pub enum PreviewError {
    /// IO error (for file operations)
    IoError { message: String },
    /// Invalid input that cannot be processed at all (currently only
    /// produced at the CLI boundary, never by `render`)
    InvalidInput { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::IoError { message } => write!(f, "IO error: {}", message),
            PreviewError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            PreviewError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for PreviewError {}

impl From<std::io::Error> for PreviewError {
    fn from(err: std::io::Error) -> Self {
        PreviewError::IoError {
            message: err.to_string(),
        }
    }
}

impl PreviewError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PreviewError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PreviewError::InternalError {
            message: message.into(),
        }
    }
}

/// Result type for CLI and file-level operations.
pub type PreviewResult<T> = Result<T, PreviewError>;
