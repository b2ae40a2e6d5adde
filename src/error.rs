// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error and diagnostic types for RWX interpretation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the interpreter
pub type RwxResult<T> = Result<T, RwxError>;

/// Scope kinds that must be balanced by a matching `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeKind {
    Transform,
    Material,
    Proto,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeKind::Transform => "transform",
            ScopeKind::Material => "material",
            ScopeKind::Proto => "proto",
        };
        f.write_str(name)
    }
}

/// Fatal errors. Any of these aborts the parse and discards partial output.
#[derive(Error, Debug)]
pub enum RwxError {
    /// Input could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The line grammar rejected the input.
    #[error("lexer error: {0}")]
    Lex(String),

    /// A number or word could not be scanned where the grammar requires one.
    #[error("line {line}: `{directive}` expects {expected}, found {}", .found.as_deref().map(|f| format!("`{f}`")).unwrap_or_else(|| "end of line".to_string()))]
    MalformedArgument {
        line: usize,
        directive: &'static str,
        expected: &'static str,
        found: Option<String>,
    },

    /// A face referenced a vertex outside the current vertex buffer.
    #[error("line {line}: vertex index {index} out of range (scope has {available} vertices)")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        available: usize,
    },

    /// An `end` directive without a matching `begin`.
    #[error("line {line}: {scope}end without matching {scope}begin")]
    UnbalancedScope { line: usize, scope: ScopeKind },

    /// A `begin` directive still open at end of input.
    #[error("{scope}begin on line {line} is never closed")]
    UnterminatedScope { line: usize, scope: ScopeKind },

    /// `protoinstance` named a proto that was never defined.
    #[error("line {line}: unknown proto `{name}`")]
    UnknownProto { line: usize, name: String },

    /// `protoinstance` named a proto that is still being defined.
    #[error("line {line}: proto `{name}` instanced inside its own definition")]
    RecursiveProto { line: usize, name: String },

    /// `polygon` vertex count below 3 or above the configured limit.
    #[error("line {line}: polygon with {count} vertices (expected 3..={max})")]
    PolygonSize { line: usize, count: usize, max: usize },
}

impl RwxError {
    /// Create a malformed argument error.
    pub fn malformed(
        line: usize,
        directive: &'static str,
        expected: &'static str,
        found: Option<&str>,
    ) -> Self {
        Self::MalformedArgument {
            line,
            directive,
            expected,
            found: found.map(str::to_string),
        }
    }

    /// Source line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            RwxError::Io { .. } | RwxError::Lex(_) => None,
            RwxError::MalformedArgument { line, .. }
            | RwxError::IndexOutOfRange { line, .. }
            | RwxError::UnbalancedScope { line, .. }
            | RwxError::UnterminatedScope { line, .. }
            | RwxError::UnknownProto { line, .. }
            | RwxError::RecursiveProto { line, .. }
            | RwxError::PolygonSize { line, .. } => Some(*line),
        }
    }

    /// Whether this is a structural error in the script itself
    pub fn is_structural(&self) -> bool {
        !matches!(self, RwxError::Io { .. } | RwxError::Lex(_))
    }
}

/// Severity of a non-fatal diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Info,
}

/// Non-fatal message produced while interpreting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn info(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_line() {
        let err = RwxError::UnbalancedScope {
            line: 7,
            scope: ScopeKind::Transform,
        };
        assert_eq!(
            err.to_string(),
            "line 7: transformend without matching transformbegin"
        );
        assert_eq!(err.line(), Some(7));
        assert!(err.is_structural());
    }

    #[test]
    fn test_malformed_argument_message() {
        let err = RwxError::malformed(3, "vertex", "a number", Some("abc"));
        assert_eq!(err.to_string(), "line 3: `vertex` expects a number, found `abc`");

        let err = RwxError::malformed(4, "scale", "a number", None);
        assert_eq!(err.to_string(), "line 4: `scale` expects a number, found end of line");
    }
}
