//! Structured Feedback Module
//!
//! Machine-readable diagnostics: pipeline errors rendered as JSON reports
//! with a stable code and a line/column location.

use serde::{Deserialize, Serialize};

use crate::utils::Error;

/// A structured error report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0002")
    pub code: String,

    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// Byte length of the offending text
    pub length: usize,
}

impl ErrorReport {
    /// Build a report for `error`, resolving its span against `source`
    pub fn from_error(error: &Error, file: &str, source: &str) -> Self {
        let location = error.span().map(|span| {
            let (line, column) = span.line_col(source);
            Location {
                file: file.to_string(),
                line,
                column,
                length: span.len(),
            }
        });

        Self {
            code: error.code().to_string(),
            severity: Severity::Error,
            message: error.to_string(),
            location,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// `file:line:col: message`, the way compilers usually print it
    pub fn to_human(&self) -> String {
        match &self.location {
            Some(loc) => format!("{}:{}:{}: {}", loc.file, loc.line, loc.column, self.message),
            None => self.message.clone(),
        }
    }
}
