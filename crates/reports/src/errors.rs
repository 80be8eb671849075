//! The operation catalogue and the HTTP error type.
//!
//! Every client operation has an [`Operation`] tag whose label prefixes the
//! message of a failed call. [`HttpError`] is produced for any response whose
//! status is not a success; its detail comes from [`extract_detail`], which
//! tries three sources in order:
//!
//! 1. [`detail_field`]: the `detail` member of a JSON object body.
//! 2. [`serialized_body`]: the whole JSON body, re-serialised compactly.
//! 3. The raw body text, when the body is not JSON.
//!
//! Extraction never fails. A body that cannot be parsed simply falls through
//! to the raw-text tier.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// A client operation against the report backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SearchForReport,
    GenerateOpenReport,
    UploadFile,
    CreateReport,
    UpdateReport,
    DeleteReport,
    ListReports,
    GetReport,
    Health,
}

impl Operation {
    /// Human-readable description used as the prefix of error messages.
    pub fn label(self) -> &'static str {
        match self {
            Operation::SearchForReport => "Report search request failed",
            Operation::GenerateOpenReport => "AI report generation failed",
            Operation::UploadFile => "File upload failed",
            Operation::CreateReport => "Failed to create report",
            Operation::UpdateReport => "Failed to update report",
            Operation::DeleteReport => "Failed to delete report",
            Operation::ListReports => "Failed to list reports",
            Operation::GetReport => "Failed to fetch report",
            Operation::Health => "Health check failed",
        }
    }

    /// Short machine name, used in tracing spans.
    pub fn name(self) -> &'static str {
        match self {
            Operation::SearchForReport => "search_for_report",
            Operation::GenerateOpenReport => "generate_open_report",
            Operation::UploadFile => "upload_file",
            Operation::CreateReport => "create_report",
            Operation::UpdateReport => "update_report",
            Operation::DeleteReport => "delete_report",
            Operation::ListReports => "list_reports",
            Operation::GetReport => "get_report",
            Operation::Health => "health",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// HTTP errors
// ---------------------------------------------------------------------------

/// The backend answered with a non-success status.
///
/// The `Display` output is `"<label> (<status>): <detail>"`. The status and
/// the extracted detail are also kept as fields for callers that branch on
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{operation} ({status}): {detail}")]
pub struct HttpError {
    /// The operation that failed.
    pub operation: Operation,
    /// HTTP status code of the response.
    pub status: u16,
    /// Explanation extracted from the response body.
    pub detail: String,
}

impl HttpError {
    /// Builds the error for `operation` from a failed response's status and body text.
    pub fn from_response(operation: Operation, status: u16, body: &str) -> Self {
        Self {
            operation,
            status,
            detail: extract_detail(body),
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

// ---------------------------------------------------------------------------
// Detail extraction
// ---------------------------------------------------------------------------

/// Extracts the error explanation from a failed response body.
pub fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        // `null` has no fields to look at; treat it like unparseable text.
        Ok(Value::Null) | Err(_) => body.to_string(),
        Ok(value) => detail_field(&value).unwrap_or_else(|| serialized_body(&value)),
    }
}

/// Returns the `detail` member of a JSON object, if present and non-empty.
///
/// Strings are returned verbatim. Structured details (FastAPI validation
/// errors are a list of objects) are serialised as compact JSON. `null`,
/// `false`, `0` and `""` count as absent.
pub fn detail_field(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Serialises a JSON body compactly, keeping the key order it arrived in.
pub fn serialized_body(value: &Value) -> String {
    value.to_string()
}
