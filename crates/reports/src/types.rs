//! Wire value types exchanged with the report backend.
//!
//! Request types serialise to exactly the JSON the backend expects; optional
//! fields that are unset are omitted rather than sent as `null`. Response
//! types deserialise the backend's documented shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{FileId, ReportId};

/// Report type sent when the caller does not choose one.
pub const DEFAULT_REPORT_TYPE: &str = "open_report";

/// Task type of an AI generation or search request when not overridden.
pub const DEFAULT_TASK_TYPE: &str = "open_report";

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A timestamp exactly as the backend sent it.
///
/// The string is kept verbatim so a decoded [`Report`] re-serialises byte for
/// byte. The backend normally emits RFC 3339 with an explicit offset, but
/// records written by older versions may lack one; [`Timestamp::parse`]
/// accepts both and reads offset-less values as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Returns the timestamp as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the timestamp, returning `None` if it is not a recognisable date-time.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// A report as returned by the backend.
///
/// Timestamps are kept as sent and fields the backend adds beyond the
/// documented ones are kept in `extra`, so the parsed body survives a
/// serialise round-trip unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    /// Report type identifier (e.g. `"open_report"`).
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub create_time: Timestamp,
    pub update_time: Timestamp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller input for creating a report.
///
/// `kind` and `sources` are optional here; [`NewReport::to_body`] fills in the
/// defaults so the request always carries both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl NewReport {
    /// Creates a report draft with only the required fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: None,
            content: content.into(),
            sources: None,
        }
    }

    /// Sets the report type.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the source list.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Builds the request body with defaults applied.
    ///
    /// An unset or empty `kind` becomes [`DEFAULT_REPORT_TYPE`]; unset
    /// `sources` becomes an empty list.
    pub fn to_body(&self) -> ReportBody {
        let kind = match self.kind.as_deref() {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => DEFAULT_REPORT_TYPE.to_string(),
        };
        ReportBody {
            title: self.title.clone(),
            kind,
            content: self.content.clone(),
            sources: self.sources.clone().unwrap_or_default(),
        }
    }
}

/// The JSON body of a create request. Every field is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBody {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub sources: Vec<String>,
}

/// Partial update of a report. Unset fields are left untouched by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl ReportPatch {
    /// Returns `true` if no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.sources.is_none()
    }
}

// ---------------------------------------------------------------------------
// AI search and generation
// ---------------------------------------------------------------------------

/// Text material handed to the AI backend, usually parsed from an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Material {
    /// Creates material from free text with no originating file.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            file_id: None,
            name: None,
            text: text.into(),
            summary: None,
        }
    }
}

impl From<UploadedFile> for Material {
    fn from(file: UploadedFile) -> Self {
        Self {
            file_id: Some(file.file_id),
            name: Some(file.name),
            text: file.text,
            summary: file.summary,
        }
    }
}

/// One web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Search results for a report: the query the backend ran and its hits.
///
/// Returned by the search endpoint and, once confirmed by the user, embedded
/// in an [`OpenReportRequest`] so generation skips its own search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefetchedSearch {
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
}

/// Payload for AI report generation and for the search pre-step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenReportRequest {
    #[serde(default = "default_task_type")]
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Free-form generation settings (e.g. `{"web_search_enabled": true}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<PrefetchedSearch>,
}

fn default_task_type() -> String {
    DEFAULT_TASK_TYPE.to_string()
}

impl Default for OpenReportRequest {
    fn default() -> Self {
        Self {
            task_type: default_task_type(),
            title: None,
            outline: None,
            draft: None,
            materials: Vec::new(),
            user_config: None,
            search_results: None,
        }
    }
}

impl OpenReportRequest {
    /// Embeds confirmed search results so the backend does not search again.
    #[must_use]
    pub fn with_search_results(mut self, search: PrefetchedSearch) -> Self {
        self.search_results = Some(search);
        self
    }
}

/// Generated report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// A file the backend has saved and extracted text from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_id: FileId,
    pub name: String,
    pub content_type: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A local file to upload: its name, raw bytes and optional MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload; the MIME type is inferred from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Overrides the inferred MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the explicit MIME type, or one guessed from the extension.
    pub fn mime_type(&self) -> &str {
        match &self.content_type {
            Some(ct) => ct.as_str(),
            None => mime_type_for(&self.file_name),
        }
    }
}

/// Maps the extensions the backend can parse to their MIME types.
fn mime_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------

/// Backend liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Returns `true` if the backend reported `"ok"`.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
