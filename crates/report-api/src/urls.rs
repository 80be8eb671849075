//! URL building for backend endpoints.
//!
//! Paths are fixed by the backend and must not drift. Report IDs are
//! percent-encoded as a single path segment, so `a/b` becomes `a%2Fb`.

use reports::ReportId;

/// URL-encode a report ID for use as one path segment.
pub fn encode_report_id(id: &ReportId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

/// Build URL for the search pre-step.
pub fn search_for_report_url(base: &str) -> String {
    format!("{}/ai/search-for-report", base)
}

/// Build URL for AI report generation.
pub fn open_report_url(base: &str) -> String {
    format!("{}/ai/open-report", base)
}

/// Build URL for multipart file upload.
pub fn upload_url(base: &str) -> String {
    format!("{}/files/upload", base)
}

/// Build URL for the report collection (list and create).
pub fn reports_url(base: &str) -> String {
    format!("{}/reports", base)
}

/// Build URL for a single report (get, update, delete).
pub fn report_url(base: &str, id: &ReportId) -> String {
    format!("{}/reports/{}", base, encode_report_id(id))
}

/// Build URL for the health probe.
pub fn health_url(base: &str) -> String {
    format!("{}/health", base)
}
