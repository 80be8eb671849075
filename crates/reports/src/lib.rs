//! Domain types for the report platform client.
//!
//! This crate contains every identifier, wire value type, and error type shared
//! between the HTTP adapter and its callers. It performs no I/O: the
//! `report-api` crate supplies the transport, this crate defines *what* goes
//! over the wire and how a failed response is turned into a message.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ReportId`, `FileId`) |
//! | [`types`] | Request/response value types (`Report`, `NewReport`, `OpenReportRequest`, etc.) |
//! | [`errors`] | The [`Operation`] catalogue, [`HttpError`] and error-detail extraction |

pub mod errors;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{detail_field, extract_detail, serialized_body, HttpError, Operation};
pub use identifiers::{FileId, ReportId};
pub use types::{
    FileUpload, GeneratedReport, HealthStatus, Material, NewReport, OpenReportRequest,
    PrefetchedSearch, Report, ReportBody, ReportPatch, SearchResultItem, Timestamp, UploadedFile,
    DEFAULT_REPORT_TYPE, DEFAULT_TASK_TYPE,
};
