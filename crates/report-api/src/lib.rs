//! HTTP client adapter for the report platform backend.
//!
//! [`ReportApiClient`] maps each typed intent (upload a file, create a report,
//! ask the AI backend for a draft) onto one HTTP request against the base URL
//! in [`ApiConfig`], and maps the response back to either a parsed body or an
//! [`ApiError`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport, request encoding and response decoding live
//! here. Wire types and the error-message contract come from the [`reports`]
//! crate.
//!
//! ## Endpoints
//!
//! | Method | Path | Client method |
//! |--------|------|---------------|
//! | POST | `/ai/search-for-report` | [`ReportApiClient::search_for_report`] |
//! | POST | `/ai/open-report` | [`ReportApiClient::generate_open_report`] |
//! | POST | `/files/upload` (multipart) | [`ReportApiClient::upload_file`] |
//! | POST | `/reports` | [`ReportApiClient::create_report`] |
//! | PUT | `/reports/{id}` | [`ReportApiClient::update_report`] |
//! | DELETE | `/reports/{id}` | [`ReportApiClient::delete_report`] |
//! | GET | `/reports` | [`ReportApiClient::list_reports`] |
//! | GET | `/reports/{id}` | [`ReportApiClient::get_report`] |
//! | GET | `/health` | [`ReportApiClient::health`] |
//!
//! No request is retried, cached or deduplicated.

pub mod client;
pub mod config;
pub mod error;
pub mod urls;

pub use client::ReportApiClient;
pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
