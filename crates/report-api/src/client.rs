//! The HTTP client.
//!
//! Every public method follows the same shape: build one request, send it,
//! and on a 2xx status decode the body. Any other status is turned into an
//! [`HttpError`] whose detail comes from [`reports::extract_detail`].

use std::path::Path;

use reports::{
    FileUpload, GeneratedReport, HealthStatus, HttpError, NewReport, Operation, PrefetchedSearch,
    Report, ReportId, UploadedFile,
};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::urls;

/// Multipart field name the backend reads the uploaded file from.
const UPLOAD_FIELD: &str = "file";

/// Client for the report backend REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReportApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ReportApiClient {
    /// Creates a client with a default [`reqwest::Client`].
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client that sends through an existing [`reqwest::Client`].
    pub fn with_http_client(config: ApiConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Creates a client configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn base(&self) -> &str {
        self.config.base_url()
    }

    // -----------------------------------------------------------------------
    // AI
    // -----------------------------------------------------------------------

    /// Runs the search pre-step and returns the results for user confirmation.
    ///
    /// `payload` is forwarded as JSON without validation; an
    /// [`reports::OpenReportRequest`] is the usual shape.
    #[tracing::instrument(skip_all, fields(operation = Operation::SearchForReport.name()))]
    pub async fn search_for_report<P>(&self, payload: &P) -> Result<PrefetchedSearch>
    where
        P: Serialize + ?Sized,
    {
        let request = self
            .http
            .post(urls::search_for_report_url(self.base()))
            .json(payload);
        self.send_json(Operation::SearchForReport, request).await
    }

    /// Asks the AI backend to write or polish a report.
    ///
    /// If the payload embeds `search_results`, the backend uses them instead
    /// of searching again.
    #[tracing::instrument(skip_all, fields(operation = Operation::GenerateOpenReport.name()))]
    pub async fn generate_open_report<P>(&self, payload: &P) -> Result<GeneratedReport>
    where
        P: Serialize + ?Sized,
    {
        let request = self.http.post(urls::open_report_url(self.base())).json(payload);
        self.send_json(Operation::GenerateOpenReport, request).await
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    /// Uploads one file as the multipart field `file`.
    ///
    /// The multipart content type and boundary are set by the transport.
    #[tracing::instrument(skip_all, fields(operation = Operation::UploadFile.name(), file = %file.file_name, size = file.bytes.len()))]
    pub async fn upload_file(&self, file: FileUpload) -> Result<UploadedFile> {
        let mime = file.mime_type().to_string();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&mime)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let request = self.http.post(urls::upload_url(self.base())).multipart(form);
        self.send_json(Operation::UploadFile, request).await
    }

    /// Reads a file from disk and uploads it under its own file name.
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> Result<UploadedFile> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UPLOAD_FIELD.to_string());

        self.upload_file(FileUpload::new(file_name, bytes)).await
    }

    // -----------------------------------------------------------------------
    // Reports
    // -----------------------------------------------------------------------

    /// Creates a report. `type` defaults to `"open_report"` and `sources` to `[]`.
    #[tracing::instrument(skip_all, fields(operation = Operation::CreateReport.name()))]
    pub async fn create_report(&self, report: &NewReport) -> Result<Report> {
        let request = self
            .http
            .post(urls::reports_url(self.base()))
            .json(&report.to_body());
        self.send_json(Operation::CreateReport, request).await
    }

    /// Applies a partial update to a report.
    ///
    /// `patch` is forwarded as JSON; a [`reports::ReportPatch`] omits unset fields, and
    /// any other mapping is sent as-is.
    #[tracing::instrument(skip_all, fields(operation = Operation::UpdateReport.name(), id = %id))]
    pub async fn update_report<P>(&self, id: &ReportId, patch: &P) -> Result<Report>
    where
        P: Serialize + ?Sized,
    {
        let request = self.http.put(urls::report_url(self.base(), id)).json(patch);
        self.send_json(Operation::UpdateReport, request).await
    }

    /// Deletes a report. Any 2xx status, 204 included, is success.
    #[tracing::instrument(skip_all, fields(operation = Operation::DeleteReport.name(), id = %id))]
    pub async fn delete_report(&self, id: &ReportId) -> Result<()> {
        let request = self.http.delete(urls::report_url(self.base(), id));
        self.send(Operation::DeleteReport, request).await?;
        Ok(())
    }

    /// Lists every stored report.
    #[tracing::instrument(skip_all, fields(operation = Operation::ListReports.name()))]
    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        let request = self.http.get(urls::reports_url(self.base()));
        self.send_json(Operation::ListReports, request).await
    }

    /// Fetches one report.
    #[tracing::instrument(skip_all, fields(operation = Operation::GetReport.name(), id = %id))]
    pub async fn get_report(&self, id: &ReportId) -> Result<Report> {
        let request = self.http.get(urls::report_url(self.base(), id));
        self.send_json(Operation::GetReport, request).await
    }

    /// Probes backend liveness.
    #[tracing::instrument(skip_all, fields(operation = Operation::Health.name()))]
    pub async fn health(&self) -> Result<HealthStatus> {
        let request = self.http.get(urls::health_url(self.base()));
        self.send_json(Operation::Health, request).await
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends one request and returns the response if its status is 2xx.
    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        // An unreadable error body still yields an HttpError, with empty detail.
        let body = response.text().await.unwrap_or_default();
        Err(HttpError::from_response(operation, status.as_u16(), &body).into())
    }
}
