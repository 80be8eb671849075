use std::path::PathBuf;

use reports::HttpError;
use thiserror::Error;

/// Errors returned by [`crate::ReportApiClient`].
///
/// Only [`ApiError::Http`] carries the `"<label> (<status>): <detail>"`
/// message. Transport failures are passed through as the native
/// [`reqwest::Error`] without a label or status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// No response was received, or a success body could not be decoded.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A local file could not be read for upload.
    #[error("Failed to read '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// The structured HTTP error, if this is one.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            ApiError::Http(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reports::Operation;

    #[test]
    fn http_variant_displays_backend_message() {
        let err = ApiError::from(HttpError::from_response(
            Operation::DeleteReport,
            500,
            "boom",
        ));
        assert_eq!(err.to_string(), "Failed to delete report (500): boom");
        assert_eq!(err.status(), Some(500));
        assert!(err.as_http().is_some());
    }

    #[test]
    fn file_variant_has_no_status() {
        let err = ApiError::File {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("Failed to read 'missing.txt'"));
    }
}
