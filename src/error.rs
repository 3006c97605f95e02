//! Error types for figma-export
//!
//! Every stage of an export run fails the whole run with one of these variants.
//! Errors coming from the HTTP transport, JSON decoding and the file system are
//! converted with `#[from]`; download failures are wrapped with the name of the
//! element that failed so the caller can tell which asset broke the run.

use thiserror::Error;

/// Result type alias for figma-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for figma-export
#[derive(Debug, Error)]
pub enum Error {
    /// The source is neither a `.figma` file reference nor a Figma project URL
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// The source passed the pre-check but could not be parsed as a project URL
    #[error(
        "could not parse project data from {0}; make sure it is a valid Figma project URL"
    )]
    InvalidProjectUrl(String),

    /// No access token was supplied for the run
    #[error("a Figma access token is required to perform the export")]
    MissingToken,

    /// The document has no exportable elements
    #[error(
        "the Figma document has no exportable elements; add some and re-sync"
    )]
    EmptyProject,

    /// Downloading a single element failed
    #[error("error exporting {name}: {source}")]
    Download {
        /// Resolved name of the element that failed
        name: String,
        /// Underlying transport or I/O error
        #[source]
        source: Box<Error>,
    },

    /// The render endpoint reported an error for a batch
    #[error("render request failed: {0}")]
    Render(String),

    /// The access token was rejected
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The project (or resource) does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success response from the API
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Message extracted from the response body, if any
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api_base")
        key: Option<String>,
    },
}

impl Error {
    /// Wrap an error with the name of the element being downloaded
    pub fn download(name: impl Into<String>, source: Error) -> Self {
        Error::Download {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Machine-readable error code, stable across releases
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidSource(_) => "invalid_source",
            Error::InvalidProjectUrl(_) => "invalid_project_url",
            Error::MissingToken => "missing_token",
            Error::EmptyProject => "empty_project",
            Error::Download { .. } => "download_failed",
            Error::Render(_) => "render_failed",
            Error::Auth(_) => "auth_error",
            Error::NotFound(_) => "not_found",
            Error::Api { .. } => "api_error",
            Error::Network(_) => "network_error",
            Error::Decode(_) => "decode_error",
            Error::Io(_) => "io_error",
            Error::Config { .. } => "config_error",
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn download_error_names_the_failing_element() {
        let err = Error::download(
            "Icon-1",
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only file system",
            )),
        );

        let message = err.to_string();
        assert!(message.contains("Icon-1"), "got: {message}");
        assert!(message.contains("read-only file system"), "got: {message}");
        assert_eq!(err.error_code(), "download_failed");
    }

    #[test]
    fn download_error_exposes_source_chain() {
        let err = Error::download("Logo", Error::NotFound("https://cdn/x.svg".into()));

        let source = err.source().expect("download error should carry a source");
        assert_eq!(source.to_string(), "not found: https://cdn/x.svg");
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = Error::Api {
            status: 500,
            message: "internal".into(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 500): internal");
    }

    #[test]
    fn error_codes_are_distinct() {
        let errors = vec![
            Error::InvalidSource("x".into()),
            Error::InvalidProjectUrl("x".into()),
            Error::MissingToken,
            Error::EmptyProject,
            Error::download("x", Error::MissingToken),
            Error::Render("x".into()),
            Error::Auth("x".into()),
            Error::NotFound("x".into()),
            Error::Api {
                status: 418,
                message: "x".into(),
            },
            Error::Decode(serde_json::from_str::<u8>("nope").unwrap_err()),
            Error::Io(std::io::Error::other("x")),
            Error::Config {
                message: "x".into(),
                key: None,
            },
        ];

        let mut codes: Vec<_> = errors.iter().map(Error::error_code).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total, "every variant should have its own code");
    }
}
