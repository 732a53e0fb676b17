use thiserror::Error;

/// Errors produced by the translation pipelines.
///
/// Every variant is terminal: the binaries log it and exit non-zero.
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential, endpoint or deployment is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The source file does not exist or the URL could not be reached
    #[error("input not found: {0}")]
    InputNotFound(String),

    /// The page was reached but did not answer with 200 OK
    #[error("failed to fetch page {url} (status code: {status})")]
    Fetch {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Transport failure or non-2xx status from the translation endpoint
    #[error("network error: {0}")]
    Network(String),

    /// The remote service answered with an unexpected shape
    #[error("unexpected API response: {0}")]
    Parsing(String),

    /// The chat-completion invocation failed (auth, quota, transport)
    #[error("translation service error: {0}")]
    TranslationService(String),

    #[error("no text extracted from {0}")]
    EmptyContent(String),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The .docx package or its XML could not be read or written
    #[error("document error: {0}")]
    Document(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Document(format!("invalid .docx package: {}", err))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Document(format!("invalid WordprocessingML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_mentions_status_and_url() {
        let err = Error::Fetch {
            url: "https://example.com/a".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/a"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn test_zip_error_maps_to_document_error() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::Document(_)));
        assert!(err.to_string().contains(".docx"));
    }
}
