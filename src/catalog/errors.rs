/// Errors from the catalog transport and the remote catalog service.
use thiserror::Error;

use super::status::{CAT_NO_ROWS_FOUND, status_name};

/// Typed errors from a catalog session.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog service could not be reached.
    #[error("Cannot connect to {url}: {source}")]
    Connect {
        /// Endpoint that was being contacted.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service rejected the credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The query matched nothing.
    #[error("CAT_NO_ROWS_FOUND: Nothing was found matching your query")]
    NoRowsFound,

    /// The catalog answered with a negative status.
    #[error("{}", describe_status(.code, .message.as_deref()))]
    Status {
        /// Raw iRODS status code.
        code: i32,
        /// Server-provided detail, if any.
        message: Option<String>,
    },

    /// The HTTP layer answered with a non-success status.
    #[error("Catalog service returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Transport failure after the session was established.
    #[error("Request to catalog service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response could not be understood.
    #[error("Malformed catalog response: {0}")]
    Protocol(String),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_status(code: &i32, message: Option<&str>) -> String {
    let name = status_name(*code).unwrap_or("catalog error");
    match message {
        Some(m) if !m.is_empty() => format!("{name} ({code}): {m}"),
        _ => format!("{name} ({code})"),
    }
}

impl CatalogError {
    /// Map a raw catalog status to an error, treating the "no rows" code specially.
    #[must_use]
    pub fn from_status(code: i32, message: Option<String>) -> Self {
        if code == CAT_NO_ROWS_FOUND {
            Self::NoRowsFound
        } else {
            Self::Status { code, message }
        }
    }

    /// Raw iRODS status code, when the error carries one.
    #[must_use]
    pub fn status_code(&self) -> Option<i32> {
        match self {
            Self::NoRowsFound => Some(CAT_NO_ROWS_FOUND),
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_status_maps_to_variant() {
        let err = CatalogError::from_status(CAT_NO_ROWS_FOUND, None);
        assert!(matches!(err, CatalogError::NoRowsFound));
        assert_eq!(err.status_code(), Some(-808_000));
    }

    #[test]
    fn test_known_status_is_named() {
        let err = CatalogError::from_status(-806_000, Some("bad column".to_owned()));
        assert_eq!(err.to_string(), "CAT_SQL_ERR (-806000): bad column");
    }

    #[test]
    fn test_unknown_status_is_generic() {
        let err = CatalogError::from_status(-1, None);
        assert_eq!(err.to_string(), "catalog error (-1)");
    }
}
