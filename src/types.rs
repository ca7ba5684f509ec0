/// Shared serializable output types.
///
/// These are what gets written in the JSON output modes. They are decoupled
/// from the internal column-major `Page`.
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, Page};
use crate::commands::QuestError;

/// One result page in JSON representation, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOutput {
    /// Attribute names, or `COLUMN_n` for unlabelled columns.
    pub columns: Vec<String>,
    /// Cell values, one inner array per row.
    pub rows: Vec<Vec<String>>,
}

impl From<&Page> for PageOutput {
    fn from(page: &Page) -> Self {
        Self {
            columns: page.headers(),
            rows: (0..page.row_count())
                .map(|i| page.row(i).into_iter().map(str::to_owned).collect())
                .collect(),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Raw iRODS status, when the catalog reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl ErrorOutput {
    /// Construct from a `QuestError`.
    #[must_use]
    pub fn from_quest_error(err: &QuestError) -> Self {
        let (code, status) = match err {
            QuestError::Usage(_) => ("usage", None),
            QuestError::NoRows => ("no_rows_found", Some(crate::catalog::status::CAT_NO_ROWS_FOUND)),
            QuestError::Config(_) => ("config_error", None),
            QuestError::Session(CatalogError::Authentication(_)) => ("authentication_failed", None),
            QuestError::Session(source) => ("connection_failed", source.status_code()),
            QuestError::Query { source, .. } => ("query_failed", source.status_code()),
            QuestError::Io(_) => ("io_error", None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                status,
            },
        }
    }
}
