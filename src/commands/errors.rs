/// Top-level errors and their exit codes.
use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::cli::UsageError;
use crate::config::ConfigError;
use crate::paging::PagingError;

/// Everything that can end an `iquest` run early.
#[derive(Debug, Error)]
pub enum QuestError {
    /// The positional arguments did not name a query.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The query matched nothing.
    #[error("CAT_NO_ROWS_FOUND: Nothing was found matching your query")]
    NoRows,

    /// The connection environment could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session could not be established.
    #[error(transparent)]
    Session(CatalogError),

    /// A remote query failed.
    #[error("iquest Error: {operation} failed: {source}")]
    Query {
        /// Which operation was running.
        operation: &'static str,
        #[source]
        source: CatalogError,
    },

    /// Writing results or reading the prompt failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl QuestError {
    /// Wrap a catalog failure from `operation`, singling out "no rows".
    #[must_use]
    pub fn query(operation: &'static str, source: CatalogError) -> Self {
        match source {
            CatalogError::NoRowsFound => Self::NoRows,
            source => Self::Query { operation, source },
        }
    }

    /// Wrap a paging failure from `operation`.
    ///
    /// Only a first page can end in `NoRows`; once results have been written,
    /// every catalog failure is a failed query.
    #[must_use]
    pub fn paging(operation: &'static str, err: PagingError) -> Self {
        match err {
            PagingError::Catalog(source) => Self::query(operation, source),
            PagingError::Continuation(source) => Self::Query { operation, source },
            PagingError::Io(err) => Self::Io(err),
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(UsageError::MissingQuery) => 0,
            Self::NoRows => 1,
            Self::Config(_) => 2,
            Self::Session(CatalogError::Authentication(_)) => 3,
            Self::Session(_) => 2,
            Self::Query { .. } | Self::Io(_) => 4,
        }
    }
}
