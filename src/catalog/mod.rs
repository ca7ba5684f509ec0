/// Catalog service layer: request/page types, status codes, and the session seam.
pub mod columns;
pub mod errors;
pub mod http;
pub mod page;
pub mod request;
pub mod status;

pub use columns::ATTRIBUTE_NAMES;
pub use errors::CatalogError;
pub use http::HttpCatalog;
pub use page::{Column, Page};
pub use request::{GenQueryRequest, QueryOption, SpecificQueryRequest};

/// An authenticated session against a catalog service.
///
/// `continuation` is 0 for the first page and the token returned by the
/// previous page afterwards.
pub trait Catalog {
    /// Run a general (GenQuery) request and return one page.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or a negative catalog status.
    fn gen_query(
        &mut self,
        request: &GenQueryRequest,
        continuation: i64,
    ) -> Result<Page, CatalogError>;

    /// Run a predefined (specific) SQL request and return one page.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or a negative catalog status.
    fn specific_query(
        &mut self,
        request: &SpecificQueryRequest,
        continuation: i64,
    ) -> Result<Page, CatalogError>;
}
