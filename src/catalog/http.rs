/// Catalog session over the iRODS HTTP API.
///
/// The service parses GenQuery text and resolves specific-query aliases
/// itself; this type only authenticates, pages with `offset`/`count`, and
/// decodes the JSON rows. The page size is capped at the row limit the
/// service advertises on `/info`, so a full page always means "ask again".
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::columns::select_labels;
use super::errors::CatalogError;
use super::page::Page;
use super::request::{GenQueryRequest, SpecificQueryRequest};
use super::status::CAT_NO_ROWS_FOUND;
use super::Catalog;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Separator for specific-query bind arguments (ASCII unit separator).
const ARGS_DELIMITER: &str = "\u{1f}";

/// An authenticated HTTP session. The bearer token is dropped with the value.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    token: String,
    row_cap: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ServiceInfo {
    #[serde(default)]
    max_number_of_rows_per_catalog_query: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    irods_response: IrodsResponse,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct IrodsResponse {
    status_code: i32,
    #[serde(default)]
    status_message: Option<String>,
}

impl HttpCatalog {
    /// Authenticate against `base_url` and open a session.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Connect` if the service cannot be reached
    /// - `CatalogError::Authentication` if the credentials are rejected
    /// - `CatalogError::Http` for any other non-success answer
    pub fn connect(base_url: &str, user: &str, password: &str) -> Result<Self, CatalogError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| CatalogError::Connect {
                url: base_url.clone(),
                source,
            })?;

        let url = format!("{base_url}/authenticate");
        let response = client
            .post(&url)
            .basic_auth(user, Some(password))
            .send()
            .map_err(|source| CatalogError::Connect {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Authentication(format!(
                "credentials for '{user}' were rejected (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let token = response.text()?.trim().to_owned();
        if token.is_empty() {
            return Err(CatalogError::Authentication(
                "service returned an empty session token".to_owned(),
            ));
        }

        let row_cap = service_row_cap(&client, &base_url);
        debug!(%base_url, %user, ?row_cap, "session established");
        Ok(Self {
            client,
            base_url,
            token,
            row_cap,
        })
    }

    fn query(
        &self,
        params: &[(&'static str, String)],
        labels: Option<Vec<String>>,
        offset: i64,
        count: u32,
    ) -> Result<Page, CatalogError> {
        let url = format!("{}/query", self.base_url);
        debug!(%url, ?params, "catalog request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Authentication(
                "session token was rejected".to_owned(),
            ));
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        decode_page(&body, labels, offset, count)
    }
}

impl Catalog for HttpCatalog {
    fn gen_query(
        &mut self,
        request: &GenQueryRequest,
        continuation: i64,
    ) -> Result<Page, CatalogError> {
        if let Some(hint) = &request.hint {
            debug!(%hint, "result hint is not forwarded to the service");
        }

        let offset = continuation.max(0);
        let count = page_size(request.max_rows, self.row_cap);
        self.query(
            &gen_query_params(request, offset, count),
            select_labels(&request.query),
            offset,
            count,
        )
    }

    fn specific_query(
        &mut self,
        request: &SpecificQueryRequest,
        continuation: i64,
    ) -> Result<Page, CatalogError> {
        let offset = continuation.max(0);
        let count = page_size(request.max_rows, self.row_cap);
        self.query(
            &specific_query_params(request, offset, count),
            None,
            offset,
            count,
        )
    }
}

impl Drop for HttpCatalog {
    fn drop(&mut self) {
        debug!(base_url = %self.base_url, "session closed");
    }
}

/// Row cap the service applies to every catalog query, if it advertises one.
fn service_row_cap(client: &Client, base_url: &str) -> Option<u32> {
    let url = format!("{base_url}/info");
    let info = client
        .get(&url)
        .send()
        .and_then(Response::error_for_status)
        .and_then(Response::json::<ServiceInfo>);
    match info {
        Ok(info) => info.max_number_of_rows_per_catalog_query.filter(|&n| n > 0),
        Err(err) => {
            debug!(%url, %err, "service info unavailable; using the requested page size");
            None
        }
    }
}

fn page_size(requested: u32, row_cap: Option<u32>) -> u32 {
    row_cap.map_or(requested, |cap| requested.min(cap))
}

fn gen_query_params(
    request: &GenQueryRequest,
    offset: i64,
    count: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("op", "execute_genquery".to_owned()),
        ("parser", "genquery1".to_owned()),
        ("query", request.query.clone()),
        ("offset", offset.max(0).to_string()),
        ("count", count.to_string()),
        ("distinct", flag(request.distinct())),
        ("case-sensitive", flag(request.case_sensitive())),
    ];
    if let Some(zone) = &request.zone {
        params.push(("zone", zone.clone()));
    }
    params
}

fn specific_query_params(
    request: &SpecificQueryRequest,
    offset: i64,
    count: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("op", "execute_specific_query".to_owned()),
        ("name", request.sql.clone()),
        ("offset", offset.max(0).to_string()),
        ("count", count.to_string()),
    ];
    if !request.args.is_empty() {
        params.push(("args", request.args.join(ARGS_DELIMITER)));
        params.push(("args-delimiter", ARGS_DELIMITER.to_owned()));
    }
    if let Some(zone) = &request.zone {
        params.push(("zone", zone.clone()));
    }
    params
}

fn flag(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

/// Decode a `/query` response body into a page.
///
/// A full page (`count` rows) yields a continuation token equal to the next
/// offset. An empty result is `NoRowsFound` on the first page and a final
/// empty page on later ones, since offset paging cannot know in advance that
/// the previous page was the last.
fn decode_page(
    body: &str,
    labels: Option<Vec<String>>,
    offset: i64,
    count: u32,
) -> Result<Page, CatalogError> {
    let parsed: QueryResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Protocol(e.to_string()))?;

    let code = parsed.irods_response.status_code;
    if code < 0 && !(code == CAT_NO_ROWS_FOUND && offset > 0) {
        return Err(CatalogError::from_status(
            code,
            parsed.irods_response.status_message,
        ));
    }

    let rows = parsed.rows;
    if rows.is_empty() {
        return if offset > 0 {
            Ok(Page::from_rows(labels.as_deref(), Vec::new(), 0))
        } else {
            Err(CatalogError::NoRowsFound)
        };
    }

    let fetched = rows.len();
    let continuation = if u32::try_from(fetched).is_ok_and(|n| n >= count) {
        offset.saturating_add(i64::try_from(fetched).unwrap_or(i64::MAX))
    } else {
        0
    };

    // Labels only apply when they line up with what the service returned.
    let labels = labels.filter(|l| rows.first().is_none_or(|r| r.len() == l.len()));
    Ok(Page::from_rows(labels.as_deref(), rows, continuation))
}
