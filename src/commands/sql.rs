/// Specific query mode: predefined SQL (or its alias) with bind arguments.
use std::io::{BufRead, Write};

use crate::catalog::{Catalog, SpecificQueryRequest};
use crate::cli::OutputCtx;
use crate::cli::args::SqlQuery;
use crate::cli::output::write_page;
use crate::paging::{Completion, Pager};

use super::{QuestError, prompts};

const OPERATION: &str = "specific query";

/// Split trailing arguments into an optional format and the bind values.
///
/// The first argument is a format only when the SQL has `?` placeholders and
/// more arguments than placeholders were given. An alias has no visible
/// placeholders, so with an alias every argument binds. A recognised format
/// gets a newline appended.
#[must_use]
pub fn split_arguments(sql: &str, args: &[String]) -> (Option<String>, Vec<String>) {
    let placeholders = sql.matches('?').count();
    match args {
        [format, binds @ ..] if placeholders > 0 && args.len() > placeholders => {
            (Some(format!("{format}\n")), binds.to_vec())
        }
        _ => (None, args.to_vec()),
    }
}

/// Run a specific query and page through its results.
///
/// # Errors
///
/// Returns `QuestError::NoRows` if the first page is empty, `QuestError::Query`
/// for any other catalog failure (including on later pages), and
/// `QuestError::Io` if output fails.
pub fn run<C, R, W>(
    catalog: &mut C,
    query: &SqlQuery,
    ctx: &OutputCtx,
    input: R,
    out: W,
) -> Result<Completion, QuestError>
where
    C: Catalog,
    R: BufRead,
    W: Write,
{
    let (format, binds) = split_arguments(&query.sql, &query.args);
    let mut request = SpecificQueryRequest::new(query.sql.clone(), binds);
    request.zone.clone_from(&query.zone);

    let mut pager = Pager::new(input, out, prompts(query.prompt, ctx));
    if let Some(zone) = &request.zone {
        if !ctx.is_json() {
            writeln!(pager.out(), "Zone is {zone}")?;
        }
    }

    let template = format.as_deref();
    pager
        .run(
            |continuation| {
                let _t = ctx.timer("specific_query");
                catalog.specific_query(&request, continuation)
            },
            |page, out| write_page(page, template, ctx, out),
        )
        .map_err(|err| QuestError::paging(OPERATION, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::cli::OutputFormat;
    use crate::commands::testing::{FakeCatalog, page};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn sql_query(sql: &str, args: &[&str]) -> SqlQuery {
        SqlQuery {
            sql: sql.to_owned(),
            args: strings(args),
            zone: None,
            prompt: false,
        }
    }

    fn execute(catalog: &mut FakeCatalog, q: &SqlQuery) -> (Result<Completion, QuestError>, String) {
        let ctx = OutputCtx::new(OutputFormat::Text);
        let mut out = Vec::new();
        let result = run(catalog, q, &ctx, &b""[..], &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_split_infers_format() {
        let (format, binds) = split_arguments(
            "select data_name from r_data_main where data_id = ?",
            &strings(&["%s", "10010"]),
        );
        assert_eq!(format.as_deref(), Some("%s\n"));
        assert_eq!(binds, vec!["10010"]);
    }

    #[test]
    fn test_split_all_bind_when_counts_match() {
        let (format, binds) = split_arguments("select ? , ?", &strings(&["a", "b"]));
        assert_eq!(format, None);
        assert_eq!(binds, vec!["a", "b"]);
    }

    #[test]
    fn test_split_alias_never_infers_format() {
        let (format, binds) = split_arguments("ls", &strings(&["%s", "b"]));
        assert_eq!(format, None);
        assert_eq!(binds, vec!["%s", "b"]);
    }

    #[test]
    fn test_alias_binds_and_default_format() {
        let mut catalog = FakeCatalog::with_pages(vec![Ok(page(
            vec![(None, vec!["r1", "r2"]), (None, vec!["x", "y"])],
            0,
        ))]);
        let (result, out) = execute(&mut catalog, &sql_query("ls", &["a", "b"]));
        assert_eq!(result.unwrap(), Completion::Exhausted);
        assert_eq!(out, "r1\nx\n----\nr2\ny\n");
        assert_eq!(catalog.specific_requests[0].0.args, vec!["a", "b"]);
    }

    #[test]
    fn test_inferred_format_renders_rows() {
        let mut catalog = FakeCatalog::with_pages(vec![Ok(page(
            vec![(None, vec!["a", "b"]), (None, vec!["1", "2"])],
            0,
        ))]);
        let q = sql_query("select x, y from t where z = ?", &["%s=%s", "v"]);
        let (_, out) = execute(&mut catalog, &q);
        assert_eq!(out, "a=1\nb=2\n");
        assert_eq!(catalog.specific_requests[0].0.args, vec!["v"]);
    }

    #[test]
    fn test_no_rows() {
        let mut catalog = FakeCatalog::with_pages(vec![Err(CatalogError::NoRowsFound)]);
        let (result, _) = execute(&mut catalog, &sql_query("ls", &[]));
        assert_eq!(result.unwrap_err().exit_code(), 1);
    }

    #[test]
    fn test_continuation_no_rows_is_an_error() {
        let mut catalog = FakeCatalog::with_pages(vec![
            Ok(page(vec![(None, vec!["a"])], 256)),
            Err(CatalogError::NoRowsFound),
        ]);
        let (result, out) = execute(&mut catalog, &sql_query("ls", &[]));
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            QuestError::Query {
                operation: "specific query",
                source: CatalogError::NoRowsFound
            }
        ));
        assert_eq!(err.exit_code(), 4);
        assert_eq!(out, "a\n");
        assert_eq!(catalog.specific_requests[1].1, 256);
    }
}
