/// General query mode: a GenQuery string, optional hint and format.
use std::io::{BufRead, Write};

use crate::catalog::{Catalog, GenQueryRequest};
use crate::cli::OutputCtx;
use crate::cli::args::GeneralQuery;
use crate::cli::output::write_page;
use crate::paging::{Completion, Pager};

use super::{QuestError, prompts};

const OPERATION: &str = "general query";

/// Build the request for `query`.
///
/// `no-distinct` and `upper` share one option slot; applying them in this
/// order means `upper` wins when both are given.
#[must_use]
pub fn build_request(query: &GeneralQuery) -> GenQueryRequest {
    let mut request = GenQueryRequest::new(query.query.clone());
    request.hint.clone_from(&query.hint);
    request.zone.clone_from(&query.zone);
    if query.no_distinct {
        request.set_no_distinct();
    }
    if query.upper_case {
        request.set_upper_case_where();
    }
    request
}

/// Run a general query and page through its results.
///
/// # Errors
///
/// Returns `QuestError::NoRows` if the first page is empty, `QuestError::Query`
/// for any other catalog failure, and `QuestError::Io` if output fails.
pub fn run<C, R, W>(
    catalog: &mut C,
    query: &GeneralQuery,
    ctx: &OutputCtx,
    input: R,
    out: W,
) -> Result<Completion, QuestError>
where
    C: Catalog,
    R: BufRead,
    W: Write,
{
    let request = build_request(query);
    let mut pager = Pager::new(input, out, prompts(query.prompt, ctx)).end_on_no_rows(true);

    if let Some(zone) = &request.zone {
        if !ctx.is_json() {
            writeln!(pager.out(), "Zone is {zone}")?;
        }
    }

    let template = query.format.as_deref();
    pager
        .run(
            |continuation| {
                let _t = ctx.timer("gen_query");
                catalog.gen_query(&request, continuation)
            },
            |page, out| write_page(page, template, ctx, out),
        )
        .map_err(|err| QuestError::paging(OPERATION, err))
}
