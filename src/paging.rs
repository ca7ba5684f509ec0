/// The paginated remote-query loop.
///
/// ```text
/// AwaitingFirstPage --fetch(0)--> HavePage
/// HavePage --token <= 0--> Exhausted
/// HavePage --prompt declined--> Cancelled
/// HavePage --fetch(token)--> HavePage
/// ```
///
/// Every page is rendered in full before the next prompt or fetch. Errors
/// abort the loop immediately.
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogError, Page};
use crate::format::Rendered;

const PROMPT: &str = "Continue? [Y/n]";

/// Errors that end a paging run.
#[derive(Debug, Error)]
pub enum PagingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A continuation fetch failed after earlier pages were written.
    #[error(transparent)]
    Continuation(CatalogError),

    #[error("Cannot write results: {0}")]
    Io(#[from] io::Error),
}

/// How a paging run finished successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The service reported no further pages.
    Exhausted,
    /// The user declined to continue at the prompt.
    Cancelled,
    /// A page render stopped on a template error.
    RenderStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingFirstPage,
    HavePage { continuation: i64 },
    Exhausted,
    Cancelled,
}

impl State {
    fn after(page: &Page) -> Self {
        if page.has_more() {
            Self::HavePage {
                continuation: page.continuation,
            }
        } else {
            Self::Exhausted
        }
    }
}

/// Drives fetch/render/prompt over a prompt input and a result sink.
pub struct Pager<R, W> {
    input: R,
    out: W,
    prompt: bool,
    end_on_no_rows: bool,
}

impl<R: BufRead, W: Write> Pager<R, W> {
    /// `prompt` enables the `Continue? [Y/n]` question between pages.
    #[must_use]
    pub fn new(input: R, out: W, prompt: bool) -> Self {
        Self {
            input,
            out,
            prompt,
            end_on_no_rows: false,
        }
    }

    /// Treat a "no rows" status on a continuation page as the end of results.
    #[must_use]
    pub fn end_on_no_rows(mut self, enabled: bool) -> Self {
        self.end_on_no_rows = enabled;
        self
    }

    /// The result sink, for output that precedes the first page.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Run the loop until the results are exhausted, the user cancels, or a
    /// render stops.
    ///
    /// `fetch` receives 0 for the first page and the previous page's
    /// continuation token afterwards.
    ///
    /// # Errors
    ///
    /// Returns `PagingError::Catalog` if the first fetch fails (including "no
    /// rows"), `PagingError::Continuation` if a later fetch fails, and
    /// `PagingError::Io` if output or the prompt fails.
    pub fn run<F, G>(&mut self, mut fetch: F, mut render: G) -> Result<Completion, PagingError>
    where
        F: FnMut(i64) -> Result<Page, CatalogError>,
        G: FnMut(&Page, &mut W) -> io::Result<Rendered>,
    {
        let mut state = State::AwaitingFirstPage;
        let mut pages = 0usize;

        loop {
            state = match state {
                State::AwaitingFirstPage => {
                    let page = fetch(0)?;
                    pages += 1;
                    if let Rendered::Aborted(_) = render(&page, &mut self.out)? {
                        return Ok(Completion::RenderStopped);
                    }
                    State::after(&page)
                }
                State::HavePage { continuation } => {
                    if self.prompt && self.declined()? {
                        State::Cancelled
                    } else {
                        match fetch(continuation) {
                            Ok(page) => {
                                pages += 1;
                                if let Rendered::Aborted(_) = render(&page, &mut self.out)? {
                                    return Ok(Completion::RenderStopped);
                                }
                                State::after(&page)
                            }
                            Err(CatalogError::NoRowsFound) if self.end_on_no_rows => {
                                State::Exhausted
                            }
                            Err(err) => return Err(PagingError::Continuation(err)),
                        }
                    }
                }
                State::Exhausted => {
                    debug!(pages, "results exhausted");
                    return Ok(Completion::Exhausted);
                }
                State::Cancelled => {
                    debug!(pages, "paging cancelled");
                    return Ok(Completion::Cancelled);
                }
            };
        }
    }

    /// Ask whether to continue. Only a reply starting with `n` declines.
    fn declined(&mut self) -> io::Result<bool> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        let mut reply = String::new();
        self.input.read_line(&mut reply)?;
        Ok(reply.starts_with('n'))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::catalog::Column;

    fn page(value: &str, continuation: i64) -> Page {
        Page {
            columns: vec![Column {
                name: None,
                values: vec![value.to_owned()],
            }],
            continuation,
        }
    }

    struct Script {
        results: VecDeque<Result<Page, CatalogError>>,
        tokens: Vec<i64>,
    }

    impl Script {
        fn new(results: Vec<Result<Page, CatalogError>>) -> Self {
            Self {
                results: results.into(),
                tokens: Vec::new(),
            }
        }

        fn fetch(&mut self, token: i64) -> Result<Page, CatalogError> {
            self.tokens.push(token);
            self.results
                .pop_front()
                .expect("fetch called more often than scripted")
        }
    }

    fn drive(
        script: &mut Script,
        input: &str,
        prompt: bool,
        end_on_no_rows: bool,
    ) -> (Result<Completion, PagingError>, String) {
        let mut out = Vec::new();
        let result = {
            let mut pager =
                Pager::new(input.as_bytes(), &mut out, prompt).end_on_no_rows(end_on_no_rows);
            pager.run(
                |token| script.fetch(token),
                |page, out| {
                    for row in 0..page.row_count() {
                        writeln!(out, "{}", page.row(row).join(","))?;
                    }
                    Ok(Rendered::Complete)
                },
            )
        };
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_single_page_exhausts() {
        let mut script = Script::new(vec![Ok(page("a", 0))]);
        let (result, out) = drive(&mut script, "", true, false);
        assert_eq!(result.unwrap(), Completion::Exhausted);
        assert_eq!(out, "a\n");
        assert_eq!(script.tokens, vec![0]);
    }

    #[test]
    fn test_negative_token_exhausts() {
        let mut script = Script::new(vec![Ok(page("a", -1))]);
        let (result, _) = drive(&mut script, "", true, false);
        assert_eq!(result.unwrap(), Completion::Exhausted);
    }

    #[test]
    fn test_tokens_are_threaded_without_prompt() {
        let mut script = Script::new(vec![
            Ok(page("a", 256)),
            Ok(page("b", 512)),
            Ok(page("c", 0)),
        ]);
        let (result, out) = drive(&mut script, "", false, false);
        assert_eq!(result.unwrap(), Completion::Exhausted);
        assert_eq!(out, "a\nb\nc\n");
        assert_eq!(script.tokens, vec![0, 256, 512]);
    }

    #[test]
    fn test_prompt_decline_cancels() {
        let mut script = Script::new(vec![Ok(page("a", 256))]);
        let (result, out) = drive(&mut script, "n\n", true, false);
        assert_eq!(result.unwrap(), Completion::Cancelled);
        assert_eq!(out, "a\nContinue? [Y/n]");
        assert_eq!(script.tokens, vec![0]);
    }

    #[test]
    fn test_prompt_accepts_anything_else() {
        let mut script = Script::new(vec![Ok(page("a", 256)), Ok(page("b", 0))]);
        let (result, out) = drive(&mut script, "yes\n", true, false);
        assert_eq!(result.unwrap(), Completion::Exhausted);
        assert_eq!(out, "a\nContinue? [Y/n]b\n");
    }

    #[test]
    fn test_end_of_input_continues() {
        let mut script = Script::new(vec![Ok(page("a", 1)), Ok(page("b", 0))]);
        let (result, _) = drive(&mut script, "", true, false);
        assert_eq!(result.unwrap(), Completion::Exhausted);
        assert_eq!(script.tokens, vec![0, 1]);
    }

    #[test]
    fn test_first_page_no_rows_propagates() {
        let mut script = Script::new(vec![Err(CatalogError::NoRowsFound)]);
        let (result, _) = drive(&mut script, "", false, true);
        assert!(matches!(
            result,
            Err(PagingError::Catalog(CatalogError::NoRowsFound))
        ));
    }

    #[test]
    fn test_continuation_no_rows_policy() {
        let mut script = Script::new(vec![Ok(page("a", 5)), Err(CatalogError::NoRowsFound)]);
        let (result, _) = drive(&mut script, "", false, true);
        assert_eq!(result.unwrap(), Completion::Exhausted);

        let mut script = Script::new(vec![Ok(page("a", 5)), Err(CatalogError::NoRowsFound)]);
        let (result, _) = drive(&mut script, "", false, false);
        assert!(matches!(
            result,
            Err(PagingError::Continuation(CatalogError::NoRowsFound))
        ));
    }

    #[test]
    fn test_mid_stream_error_discards_rest() {
        let mut script = Script::new(vec![
            Ok(page("a", 5)),
            Err(CatalogError::from_status(-806_000, None)),
        ]);
        let (result, out) = drive(&mut script, "", false, true);
        assert!(matches!(
            result,
            Err(PagingError::Continuation(CatalogError::Status { code: -806_000, .. }))
        ));
        assert_eq!(out, "a\n");
    }

    #[test]
    fn test_render_abort_stops_fetching() {
        let mut script = Script::new(vec![Ok(page("a", 5))]);
        let mut out = Vec::new();
        let mut pager = Pager::new(&b""[..], &mut out, false);
        let result = pager.run(
            |token| script.fetch(token),
            |_, _| {
                Ok(Rendered::Aborted(crate::format::FormatError::TooFewArguments {
                    referenced: 2,
                    supplied: 1,
                }))
            },
        );
        assert_eq!(result.unwrap(), Completion::RenderStopped);
        assert_eq!(script.tokens, vec![0]);
    }
}
