/// CLI argument definitions via clap derive, and their positional interpretation.
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::warn;

const USAGE: &str = "iquest [-hz zone] [--no-page] [[hint] format_string] <query_string>
       iquest --sql <predefined_sql_string> [format_string] [arguments]
       iquest attrs";

const QUERY_SYNTAX: &str = "\
Positional arguments:
  format_string   C-style format restricted to strings (%s, %-10s, %.5s, %2$s, %2%).
  query_string    selection query, see 'Selection query syntax'.
  hint            accepted for compatibility; not used.

If 'no-distinct' appears before the query_string, the SQL DISTINCT is skipped.
If 'upper' (or 'uppercase') appears there, WHERE values are compared
case-insensitively; write all condition values in upper case. Only one of the
two takes effect: when both are given, 'upper' wins.

With --sql, a format_string is recognised only when the SQL contains '?'
placeholders and more arguments than placeholders are given. Aliases such as
'ls' take every following argument as a bind value.

Selection query syntax:
  SELECT <attribute> [, <attribute>]* [WHERE <condition> [AND <condition>]*]
  attribute   a name from 'iquest attrs'; may be wrapped in SUM, COUNT, MIN,
              MAX, AVG, ORDER or ORDER_DESC
  condition   <attribute> <rel-op> <value>, rel-op one of =, <>, >, <, LIKE,
              NOT LIKE, BETWEEN, ...; use % and _ as wildcards, \\ to escape

Exit status: 0 success, 1 no rows found, 2 connection failure,
3 authentication failure, 4 any other failure.";

/// iquest — query the iRODS catalog.
#[derive(Debug, Parser)]
#[command(
    name = "iquest",
    about = "Query the iRODS catalog with GenQuery or predefined SQL",
    version,
    override_usage = USAGE,
    after_help = QUERY_SYNTAX
)]
pub struct Cli {
    /// The zone to query (default or invalid uses the local zone).
    #[arg(short = 'z', value_name = "ZONE_NAME")]
    pub zone: Option<String>,

    /// Do not prompt to continue after each page of results.
    #[arg(long)]
    pub no_page: bool,

    /// Execute a predefined SQL query, given as full SQL or its alias.
    #[arg(long)]
    pub sql: bool,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Log catalog requests and timings to stderr.
    #[arg(long)]
    pub debug: bool,

    /// Modifiers, hint, format and query (or SQL and its arguments with --sql).
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One value per line, or the format string when one is given.
    #[default]
    Text,
    /// One pretty-printed JSON object per page.
    Json,
    /// One JSON array per row.
    Ndjson,
    /// Aligned table with attribute headers.
    Table,
}

/// Errors in the positional arguments that clap cannot catch.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("StringCondition needed")]
    MissingQuery,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// List the known attribute names.
    Attrs,
    /// A general (GenQuery) query.
    General(GeneralQuery),
    /// A predefined SQL query.
    Sql(SqlQuery),
}

/// Interpreted general-mode arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralQuery {
    pub query: String,
    pub format: Option<String>,
    pub hint: Option<String>,
    pub no_distinct: bool,
    pub upper_case: bool,
    pub zone: Option<String>,
    pub prompt: bool,
}

/// Interpreted `--sql` arguments. `args` may still hold a leading format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    pub sql: String,
    pub args: Vec<String>,
    pub zone: Option<String>,
    pub prompt: bool,
}

impl Cli {
    /// Interpret the positional arguments.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::MissingQuery` when no query string is left.
    pub fn invocation(&self) -> Result<Invocation, UsageError> {
        let zone = self.zone.clone().filter(|z| !z.is_empty());
        let prompt = !self.no_page;

        if self.sql {
            let [sql, rest @ ..] = self.args.as_slice() else {
                return Err(UsageError::MissingQuery);
            };
            return Ok(Invocation::Sql(SqlQuery {
                sql: sql.clone(),
                args: rest.iter().take_while(|a| !a.is_empty()).cloned().collect(),
                zone,
                prompt,
            }));
        }

        // `attrs` only counts when no query flag was given.
        if let [only] = self.args.as_slice() {
            if only == "attrs" && self.zone.is_none() && !self.no_page {
                return Ok(Invocation::Attrs);
            }
        }

        let mut rest = self.args.as_slice();
        let no_distinct = matches!(rest.first(), Some(a) if a == "no-distinct");
        if no_distinct {
            rest = &rest[1..];
        }
        let upper_case = matches!(rest.first(), Some(a) if a == "upper" || a == "uppercase");
        if upper_case {
            rest = &rest[1..];
        }

        let (hint, format, query) = match rest {
            [] => return Err(UsageError::MissingQuery),
            [query] => (None, None, query),
            [format, query] => (None, Some(format), query),
            [hint, format, query] => (Some(hint), Some(format), query),
            [ignored @ .., query] => {
                warn!(?ignored, "too many arguments; only the last is used as the query");
                (None, None, query)
            }
        };

        Ok(Invocation::General(GeneralQuery {
            query: query.clone(),
            format: format.cloned(),
            hint: hint.cloned(),
            no_distinct,
            upper_case,
            zone,
            prompt,
        }))
    }
}
