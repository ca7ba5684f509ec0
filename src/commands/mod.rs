/// Command dispatch: routes an `Invocation` to its implementation.
pub mod attrs;
pub mod errors;
pub mod query;
pub mod sql;

#[cfg(test)]
mod testing;

use std::io;

use tracing::debug;

use crate::catalog::{CatalogError, HttpCatalog};
use crate::cli::{Invocation, OutputCtx};
use crate::config::RodsEnv;

pub use errors::QuestError;

/// Variable consulted before prompting for a password.
const PASSWORD_VAR: &str = "IRODS_PASSWORD";

/// Dispatch an interpreted command line to its handler.
///
/// The catalog session lives only for the duration of the query and is
/// closed on every return path.
///
/// # Errors
///
/// Returns `QuestError` on any command failure.
pub fn dispatch(invocation: &Invocation, ctx: &OutputCtx) -> Result<(), QuestError> {
    match invocation {
        Invocation::Attrs => attrs::run(ctx, &mut io::stdout().lock()),
        Invocation::General(q) => {
            let mut catalog = open_session(ctx)?;
            let completion = query::run(
                &mut catalog,
                q,
                ctx,
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
            debug!(?completion, "general query finished");
            Ok(())
        }
        Invocation::Sql(q) => {
            let mut catalog = open_session(ctx)?;
            let completion = sql::run(
                &mut catalog,
                q,
                ctx,
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
            debug!(?completion, "specific query finished");
            Ok(())
        }
    }
}

/// Whether to ask before each further page. Never in JSON modes, where
/// stdout carries only results.
fn prompts(requested: bool, ctx: &OutputCtx) -> bool {
    requested && !ctx.is_json()
}

fn open_session(ctx: &OutputCtx) -> Result<HttpCatalog, QuestError> {
    let env = RodsEnv::load()?;
    debug!(
        host = %env.host,
        port = env.port,
        user = %env.user_name,
        zone = %env.zone_name,
        url = %env.http_api_url,
        "environment resolved"
    );

    let password = password()?;
    let _t = ctx.timer("connect");
    HttpCatalog::connect(&env.http_api_url, &env.user_name, &password).map_err(QuestError::Session)
}

fn password() -> Result<String, QuestError> {
    if let Some(password) = std::env::var(PASSWORD_VAR).ok().filter(|p| !p.is_empty()) {
        return Ok(password);
    }
    rpassword::prompt_password("Enter your current iRODS password:").map_err(|e| {
        QuestError::Session(CatalogError::Authentication(format!(
            "cannot read password: {e}"
        )))
    })
}
