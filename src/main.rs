#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! iquest — query the iRODS catalog with GenQuery or predefined SQL.

mod catalog;
mod cli;
mod commands;
mod config;
mod format;
mod paging;
mod types;

use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, OutputCtx, UsageError, write_error};
use commands::QuestError;
use types::ErrorOutput;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            println!("Use -h for help");
            std::process::exit(1);
        }
    };

    init_tracing(cli.debug);

    let ctx = OutputCtx::new(cli.output);
    let result = cli
        .invocation()
        .map_err(QuestError::from)
        .and_then(|invocation| commands::dispatch(&invocation, &ctx));

    if let Err(err) = result {
        report(&err, &ctx);
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn report(err: &QuestError, ctx: &OutputCtx) {
    match err {
        QuestError::Usage(UsageError::MissingQuery) => {
            println!("{err}");
            let _ = Cli::command().print_help();
        }
        QuestError::NoRows if !ctx.is_json() => println!("{err}"),
        _ => write_error(&ErrorOutput::from_quest_error(err), ctx),
    }
}
