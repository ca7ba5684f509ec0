/// CLI layer: argument parsing and output formatting.
pub mod args;
pub mod output;

pub use args::{Cli, Invocation, OutputFormat, UsageError};
pub use output::{OutputCtx, write_error};
