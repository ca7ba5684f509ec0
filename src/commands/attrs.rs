/// `attrs`: list the known GenQuery attribute names.
use std::io::Write;

use crate::catalog::ATTRIBUTE_NAMES;
use crate::cli::OutputCtx;
use crate::cli::output::write_attrs;

use super::QuestError;

/// Run `iquest attrs`. Never contacts the catalog.
///
/// # Errors
///
/// Returns `QuestError::Io` if writing fails.
pub fn run<W: Write>(ctx: &OutputCtx, out: &mut W) -> Result<(), QuestError> {
    write_attrs(ATTRIBUTE_NAMES, ctx, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn test_lists_every_attribute() {
        let mut out = Vec::new();
        run(&OutputCtx::new(OutputFormat::Text), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), ATTRIBUTE_NAMES.len());
        assert!(text.lines().any(|l| l == "DATA_NAME"));
    }
}
