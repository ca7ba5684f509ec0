/// iRODS status codes this client reports by name.
///
/// Values come from the iRODS error table (`rodsErrorTable.h`). Anything not
/// listed here is shown numerically.

/// The query matched no rows.
pub const CAT_NO_ROWS_FOUND: i32 = -808_000;

const KNOWN: &[(i32, &str)] = &[
    (-130_000, "SYS_INVALID_INPUT_PARAM"),
    (-806_000, "CAT_SQL_ERR"),
    (CAT_NO_ROWS_FOUND, "CAT_NO_ROWS_FOUND"),
    (-818_000, "CAT_NO_ACCESS_PERMISSION"),
    (-826_000, "CAT_INVALID_AUTHENTICATION"),
    (-827_000, "CAT_INVALID_USER"),
    (-853_000, "CAT_UNKNOWN_SPECIFIC_QUERY"),
];

/// Symbolic name for a status code, if known.
#[must_use]
pub fn status_name(code: i32) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
