/// Request objects for general and specific queries.

/// Page-size cap sent with every request.
pub const MAX_SQL_ROWS: u32 = 256;

/// Condition option for a general query.
///
/// Both variants live in a single slot, so setting one replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOption {
    /// Skip the `DISTINCT` normally applied to the generated SQL.
    NoDistinct,
    /// Compare `WHERE` values case-insensitively (values must be upper case).
    UpperCaseWhere,
}

/// A general (GenQuery) request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenQueryRequest {
    /// GenQuery1 text, e.g. `SELECT DATA_NAME WHERE COLL_NAME = '/tempZone'`.
    pub query: String,
    /// Result-count hint supplied on the command line.
    pub hint: Option<String>,
    /// Single condition option slot.
    pub option: Option<QueryOption>,
    /// Zone to query instead of the local one.
    pub zone: Option<String>,
    /// Maximum rows per page.
    pub max_rows: u32,
}

impl GenQueryRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            hint: None,
            option: None,
            zone: None,
            max_rows: MAX_SQL_ROWS,
        }
    }

    /// Request that `DISTINCT` be skipped. Replaces any earlier option.
    pub fn set_no_distinct(&mut self) {
        self.option = Some(QueryOption::NoDistinct);
    }

    /// Request case-insensitive matching. Replaces any earlier option.
    pub fn set_upper_case_where(&mut self) {
        self.option = Some(QueryOption::UpperCaseWhere);
    }

    #[must_use]
    pub fn distinct(&self) -> bool {
        self.option != Some(QueryOption::NoDistinct)
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.option != Some(QueryOption::UpperCaseWhere)
    }
}

/// A predefined SQL ("specific query") request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificQueryRequest {
    /// Full SQL text or a registered alias.
    pub sql: String,
    /// Values bound to `?` placeholders, in order.
    pub args: Vec<String>,
    /// Zone to query instead of the local one.
    pub zone: Option<String>,
    /// Maximum rows per page.
    pub max_rows: u32,
}

impl SpecificQueryRequest {
    #[must_use]
    pub fn new(sql: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            args,
            zone: None,
            max_rows: MAX_SQL_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = GenQueryRequest::new("SELECT DATA_NAME");
        assert!(req.distinct());
        assert!(req.case_sensitive());
        assert_eq!(req.max_rows, 256);
    }

    #[test]
    fn test_upper_overrides_no_distinct() {
        let mut req = GenQueryRequest::new("SELECT DATA_NAME");
        req.set_no_distinct();
        req.set_upper_case_where();
        assert_eq!(req.option, Some(QueryOption::UpperCaseWhere));
        // The earlier no-distinct request is gone.
        assert!(req.distinct());
        assert!(!req.case_sensitive());
    }
}
