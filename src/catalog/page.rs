/// One page of tabular query results, stored column-major.

/// A named result column. Values are aligned by row index across columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Attribute name for general queries; `None` for specific queries.
    pub name: Option<String>,
    /// Cell values, one per row.
    pub values: Vec<String>,
}

/// A result page plus the token for fetching the next one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub columns: Vec<Column>,
    /// Positive while more pages remain; zero or negative once exhausted.
    pub continuation: i64,
}

impl Page {
    /// Build a page from row-major data as returned by the service.
    ///
    /// The column count comes from `labels` when given, else from the widest
    /// row. Short rows are padded with empty cells.
    #[must_use]
    pub fn from_rows(labels: Option<&[String]>, rows: Vec<Vec<String>>, continuation: i64) -> Self {
        let width = labels.map_or_else(
            || rows.iter().map(Vec::len).max().unwrap_or(0),
            <[String]>::len,
        );
        let mut columns: Vec<Column> = (0..width)
            .map(|i| Column {
                name: labels.and_then(|l| l.get(i).cloned()),
                values: Vec::with_capacity(rows.len()),
            })
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.values.push(cells.next().unwrap_or_default());
            }
        }
        Self {
            columns,
            continuation,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Whether another page can be requested with `continuation`.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.continuation > 0
    }

    /// Cell values of row `index`, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.values.get(index).map_or("", String::as_str))
            .collect()
    }

    /// Column headers, falling back to `COLUMN_n` for unlabelled columns.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.name.clone().unwrap_or_else(|| format!("COLUMN_{}", i + 1)))
            .collect()
    }
}
