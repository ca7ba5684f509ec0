/// Scripted in-memory catalog for command tests.
use std::collections::VecDeque;

use crate::catalog::{Catalog, CatalogError, Column, GenQueryRequest, Page, SpecificQueryRequest};

#[derive(Default)]
pub struct FakeCatalog {
    pub pages: VecDeque<Result<Page, CatalogError>>,
    pub gen_requests: Vec<(GenQueryRequest, i64)>,
    pub specific_requests: Vec<(SpecificQueryRequest, i64)>,
}

impl FakeCatalog {
    pub fn with_pages(pages: Vec<Result<Page, CatalogError>>) -> Self {
        Self {
            pages: pages.into(),
            ..Self::default()
        }
    }

    fn next(&mut self) -> Result<Page, CatalogError> {
        self.pages.pop_front().unwrap_or(Err(CatalogError::NoRowsFound))
    }
}

impl Catalog for FakeCatalog {
    fn gen_query(
        &mut self,
        request: &GenQueryRequest,
        continuation: i64,
    ) -> Result<Page, CatalogError> {
        self.gen_requests.push((request.clone(), continuation));
        self.next()
    }

    fn specific_query(
        &mut self,
        request: &SpecificQueryRequest,
        continuation: i64,
    ) -> Result<Page, CatalogError> {
        self.specific_requests.push((request.clone(), continuation));
        self.next()
    }
}

/// A page with one column per `(name, values)` pair.
pub fn page(columns: Vec<(Option<&str>, Vec<&str>)>, continuation: i64) -> Page {
    Page {
        columns: columns
            .into_iter()
            .map(|(name, values)| Column {
                name: name.map(str::to_owned),
                values: values.into_iter().map(str::to_owned).collect(),
            })
            .collect(),
        continuation,
    }
}
