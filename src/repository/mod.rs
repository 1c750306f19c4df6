//! Access to the bookstore's paginated-collection REST API.
//!
//! The list views only depend on [`CollectionReader`]; the HTTP client in
//! [`http`] is the production implementation and tests substitute fakes or the
//! `mockall` mock.

use async_trait::async_trait;
use serde_json::Value;

use crate::repository::errors::RepositoryResult;

pub mod collections;
pub mod errors;
pub mod filters;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod page;

/// Query parameters sent to a paginated-collection endpoint.
///
/// `page` is zero-indexed. Empty search terms and neutral filters are never
/// stored, so they never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub filters: Vec<(&'static str, String)>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: None,
            search: None,
            filters: Vec::new(),
        }
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn filter(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.filters.push((key, value.into()));
        self
    }

    /// Flattens the request into `(key, value)` pairs in a stable order.
    pub fn query_pairs(&self) -> Vec<(&str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (*k, v.clone())));
        pairs
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.query_pairs().iter().any(|(k, _)| *k == key)
    }
}

#[async_trait]
pub trait CollectionReader: Send + Sync {
    /// Fetches one page of the collection at `path`. Returns the raw payload;
    /// see [`page::CollectionPage::from_value`] for normalization.
    async fn fetch_page(&self, path: &str, request: &PageRequest) -> RepositoryResult<Value>;

    /// Fetches the whole collection at `path` in one request, for sections
    /// that page on the client.
    async fn fetch_all(&self, path: &str) -> RepositoryResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_omit_unset_parameters() {
        let request = PageRequest::new(2, 20).search("   ");
        assert_eq!(
            request.query_pairs(),
            vec![("page", "2".to_string()), ("size", "20".to_string())]
        );
        assert!(!request.has_param("search"));
    }

    #[test]
    fn query_pairs_keep_sort_search_and_filters() {
        let request = PageRequest::new(0, 10)
            .sort("title,asc")
            .search(" dumas ")
            .filter("categoryId", "4");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page", "0".to_string()),
                ("size", "10".to_string()),
                ("sort", "title,asc".to_string()),
                ("search", "dumas".to_string()),
                ("categoryId", "4".to_string()),
            ]
        );
    }
}
