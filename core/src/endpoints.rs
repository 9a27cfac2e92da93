//! Typed endpoint helpers layered over `ApiClient`.

use serde::Serialize;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::resource::Resource;
use crate::types::{Health, Id, Paginated, SchemaLite};

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Extra filters passed through verbatim.
    pub extra: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn ordering(mut self, field: impl Into<String>) -> Self {
        self.ordering = Some(field.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    fn to_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new();
        if let Some(search) = &self.search {
            options = options.query("search", search.as_str());
        }
        if let Some(ordering) = &self.ordering {
            options = options.query("ordering", ordering.as_str());
        }
        if let Some(page) = self.page {
            options = options.query("page", page.to_string());
        }
        if let Some(size) = self.page_size {
            options = options.query("page_size", size.to_string());
        }
        for (k, v) in &self.extra {
            options = options.query(k.as_str(), v.as_str());
        }
        options
    }
}

impl ApiClient {
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health").await
    }

    pub async fn schema_lite(&self) -> Result<SchemaLite, ApiError> {
        self.get("/schema-lite").await
    }

    /// First page of `R`'s collection.
    pub async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Paginated<R>, ApiError> {
        self.get_with(R::PATH, &query.to_options()).await
    }

    pub async fn retrieve<R: Resource>(&self, id: Id) -> Result<R, ApiError> {
        self.get(&R::item_path(id)).await
    }

    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, ApiError> {
        self.post(R::PATH, draft).await
    }

    pub async fn update<R: Resource>(&self, id: Id, draft: &R::Draft) -> Result<R, ApiError> {
        self.put(&R::item_path(id), draft).await
    }

    /// PATCH with any JSON-serializable subset of `R`'s writable fields.
    pub async fn partial_update<R, P>(&self, id: Id, changes: &P) -> Result<R, ApiError>
    where
        R: Resource,
        P: Serialize + ?Sized,
    {
        self.patch(&R::item_path(id), changes).await
    }

    pub async fn destroy<R: Resource>(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&R::item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_encodes_in_declaration_order() {
        let options = ListQuery::new()
            .search("north")
            .ordering("-created_at")
            .page(3)
            .page_size(50)
            .filter("status", "active")
            .to_options();
        let pairs: Vec<(&str, &str)> = options
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("search", "north"),
                ("ordering", "-created_at"),
                ("page", "3"),
                ("page_size", "50"),
                ("status", "active"),
            ]
        );
    }

    #[test]
    fn empty_list_query_adds_nothing() {
        assert!(ListQuery::new().to_options().query.is_empty());
    }
}
