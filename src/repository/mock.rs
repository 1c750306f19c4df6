//! Mock collection reader for isolating list views in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::repository::errors::RepositoryResult;
use crate::repository::{CollectionReader, PageRequest};

mock! {
    pub Backend {}

    #[async_trait]
    impl CollectionReader for Backend {
        async fn fetch_page(&self, path: &str, request: &PageRequest) -> RepositoryResult<Value>;
        async fn fetch_all(&self, path: &str) -> RepositoryResult<Value>;
    }
}
