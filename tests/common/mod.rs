use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bookstore_admin::repository::collections::Collection;
use bookstore_admin::repository::errors::{RepositoryError, RepositoryResult};
use bookstore_admin::repository::filters::UserStatusFilter;
use bookstore_admin::repository::{CollectionReader, PageRequest};
use serde_json::{Value, json};

/// Collection of the integers `1..=total`, filtered like users: `active=true`
/// keeps even numbers, `active=false` odd ones; `search` is a substring match.
pub struct Numbers;

impl Collection for Numbers {
    type Item = u32;
    type Filter = UserStatusFilter;

    const PATH: &'static str = "/numbers";
    const DEFAULT_SORT: &'static str = "value,asc";
    const NAME: &'static str = "Numbers";
}

/// In-memory paginated endpoint with scripted latency.
///
/// The page is computed when the request arrives; the response is delivered
/// after the next queued delay (if any).
#[derive(Default)]
pub struct FakeCatalog {
    total: Mutex<u32>,
    delays: Mutex<VecDeque<Duration>>,
    failure: Mutex<Option<RepositoryError>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl FakeCatalog {
    pub fn new(total: u32) -> Arc<Self> {
        let catalog = Self::default();
        *catalog.total.lock().unwrap() = total;
        Arc::new(catalog)
    }

    pub fn set_total(&self, total: u32) {
        *self.total.lock().unwrap() = total;
    }

    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn fail_next(&self, err: RepositoryError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> PageRequest {
        self.requests().pop().expect("no request was issued")
    }

    fn page_for(&self, request: &PageRequest) -> Value {
        let total = *self.total.lock().unwrap();
        let active = request
            .filters
            .iter()
            .find(|(key, _)| *key == "active")
            .map(|(_, value)| value.as_str());

        let matching: Vec<u32> = (1..=total)
            .filter(|n| {
                request
                    .search
                    .as_deref()
                    .is_none_or(|term| n.to_string().contains(term))
            })
            .filter(|n| match active {
                Some("true") => n % 2 == 0,
                Some("false") => n % 2 == 1,
                _ => true,
            })
            .collect();

        let content: Vec<u32> = matching
            .iter()
            .skip(request.page * request.size)
            .take(request.size)
            .copied()
            .collect();

        json!({
            "content": content,
            "totalElements": matching.len(),
            "totalPages": matching.len().div_ceil(request.size),
            "number": request.page
        })
    }
}

#[async_trait]
impl CollectionReader for FakeCatalog {
    async fn fetch_page(&self, _path: &str, request: &PageRequest) -> RepositoryResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let page = self.page_for(request);
        let failure = self.failure.lock().unwrap().take();
        let delay = self.delays.lock().unwrap().pop_front();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(page),
        }
    }

    async fn fetch_all(&self, _path: &str) -> RepositoryResult<Value> {
        let total = *self.total.lock().unwrap();
        Ok(json!((1..=total).collect::<Vec<_>>()))
    }
}

pub fn range(from: u32, to: u32) -> Vec<u32> {
    (from..=to).collect()
}
