//! Normalization of collection payloads.
//!
//! The backend is not consistent about field names across endpoints: Spring
//! style pages (`content`, `totalElements`, `totalPages`, `number`), the newer
//! nested `page` metadata block, snake_case variants, `items`/`data` wrappers,
//! and plain JSON arrays for unpaginated lists all show up. Everything is
//! folded into [`CollectionPage`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::repository::PageRequest;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// One page of a remote collection, with totals for the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    /// Zero-indexed page the backend says it returned.
    pub page: usize,
}

#[derive(Debug, Default, Deserialize)]
struct PageMeta {
    #[serde(default, alias = "pageNumber")]
    number: Option<usize>,
    #[serde(default)]
    size: Option<usize>,
    #[serde(
        default,
        rename = "totalElements",
        alias = "total_elements",
        alias = "totalItems",
        alias = "total_items",
        alias = "total"
    )]
    total_elements: Option<usize>,
    #[serde(default, rename = "totalPages", alias = "total_pages", alias = "pages")]
    total_pages: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageField {
    Index(usize),
    Meta(PageMeta),
}

#[derive(Debug, Deserialize)]
struct RawPage<T> {
    #[serde(alias = "items", alias = "data", alias = "results")]
    content: Vec<T>,
    #[serde(default)]
    page: Option<PageField>,
    #[serde(flatten)]
    meta: PageMeta,
}

impl<T: DeserializeOwned> CollectionPage<T> {
    /// Normalizes a payload returned for `request`.
    ///
    /// Missing totals are derived from what is known: the item count when the
    /// collection is not paginated, `ceil(total / size)` for the page count,
    /// and the requested page for the page index.
    pub fn from_value(value: Value, request: &PageRequest) -> RepositoryResult<Self> {
        if value.is_array() {
            let items: Vec<T> = serde_json::from_value(value)?;
            let total_items = items.len();
            return Ok(Self {
                items,
                total_items,
                total_pages: usize::from(total_items > 0),
                page: 0,
            });
        }

        if !value.is_object() {
            return Err(RepositoryError::Decode(format!(
                "expected a collection page, got {}",
                json_kind(&value)
            )));
        }

        let raw: RawPage<T> = serde_json::from_value(value)?;
        let (nested, index) = match raw.page {
            Some(PageField::Meta(meta)) => (meta, None),
            Some(PageField::Index(index)) => (PageMeta::default(), Some(index)),
            None => (PageMeta::default(), None),
        };
        let meta = raw.meta;

        let total_items = meta
            .total_elements
            .or(nested.total_elements)
            .unwrap_or(raw.content.len());
        let size = meta.size.or(nested.size).unwrap_or(request.size);
        let total_pages = meta
            .total_pages
            .or(nested.total_pages)
            .unwrap_or_else(|| if size == 0 { 0 } else { total_items.div_ceil(size) });
        let page = meta
            .number
            .or(index)
            .or(nested.number)
            .unwrap_or(request.page);

        Ok(Self {
            items: raw.content,
            total_items,
            total_pages,
            page,
        })
    }
}

/// Extracts every record from a full-collection payload, accepting either a
/// bare array or any page-shaped object.
pub fn items_from_value<T: DeserializeOwned>(value: Value) -> RepositoryResult<Vec<T>> {
    let request = PageRequest::new(0, 0);
    CollectionPage::<T>::from_value(value, &request).map(|page| page.items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
