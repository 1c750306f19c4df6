use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::author::AuthorRef;
use crate::domain::category::Category;
use crate::domain::label::Label;
use crate::domain::types::BookId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    pub price: f64,
    /// Units in stock. Stock rules live in the backend.
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default, alias = "etiquettes")]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
