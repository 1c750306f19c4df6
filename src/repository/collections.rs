//! Descriptors binding each dashboard section to its endpoint.

use serde::de::DeserializeOwned;

use crate::domain::author::Author;
use crate::domain::book::Book;
use crate::domain::category::Category;
use crate::domain::label::Label;
use crate::domain::order::Order;
use crate::domain::user::User;
use crate::repository::filters::{
    BookFilter, ListFilter, NoFilter, OrderStatusFilter, UserStatusFilter,
};

/// A remote entity collection exposed by the backend.
pub trait Collection: Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static;
    type Filter: ListFilter;

    /// Endpoint path relative to the API base URL.
    const PATH: &'static str;
    /// Sort token used until the user picks a column.
    const DEFAULT_SORT: &'static str;
    /// Human-readable section name, used in logs.
    const NAME: &'static str;
}

macro_rules! collection {
    ($name:ident, $item:ty, $filter:ty, $path:expr, $sort:expr) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Collection for $name {
            type Item = $item;
            type Filter = $filter;

            const PATH: &'static str = $path;
            const DEFAULT_SORT: &'static str = $sort;
            const NAME: &'static str = stringify!($name);
        }
    };
}

collection!(Books, Book, BookFilter, "/books", "title,asc");
collection!(Orders, Order, OrderStatusFilter, "/orders", "createdAt,desc");
collection!(Users, User, UserStatusFilter, "/users", "email,asc");
collection!(Authors, Author, NoFilter, "/authors", "name,asc");
collection!(Categories, Category, NoFilter, "/categories", "name,asc");
collection!(Labels, Label, NoFilter, "/etiquettes", "name,asc");
