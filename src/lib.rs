//! Data layer of the bookstore admin dashboard's list views.
//!
//! Server-paginated sections (users, orders, books) are driven by
//! [`services::list_query::ListQueryCoordinator`]; sections small enough to
//! load at once (authors, categories, labels) are paged in memory by
//! [`pagination::ClientPager`]. Both read from the REST backend through
//! [`repository::CollectionReader`].

pub mod domain;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

pub use crate::pagination::ClientPager;
pub use crate::services::list_query::{ListOptions, ListQueryCoordinator};
