//! Entity-specific list filters.
//!
//! Every filter has a neutral `All` value (its `Default`) that contributes no
//! query parameter at all.

use crate::domain::order::OrderStatus;
use crate::domain::types::CategoryId;

pub trait ListFilter: Clone + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Query parameters contributed by this filter. Empty for `All`.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    fn is_all(&self) -> bool {
        *self == Self::default()
    }
}

/// Filter for sections without a status selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoFilter;

impl ListFilter for NoFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BookFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl ListFilter for BookFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            BookFilter::All => Vec::new(),
            BookFilter::Category(id) => vec![("categoryId", id.to_string())],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderStatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl ListFilter for OrderStatusFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            OrderStatusFilter::All => Vec::new(),
            OrderStatusFilter::Only(status) => vec![("status", status.as_str().to_string())],
        }
    }
}

impl From<Option<OrderStatus>> for OrderStatusFilter {
    fn from(value: Option<OrderStatus>) -> Self {
        value.map_or(OrderStatusFilter::All, OrderStatusFilter::Only)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ListFilter for UserStatusFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            UserStatusFilter::All => Vec::new(),
            UserStatusFilter::Active => vec![("active", "true".to_string())],
            UserStatusFilter::Inactive => vec![("active", "false".to_string())],
        }
    }
}
