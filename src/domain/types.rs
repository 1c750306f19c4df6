//! Strongly-typed value objects used by domain records.
//!
//! Identifiers coming back from the catalogue API are validated on
//! deserialization so that a record reaching the list views can be trusted to
//! carry a positive id. Sort keys wrap the opaque `field,direction` token the
//! backend understands.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(BookId, "Unique identifier for a book.");
id_newtype!(AuthorId, "Unique identifier for an author.");
id_newtype!(CategoryId, "Unique identifier for a category.");
id_newtype!(LabelId, "Unique identifier for a label (étiquette).");
id_newtype!(OrderId, "Unique identifier for an order.");
id_newtype!(UserId, "Unique identifier for a back-office or customer account.");

/// Direction part of a sort token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Returns the opposite direction, used when a column header is toggled.
    pub const fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

/// Opaque sort token forwarded to the backend as the `sort` parameter.
///
/// Most screens build it from a field and a direction (`"createdAt,desc"`),
/// but any non-empty token the backend understands is accepted verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey(String);

impl SortKey {
    /// Composes a `field,direction` token.
    pub fn new(field: &str, direction: SortDirection) -> Result<Self, TypeConstraintError> {
        let field = field.trim();
        if field.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(format!("{field},{}", direction.as_str())))
    }

    /// Wraps a raw backend token without interpreting it.
    pub fn raw<S: Into<String>>(token: S) -> Result<Self, TypeConstraintError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Field part of a composite token.
    pub fn field(&self) -> &str {
        self.0.split(',').next().unwrap_or_default()
    }

    /// Direction part of a composite token, if one is present and recognised.
    pub fn direction(&self) -> Option<SortDirection> {
        self.0.split_once(',').and_then(|(_, dir)| dir.parse().ok())
    }

    /// Same field, opposite direction. Tokens without a direction become
    /// descending.
    pub fn toggled(&self) -> Self {
        let direction = self
            .direction()
            .map(SortDirection::reversed)
            .unwrap_or(SortDirection::Desc);
        Self(format!("{},{}", self.field(), direction.as_str()))
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self("id,asc".to_string())
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SortKey {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::raw(s)
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.0
    }
}
