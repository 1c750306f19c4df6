use serde::{Deserialize, Serialize};

use crate::domain::Searchable;
use crate::domain::types::AuthorId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl Searchable for Author {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.nationality.as_deref());
        fields
    }
}

/// Short author reference embedded in book records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub name: String,
}
