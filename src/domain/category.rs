use serde::{Deserialize, Serialize};

use crate::domain::Searchable;
use crate::domain::types::CategoryId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}
