use serde::{Deserialize, Serialize};

use crate::domain::Searchable;
use crate::domain::types::LabelId;

/// Merchandising label ("étiquette") attached to books, e.g. "Nouveauté".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    /// CSS colour used for the badge, as sent by the backend.
    #[serde(default)]
    pub color: Option<String>,
}

impl Searchable for Label {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
