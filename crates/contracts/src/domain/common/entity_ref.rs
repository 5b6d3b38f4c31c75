use serde::{Deserialize, Serialize};

/// Identity assigned by the backend. The front-end never generates one.
pub type RecordId = i64;

/// Lightweight reference to another record (`{ "id": 1, "nome": "..." }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: RecordId,
    #[serde(rename = "nome", default)]
    pub name: String,
}

impl EntityRef {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
