use serde::{Deserialize, Serialize};

/// A workspace, called "property" by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub usage_limits: u64,
    pub usage_count: u64,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Property {
    /// Usage as a whole percentage of the limit, capped at 100.
    pub fn usage_percent(&self) -> u64 {
        if self.usage_limits == 0 {
            return 0;
        }
        (self.usage_count.saturating_mul(100) / self.usage_limits).min(100)
    }
}
