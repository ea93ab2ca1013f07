use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<Value>,
    pub property_id: String,
    pub meta: Option<CampaignMeta>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CampaignMeta {
    pub ray_id: Option<String>,
    pub variable_map: Option<std::collections::BTreeMap<String, String>>,
    pub is_active: Option<bool>,
}

impl Campaign {
    /// Campaigns without an explicit flag count as active.
    pub fn is_active(&self) -> bool {
        self.meta
            .as_ref()
            .and_then(|meta| meta.is_active)
            .unwrap_or(true)
    }
}
