use serde::Serialize;

/// Statuses the console offers when editing. The backend may know others, so forms
/// carry the status as the raw string they were opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::AsRefStr, clap::ValueEnum)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AddonStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Draft,
}

/// Raw edit-form input; `value` is kept as typed so it can be validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddonEditForm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub value: String,
    pub status: String,
}

/// Validated body of `PATCH /api/addons/edit`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddonEdit {
    #[serde(rename = "addOnId")]
    pub add_on_id: String,
    pub title: String,
    pub description: String,
    pub value: f64,
    pub status: String,
}
