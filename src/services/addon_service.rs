use serde_json::Value;

use crate::{
    models::addon::AddonEditForm,
    transport::{ApiClient, RequestOptions},
    validators::addon_validator::AddonValidator,
    Result,
};

pub struct AddonService;

impl AddonService {
    /// Validates the edit locally and, if it passes, sends it.
    /// Returns the server's message when it sent one.
    pub async fn update(
        client: &ApiClient,
        initial: &AddonEditForm,
        edited: &AddonEditForm,
    ) -> Result<Option<String>> {
        let edit = AddonValidator::validate(initial, edited)?;

        tracing::info!("updating addon {}", edit.add_on_id);
        let response = client
            .patch("/api/addons/edit", &edit, RequestOptions::default())
            .await?;

        Ok(response_message(&response))
    }
}

pub(crate) fn response_message(response: &Value) -> Option<String> {
    response
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
