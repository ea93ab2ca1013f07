use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    models::{
        envelope::Envelope,
        pagination::{Page, PageDefaults, PageRequest, Pagination},
    },
    transport::{ApiClient, RequestOptions},
    Error, Result,
};

/// How a list endpoint is called.
#[derive(Debug, Clone, PartialEq)]
pub enum ListCall {
    /// `GET` with page/limit in the query string.
    Get(String),
    /// `POST` with `{page, limit}` in the body.
    Post { path: &'static str, body: Value },
}

/// A paginated backend collection.
pub trait ListSource: Send + Sync + 'static {
    type Item: DeserializeOwned + Send + 'static;

    /// Short name used in logs and headings.
    const RESOURCE: &'static str;
    const DEFAULTS: PageDefaults;
    /// Page sizes offered by the view.
    const LIMIT_CHOICES: &'static [u32];

    fn call(request: PageRequest) -> ListCall;

    /// Lifts the validated `data` object into a typed page.
    fn extract(data: Value, request: PageRequest) -> Result<Page<Self::Item>>;
}

pub async fn fetch_page<S: ListSource>(
    client: &ApiClient,
    request: PageRequest,
    options: RequestOptions,
) -> Result<Page<S::Item>> {
    tracing::debug!(
        "fetching {} page={} limit={}",
        S::RESOURCE,
        request.page,
        request.limit
    );

    let body = match S::call(request) {
        ListCall::Get(path) => client.get(&path, options).await?,
        ListCall::Post { path, body } => client.post(path, &body, options).await?,
    };

    let data = Envelope::validate(body).into_data()?;
    S::extract(data, request)
}

pub fn into_object(data: Value) -> Result<Map<String, Value>> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(Error::ShapeError(format!(
            "expected `data` object, got {other}"
        ))),
    }
}

/// Extracts the common `{ <key>: [...], pagination: {...} }` shape.
pub fn extract_collection<T: DeserializeOwned>(data: Value, key: &str) -> Result<Page<T>> {
    let mut data = into_object(data)?;

    let items = data
        .remove(key)
        .ok_or_else(|| Error::ShapeError(format!("missing `{key}`")))?;
    let pagination = data
        .remove("pagination")
        .ok_or_else(|| Error::ShapeError("missing `pagination`".to_string()))?;

    Ok(Page {
        items: serde_json::from_value(items)?,
        pagination: serde_json::from_value::<Pagination>(pagination)?,
    })
}
