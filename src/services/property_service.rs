use serde_json::{json, Value};

use crate::{
    models::{
        pagination::{Page, PageDefaults, PageRequest},
        property::Property,
    },
    services::list_service::{extract_collection, ListCall, ListSource},
    Result,
};

/// Workspaces; the backend exposes them as properties.
pub struct PropertyService;

impl ListSource for PropertyService {
    type Item = Property;

    const RESOURCE: &'static str = "workspaces";
    const DEFAULTS: PageDefaults = PageDefaults::with_limit(10);
    const LIMIT_CHOICES: &'static [u32] = &[10, 20, 50];

    fn call(request: PageRequest) -> ListCall {
        // Pagination goes in the body for this endpoint, not the query.
        ListCall::Post {
            path: "/api/property/all",
            body: json!({ "page": request.page, "limit": request.limit }),
        }
    }

    fn extract(data: Value, _request: PageRequest) -> Result<Page<Property>> {
        extract_collection(data, "properties")
    }
}
