use serde_json::{json, Value};

use crate::{
    models::{
        client::Client,
        pagination::{Page, PageDefaults, PageRequest},
    },
    services::list_service::{extract_collection, ListCall, ListSource},
    Result,
};

pub struct ClientService;

impl ListSource for ClientService {
    type Item = Client;

    const RESOURCE: &'static str = "clients";
    const DEFAULTS: PageDefaults = PageDefaults::with_limit(10);
    const LIMIT_CHOICES: &'static [u32] = &[5, 10, 20, 50];

    fn call(request: PageRequest) -> ListCall {
        ListCall::Post {
            path: "/api/client/all",
            body: json!({ "page": request.page, "limit": request.limit }),
        }
    }

    fn extract(data: Value, _request: PageRequest) -> Result<Page<Client>> {
        extract_collection(data, "clients")
    }
}
