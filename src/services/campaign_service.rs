use serde_json::Value;

use crate::{
    models::{
        campaign::Campaign,
        pagination::{Page, PageDefaults, PageRequest},
    },
    services::list_service::{extract_collection, ListCall, ListSource},
    Result,
};

pub struct CampaignService;

impl ListSource for CampaignService {
    type Item = Campaign;

    const RESOURCE: &'static str = "campaigns";
    const DEFAULTS: PageDefaults = PageDefaults::with_limit(12);
    const LIMIT_CHOICES: &'static [u32] = &[12, 24, 36, 48];

    fn call(request: PageRequest) -> ListCall {
        ListCall::Get(format!(
            "/api/campaign/master-panel/fetch?page={}&limit={}",
            request.page, request.limit
        ))
    }

    fn extract(data: Value, _request: PageRequest) -> Result<Page<Campaign>> {
        extract_collection(data, "campaigns")
    }
}
