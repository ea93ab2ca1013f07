use serde_json::Value;

use crate::{
    models::{
        pagination::{Page, PageDefaults, PageRequest, Pagination},
        workspace_user::WorkspaceUsers,
    },
    services::list_service::{into_object, ListCall, ListSource},
    Result,
};

/// Users with roles, grouped by workspace.
pub struct UserService;

impl ListSource for UserService {
    type Item = WorkspaceUsers;

    const RESOURCE: &'static str = "users";
    const DEFAULTS: PageDefaults = PageDefaults::with_limit(12);
    const LIMIT_CHOICES: &'static [u32] = &[12, 24, 36, 48];

    fn call(request: PageRequest) -> ListCall {
        ListCall::Get(format!(
            "/api/master-admin/users-with-roles/fetch?page={}&limit={}",
            request.page, request.limit
        ))
    }

    /// This endpoint reports only `workspaceCount`, so pagination is derived here.
    /// A missing list counts as empty and a missing count falls back to the list length.
    fn extract(data: Value, request: PageRequest) -> Result<Page<WorkspaceUsers>> {
        let mut data = into_object(data)?;

        let items: Vec<WorkspaceUsers> = match data.remove("workspaces") {
            Some(Value::Null) | None => Vec::new(),
            Some(workspaces) => serde_json::from_value(workspaces)?,
        };
        let total = data
            .get("workspaceCount")
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);

        Ok(Page {
            pagination: Pagination::from_count(total, request),
            items,
        })
    }
}
