use crate::{
    helpers::pagination_helpers::PageLinks,
    models::{
        campaign::Campaign, client::Client, pagination::Pagination, property::Property,
        workspace_user::WorkspaceUsers,
    },
    services::{
        campaign_service::CampaignService, client_service::ClientService,
        list_service::ListSource, property_service::PropertyService, user_service::UserService,
    },
    views::list_view::{ListView, ViewState},
};

const MAX_CELL_WIDTH: usize = 36;
const SKELETON_ROWS: usize = 3;

/// Terminal presentation of a list resource.
pub trait TableView: ListSource {
    const TITLE: &'static str;
    const HEADERS: &'static [&'static str];
    const EMPTY_TITLE: &'static str;
    /// Call to action shown instead of a table when there is nothing to list.
    const EMPTY_HINT: &'static str;

    fn cells(item: &Self::Item) -> Vec<String>;

    fn summary(_items: &[Self::Item], _pagination: &Pagination) -> Option<String> {
        None
    }
}

impl TableView for ClientService {
    const TITLE: &'static str = "CLIENTS_OVERVIEW";
    const HEADERS: &'static [&'static str] = &["NAME", "EMAIL", "MOBILE", "STATUS", "LOCATION"];
    const EMPTY_TITLE: &'static str = "NO_CLIENTS_FOUND";
    const EMPTY_HINT: &'static str = "CREATE_YOUR_FIRST_CLIENT_TO_GET_STARTED";

    fn cells(client: &Client) -> Vec<String> {
        vec![
            client.name.clone(),
            client.email.clone(),
            client.mobile_number.clone(),
            client.status.to_uppercase(),
            client.location_label().unwrap_or_else(|| "-".to_string()),
        ]
    }

    fn summary(_items: &[Client], pagination: &Pagination) -> Option<String> {
        Some(format!("TOTAL_CLIENTS: {}", pagination.total_items))
    }
}

impl TableView for CampaignService {
    const TITLE: &'static str = "COMMUNICATION_TEMPLATES";
    const HEADERS: &'static [&'static str] = &["TYPE", "TITLE", "MESSAGE", "ACTIVE", "CREATED"];
    const EMPTY_TITLE: &'static str = "NO_TEMPLATES_FOUND";
    const EMPTY_HINT: &'static str = "CREATE_YOUR_FIRST_COMMUNICATION_TEMPLATE";

    fn cells(campaign: &Campaign) -> Vec<String> {
        vec![
            campaign.kind.to_uppercase(),
            campaign.title.clone(),
            campaign.message.clone(),
            if campaign.is_active() { "ACTIVE" } else { "INACTIVE" }.to_string(),
            campaign
                .created_at
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableView for PropertyService {
    const TITLE: &'static str = "WORKSPACES";
    const HEADERS: &'static [&'static str] = &["NAME", "DESCRIPTION", "USAGE", "STATUS"];
    const EMPTY_TITLE: &'static str = "NO_WORKSPACES_FOUND";
    const EMPTY_HINT: &'static str = "CREATE_A_WORKSPACE_TO_GET_STARTED";

    fn cells(property: &Property) -> Vec<String> {
        vec![
            property.name.clone(),
            property.description.clone(),
            format!(
                "{}/{} ({}%)",
                property.usage_count,
                property.usage_limits,
                property.usage_percent()
            ),
            property.status.to_uppercase(),
        ]
    }
}

impl TableView for UserService {
    const TITLE: &'static str = "USER_MANAGEMENT";
    const HEADERS: &'static [&'static str] = &["WORKSPACE", "USERS", "ADMINS", "MEMBERS"];
    const EMPTY_TITLE: &'static str = "NO_WORKSPACES_FOUND";
    const EMPTY_HINT: &'static str = "NO_WORKSPACES_WITH_USERS_AVAILABLE";

    fn cells(workspace: &WorkspaceUsers) -> Vec<String> {
        let members: Vec<String> = workspace
            .users
            .iter()
            .map(|user| format!("{} ({})", user.name, user.role.to_lowercase()))
            .collect();

        vec![
            workspace.property_name.clone(),
            workspace.total_users.to_string(),
            workspace.admin_count().to_string(),
            members.join(", "),
        ]
    }

    fn summary(items: &[WorkspaceUsers], pagination: &Pagination) -> Option<String> {
        let users: u64 = items.iter().map(|ws| ws.total_users).sum();
        let admins: usize = items.iter().map(WorkspaceUsers::admin_count).sum();
        Some(format!(
            "WORKSPACES: {} · TOTAL_USERS: {} · ADMIN_USERS: {}",
            pagination.total_items, users, admins
        ))
    }
}

pub fn render<S: TableView>(view: &ListView<S>) -> String {
    let mut out = vec![S::TITLE.to_string()];

    match view.state() {
        ViewState::Loading => {
            let headers: Vec<String> = S::HEADERS.iter().map(|h| h.to_string()).collect();
            let widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(8)).collect();
            out.push(render_row(&headers, &widths));
            for _ in 0..SKELETON_ROWS {
                let cells: Vec<String> = widths.iter().map(|w| "░".repeat(*w)).collect();
                out.push(render_row(&cells, &widths));
            }
        }
        ViewState::Error(message) => {
            out.push("DATA_FETCH_ERROR".to_string());
            out.push(format!("  {message}"));
            out.push("  r: RETRY_CONNECTION".to_string());
        }
        ViewState::Empty => {
            out.push(S::EMPTY_TITLE.to_string());
            out.push(format!("  {}", S::EMPTY_HINT));
        }
        ViewState::Success { items, pagination } => {
            if let Some(summary) = S::summary(items, pagination) {
                out.push(summary);
            }
            let rows: Vec<Vec<String>> = items.iter().map(|item| S::cells(item)).collect();
            out.extend(render_table(S::HEADERS, &rows));
            if let Some(links) = view.page_links() {
                out.push(render_links(&links));
            }
            out.push(format!(
                "page {}/{} · {} items · {} / PAGE",
                pagination.current_page,
                pagination.total_pages,
                pagination.total_items,
                pagination.limit
            ));
        }
    }

    out.join("\n")
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut short: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    short.push('…');
    short
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![render_row(&headers, &widths)];
    lines.push(render_row(
        &widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>(),
        &widths,
    ));
    lines.extend(rows.iter().map(|row| render_row(row, &widths)));
    lines
}

pub fn render_links(links: &PageLinks) -> String {
    let mut parts = vec![if links.prev.is_some() { "« prev" } else { "« ----" }.to_string()];

    if let Some(first) = links.first {
        parts.push(first.to_string());
    }
    if links.leading_gap {
        parts.push("…".to_string());
    }
    for page in &links.window {
        if *page == links.current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if links.trailing_gap {
        parts.push("…".to_string());
    }
    if let Some(last) = links.last {
        parts.push(last.to_string());
    }

    parts.push(if links.next.is_some() { "next »" } else { "---- »" }.to_string());
    parts.join(" ")
}
