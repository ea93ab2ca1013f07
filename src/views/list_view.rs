use std::marker::PhantomData;

use crate::{
    helpers::pagination_helpers::{
        page_links, parse_page_request, with_limit, with_page, PageLinks,
    },
    models::pagination::{Page, PageRequest, Pagination},
    services::{
        fetch_guard::{FetchGuard, FetchTicket, RequestToken},
        list_service::{fetch_page, ListSource},
    },
    transport::ApiClient,
    Result,
};

/// What a list view currently shows. Replaced wholesale on every transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Success {
        items: Vec<T>,
        pagination: Pagination,
    },
    Empty,
    Error(String),
}

#[cfg(test)]
impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Result of offering a fetch outcome to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// A newer fetch has started since; the outcome was dropped.
    Stale,
    /// The fetch was cancelled; nothing is shown for it.
    Suppressed,
}

/// A paginated list bound to one query string. Every navigation goes back through
/// `Loading` and a fresh fetch; only the newest fetch's outcome is ever applied.
pub struct ListView<S: ListSource> {
    guard: FetchGuard,
    query: String,
    request: PageRequest,
    state: ViewState<S::Item>,
    source: PhantomData<S>,
}

impl<S: ListSource> ListView<S> {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let request = parse_page_request(&query, S::DEFAULTS);

        Self {
            guard: FetchGuard::new(),
            query,
            request,
            state: ViewState::Loading,
            source: PhantomData,
        }
    }

    pub fn state(&self) -> &ViewState<S::Item> {
        &self.state
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Enters `Loading` and starts a fetch for the current request.
    pub fn refresh(&mut self) -> FetchTicket {
        self.state = ViewState::Loading;
        let ticket = self.guard.begin_fetch();

        tracing::debug!(
            "{} fetch {} page={} limit={}",
            S::RESOURCE,
            ticket.token,
            self.request.page,
            self.request.limit
        );
        ticket
    }

    pub fn navigate(&mut self, query: impl Into<String>) -> FetchTicket {
        self.query = query.into();
        self.request = parse_page_request(&self.query, S::DEFAULTS);
        self.refresh()
    }

    pub fn goto_page(&mut self, page: u32) -> FetchTicket {
        let query = with_page(&self.query, page);
        self.navigate(query)
    }

    pub fn change_limit(&mut self, limit: u32) -> FetchTicket {
        let query = with_limit(&self.query, limit);
        self.navigate(query)
    }

    /// Pagination bar for the shown page; `None` unless there is more than one page.
    pub fn page_links(&self) -> Option<PageLinks> {
        match &self.state {
            ViewState::Success { pagination, .. } if pagination.total_pages > 1 => Some(
                page_links(pagination.current_page, pagination.total_pages),
            ),
            _ => None,
        }
    }

    pub fn apply(&mut self, token: RequestToken, outcome: Result<Page<S::Item>>) -> Applied {
        if matches!(&outcome, Err(err) if err.is_aborted()) {
            tracing::debug!("{} fetch {} aborted", S::RESOURCE, token);
            return Applied::Suppressed;
        }

        if !self.guard.complete(token) {
            tracing::debug!("{} fetch {} is stale, dropping", S::RESOURCE, token);
            return Applied::Stale;
        }

        self.state = match outcome {
            Ok(page) if page.items.is_empty() => ViewState::Empty,
            Ok(page) => ViewState::Success {
                items: page.items,
                pagination: page.pagination,
            },
            Err(err) => {
                tracing::warn!("{} fetch {} failed: {}", S::RESOURCE, token, err);
                ViewState::Error(err.view_message().unwrap_or_else(|| err.to_string()))
            }
        };
        Applied::Updated
    }

    /// Cancels the in-flight fetch; called when the view goes away.
    pub fn teardown(&mut self) {
        self.guard.teardown();
    }
}

/// Runs one fetch for `ticket`, tagging the outcome with its token.
pub async fn run_fetch<S: ListSource>(
    client: ApiClient,
    request: PageRequest,
    ticket: FetchTicket,
) -> (RequestToken, Result<Page<S::Item>>) {
    let outcome = fetch_page::<S>(&client, request, ticket.options()).await;
    (ticket.token, outcome)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{extract::Query, routing::get, Json, Router};
    use serde::Deserialize;
    use serde_json::json;
    use tokio::task::JoinSet;

    use super::*;
    use crate::{
        models::{campaign::Campaign, pagination::PageRequest},
        services::campaign_service::CampaignService,
        test_support::{client_for, spawn_backend},
        transport::RequestOptions,
        Error,
    };

    type CampaignsView = ListView<CampaignService>;

    fn campaign(id: &str) -> Campaign {
        Campaign {
            id: id.to_string(),
            kind: "SMS".to_string(),
            title: format!("Campaign {id}"),
            message: "Hello".to_string(),
            attachments: Vec::new(),
            property_id: "p1".to_string(),
            meta: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn page_of(ids: &[&str], current_page: u32, total_pages: u32) -> Page<Campaign> {
        Page {
            items: ids.iter().map(|id| campaign(id)).collect(),
            pagination: Pagination {
                total_items: u64::from(total_pages) * 12,
                total_pages,
                current_page,
                limit: 12,
                has_next_page: current_page < total_pages,
                has_prev_page: current_page > 1,
            },
        }
    }

    #[test]
    fn test_initial_state() {
        let view = CampaignsView::new("page=2&limit=500");
        assert!(view.state().is_loading());
        assert_eq!(view.request(), PageRequest { page: 2, limit: 12 });
    }

    #[test]
    fn test_last_writer_by_token_wins() {
        let mut view = CampaignsView::new("");

        let a = view.goto_page(1);
        let b = view.goto_page(2);

        // A resolves first but B was started after it.
        assert_eq!(view.apply(a.token, Ok(page_of(&["a"], 1, 3))), Applied::Stale);
        assert!(view.state().is_loading());

        assert_eq!(view.apply(b.token, Ok(page_of(&["b"], 2, 3))), Applied::Updated);
        match view.state() {
            ViewState::Success { items, pagination } => {
                assert_eq!(items[0].id, "b");
                assert_eq!(pagination.current_page, 2);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_late_lower_token_cannot_overwrite() {
        let mut view = CampaignsView::new("");

        let a = view.refresh();
        let b = view.refresh();
        assert_eq!(view.apply(b.token, Ok(page_of(&["b"], 1, 1))), Applied::Updated);
        assert_eq!(
            view.apply(a.token, Err(Error::NetworkFailure("late".to_string()))),
            Applied::Stale
        );
        assert!(matches!(view.state(), ViewState::Success { .. }));
    }

    #[test]
    fn test_error_envelope_enters_error_state() {
        let mut view = CampaignsView::new("");
        let ticket = view.refresh();

        let outcome = crate::models::envelope::Envelope::validate(json!({ "status": "ERROR" }))
            .into_data()
            .and_then(|data| CampaignService::extract(data, view.request()));

        assert_eq!(view.apply(ticket.token, outcome), Applied::Updated);
        match view.state() {
            ViewState::Error(message) => assert!(!message.is_empty()),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_empty_collection_enters_empty_state() {
        let mut view = CampaignsView::new("");
        let ticket = view.refresh();

        assert_eq!(view.apply(ticket.token, Ok(page_of(&[], 1, 1))), Applied::Updated);
        assert_eq!(view.state(), &ViewState::Empty);
    }

    #[test]
    fn test_aborted_fetch_is_suppressed() {
        let mut view = CampaignsView::new("");
        let ticket = view.refresh();

        assert_eq!(view.apply(ticket.token, Err(Error::Aborted)), Applied::Suppressed);
        assert!(view.state().is_loading());
    }

    #[test]
    fn test_every_state_returns_to_loading() {
        let mut view = CampaignsView::new("");

        let ticket = view.refresh();
        view.apply(ticket.token, Err(Error::ShapeError("bad".to_string())));
        assert!(matches!(view.state(), ViewState::Error(_)));

        let ticket = view.refresh();
        assert!(view.state().is_loading());
        view.apply(ticket.token, Ok(page_of(&[], 1, 1)));
        assert_eq!(view.state(), &ViewState::Empty);

        let ticket = view.change_limit(24);
        assert!(view.state().is_loading());
        assert_eq!(view.request(), PageRequest { page: 1, limit: 24 });
        view.apply(ticket.token, Ok(page_of(&["x"], 1, 1)));
        assert!(matches!(view.state(), ViewState::Success { .. }));

        view.goto_page(3);
        assert!(view.state().is_loading());
        assert_eq!(view.query(), "limit=24&page=3");
    }

    #[test]
    fn test_page_links_only_for_multiple_pages() {
        let mut view = CampaignsView::new("");

        let ticket = view.refresh();
        view.apply(ticket.token, Ok(page_of(&["a"], 1, 1)));
        assert_eq!(view.page_links(), None);

        let ticket = view.refresh();
        view.apply(ticket.token, Ok(page_of(&["a"], 4, 10)));
        let links = view.page_links().unwrap();
        assert_eq!(links.window, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_new_fetch_cancels_previous_ticket() {
        let mut view = CampaignsView::new("");
        let a = view.refresh();
        let b = view.goto_page(2);
        assert!(a.cancel.is_cancelled());

        view.teardown();
        assert!(b.cancel.is_cancelled());
    }

    #[derive(Deserialize)]
    struct PageQuery {
        page: u32,
    }

    /// Page 1 answers slowly, every other page immediately.
    fn campaigns_backend() -> Router {
        Router::new().route(
            "/api/campaign/master-panel/fetch",
            get(|Query(query): Query<PageQuery>| async move {
                if query.page == 1 {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                }
                Json(json!({
                    "status": "SUCCESS",
                    "message": "ok",
                    "data": {
                        "campaigns": [{
                            "_id": format!("page-{}", query.page),
                            "type": "EMAIL",
                            "title": "t",
                            "message": "m",
                            "attachments": [],
                            "property_id": "p1"
                        }],
                        "pagination": {
                            "totalItems": 36,
                            "totalPages": 3,
                            "currentPage": query.page,
                            "limit": 12,
                            "hasNextPage": query.page < 3,
                            "hasPrevPage": query.page > 1
                        }
                    }
                }))
            }),
        )
    }

    fn shown_id(view: &CampaignsView) -> Option<String> {
        match view.state() {
            ViewState::Success { items, .. } => Some(items[0].id.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_cancelled_over_network() {
        let client = client_for(&spawn_backend(campaigns_backend()).await);
        let mut view = CampaignsView::new("page=1");
        let mut in_flight = JoinSet::new();

        let slow = view.refresh();
        in_flight.spawn(run_fetch::<CampaignService>(client.clone(), view.request(), slow));
        let fast = view.goto_page(2);
        in_flight.spawn(run_fetch::<CampaignService>(client.clone(), view.request(), fast));

        let mut applied = Vec::new();
        while let Some(joined) = in_flight.join_next().await {
            let (token, outcome) = joined.unwrap();
            applied.push(view.apply(token, outcome));
        }

        assert!(applied.contains(&Applied::Suppressed));
        assert!(applied.contains(&Applied::Updated));
        assert_eq!(shown_id(&view).as_deref(), Some("page-2"));
    }

    #[tokio::test]
    async fn test_stale_network_response_is_discarded() {
        let client = client_for(&spawn_backend(campaigns_backend()).await);
        let mut view = CampaignsView::new("page=2");

        // Fast request first, slow request second: the fast one lands first but is stale.
        let first = view.refresh();
        let first_request = view.request();
        let second = view.goto_page(1);

        let (first_outcome, second_outcome) = tokio::join!(
            fetch_page::<CampaignService>(&client, first_request, RequestOptions::default()),
            fetch_page::<CampaignService>(&client, view.request(), second.options()),
        );

        assert_eq!(view.apply(first.token, first_outcome), Applied::Stale);
        assert_eq!(view.apply(second.token, second_outcome), Applied::Updated);
        assert_eq!(shown_id(&view).as_deref(), Some("page-1"));
    }

    #[tokio::test]
    async fn test_http_error_enters_error_state() {
        let router = Router::new().route(
            "/api/campaign/master-panel/fetch",
            get(|| async {
                (
                    axum::http::StatusCode::FORBIDDEN,
                    Json(json!({ "message": "Not allowed" })),
                )
            }),
        );
        let client = client_for(&spawn_backend(router).await);
        let mut view = CampaignsView::new("");

        let ticket = view.refresh();
        let (token, outcome) = run_fetch::<CampaignService>(client, view.request(), ticket).await;
        view.apply(token, outcome);

        assert_eq!(view.state(), &ViewState::Error("Not allowed".to_string()));
    }

    #[tokio::test]
    async fn test_last_page_disables_next() {
        let client = client_for(&spawn_backend(campaigns_backend()).await);
        let mut view = CampaignsView::new("page=3");

        let ticket = view.refresh();
        let (token, outcome) = run_fetch::<CampaignService>(client, view.request(), ticket).await;
        assert_eq!(view.apply(token, outcome), Applied::Updated);

        let links = view.page_links().unwrap();
        assert_eq!(links.next, None);
        assert_eq!(links.prev, Some(2));
    }
}
