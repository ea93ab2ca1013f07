use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};

use crate::{
    helpers::pagination_helpers::query_value,
    models::addon::{AddonEditForm, AddonStatus},
    services::{addon_service::AddonService, auth_service::AuthService},
    transport::ApiClient,
    views::{
        list_view::{run_fetch, Applied, ListView, ViewState},
        render::{render, TableView},
    },
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Goto(u32),
    Limit(u32),
    Refresh,
    Help,
    Quit,
}

/// Parses one line typed at the list prompt. A bare number jumps to that page.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();
    let arg = words.next().and_then(|word| word.parse::<u32>().ok());

    match (head.as_str(), arg) {
        ("n" | "next", None) => Some(Command::Next),
        ("p" | "prev", None) => Some(Command::Prev),
        ("g" | "goto", Some(page)) if page > 0 => Some(Command::Goto(page)),
        ("l" | "limit", Some(limit)) => Some(Command::Limit(limit)),
        ("r" | "refresh" | "retry", None) => Some(Command::Refresh),
        ("h" | "help" | "?", None) => Some(Command::Help),
        ("q" | "quit" | "exit", None) => Some(Command::Quit),
        (page, None) => page
            .parse::<u32>()
            .ok()
            .filter(|page| *page > 0)
            .map(Command::Goto),
        _ => None,
    }
}

fn help_line<S: TableView>() -> String {
    let choices: Vec<String> = S::LIMIT_CHOICES.iter().map(u32::to_string).collect();
    format!(
        "n: next · p: prev · g <page> · l <limit> ({}) · r: refresh · q: quit",
        choices.join("/")
    )
}

/// Shows one list view. With `interactive`, reads navigation commands from stdin
/// while fetches are in flight; otherwise renders the first settled state and returns.
pub async fn run_list<S: TableView>(
    client: ApiClient,
    query: String,
    interactive: bool,
) -> Result<()> {
    let mut view = ListView::<S>::new(query);
    let mut in_flight = JoinSet::new();

    let ticket = view.refresh();
    in_flight.spawn(run_fetch::<S>(client.clone(), view.request(), ticket));
    println!("{}", render(&view));

    if !interactive {
        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok((token, outcome)) => {
                    if view.apply(token, outcome) == Applied::Updated {
                        break;
                    }
                }
                Err(err) => tracing::error!("fetch task failed: {}", err),
            }
        }
        println!("\n{}", render(&view));
        return Ok(());
    }

    println!("{}", help_line::<S>());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(joined) = in_flight.join_next() => {
                match joined {
                    Ok((token, outcome)) => {
                        if view.apply(token, outcome) == Applied::Updated {
                            println!("\n{}", render(&view));
                        }
                    }
                    Err(err) => tracing::error!("fetch task failed: {}", err),
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                let ticket = match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Help) => {
                        println!("{}", help_line::<S>());
                        continue;
                    }
                    Some(Command::Refresh) => view.refresh(),
                    Some(Command::Limit(limit)) => view.change_limit(limit),
                    Some(Command::Goto(page)) => {
                        let page = match view.state() {
                            ViewState::Success { pagination, .. } => {
                                page.min(pagination.total_pages)
                            }
                            _ => page,
                        };
                        view.goto_page(page)
                    }
                    Some(Command::Next) => match view.page_links().and_then(|links| links.next) {
                        Some(page) => view.goto_page(page),
                        None => {
                            println!("NO_NEXT_PAGE");
                            continue;
                        }
                    },
                    Some(Command::Prev) => match view.page_links().and_then(|links| links.prev) {
                        Some(page) => view.goto_page(page),
                        None => {
                            println!("NO_PREVIOUS_PAGE");
                            continue;
                        }
                    },
                    None => {
                        println!("UNKNOWN_COMMAND: {}", line.trim());
                        continue;
                    }
                };

                in_flight.spawn(run_fetch::<S>(client.clone(), view.request(), ticket));
                println!("\n{}", render(&view));
            }
        }
    }

    view.teardown();
    in_flight.shutdown().await;
    Ok(())
}

pub async fn run_login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    let message = AuthService::login(client, email, password).await?;
    println!("{}", message.unwrap_or_else(|| "LOGIN_SUCCESS".to_string()));
    Ok(())
}

/// Edits requested on top of the values the form was opened with.
#[derive(Debug, Clone, Default)]
pub struct AddonChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub value: Option<String>,
    pub status: Option<AddonStatus>,
}

/// The edit form is opened from a query string carrying the addon's current values.
pub fn addon_form_from_query(query: &str) -> AddonEditForm {
    AddonEditForm {
        id: query_value(query, "id").unwrap_or_default(),
        title: query_value(query, "title").unwrap_or_default(),
        description: query_value(query, "description").unwrap_or_default(),
        value: query_value(query, "value").unwrap_or_default(),
        status: query_value(query, "status")
            .filter(|status| !status.trim().is_empty())
            .unwrap_or_else(|| AddonStatus::default().as_ref().to_string()),
    }
}

pub fn apply_changes(initial: &AddonEditForm, changes: AddonChanges) -> AddonEditForm {
    AddonEditForm {
        id: initial.id.clone(),
        title: changes.title.unwrap_or_else(|| initial.title.clone()),
        description: changes
            .description
            .unwrap_or_else(|| initial.description.clone()),
        value: changes.value.unwrap_or_else(|| initial.value.clone()),
        status: changes
            .status
            .map(|status| status.as_ref().to_string())
            .unwrap_or_else(|| initial.status.clone()),
    }
}

pub async fn run_addon_edit(client: &ApiClient, query: &str, changes: AddonChanges) -> Result<()> {
    let initial = addon_form_from_query(query);
    let edited = apply_changes(&initial, changes);

    let shown_id = if initial.id.is_empty() {
        "NO_ID_PROVIDED"
    } else {
        initial.id.as_str()
    };
    println!("EDIT_ADDON {shown_id}");
    let message = AddonService::update(client, &initial, &edited).await?;
    println!("{}", message.unwrap_or_else(|| "SAVED".to_string()));
    Ok(())
}
