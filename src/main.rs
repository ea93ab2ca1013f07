use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::{
    config::ClientConfig,
    console::AddonChanges,
    helpers::pagination_helpers::{with_page, with_updated_param, LIMIT_PARAM},
    models::addon::AddonStatus,
    services::{
        auth_service::AuthService, campaign_service::CampaignService,
        client_service::ClientService, property_service::PropertyService,
        user_service::UserService,
    },
    transport::ApiClient,
};

pub use self::error::{Error, Result};

mod config;
mod console;
mod error;
mod helpers;
mod models;
mod services;
mod transport;
mod validators;
mod views;

#[cfg(test)]
mod test_support;

#[derive(Parser, Debug)]
#[command(
    name = "admin-console",
    version,
    about = "Terminal console for the admin dashboard backend"
)]
struct Cli {
    /// Backend base URL. Overrides ADMIN_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log in with these credentials before running the command.
    #[arg(long, env = "ADMIN_EMAIL", global = true)]
    email: Option<String>,

    #[arg(long, env = "ADMIN_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the credentials and exit.
    Login,
    Clients(ListArgs),
    Campaigns(ListArgs),
    Users(ListArgs),
    Workspaces(ListArgs),
    /// Edit an addon. `--query` carries its current values.
    AddonEdit(AddonEditArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Query string the view starts from, e.g. `page=2&limit=24`.
    #[arg(long, default_value = "")]
    query: String,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,

    /// Render the first page and exit instead of reading commands.
    #[arg(long)]
    once: bool,
}

impl ListArgs {
    fn start_query(&self) -> String {
        let mut query = self.query.clone();
        if let Some(limit) = self.limit {
            query = with_updated_param(&query, LIMIT_PARAM, &limit.to_string());
        }
        if let Some(page) = self.page {
            query = with_page(&query, page);
        }
        query
    }
}

#[derive(Args, Debug)]
struct AddonEditArgs {
    /// Current values: `id=..&title=..&description=..&value=..&status=..`.
    #[arg(long)]
    query: String,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    value: Option<String>,

    #[arg(long, value_enum)]
    status: Option<AddonStatus>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{} failed: {}", err.as_ref(), err);
            eprintln!("{}", err.view_message().unwrap_or_else(|| err.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_env(cli.api_url)?;
    tracing::info!("Using backend at: {}", config.api_url);

    let client = ApiClient::new(&config)?;
    let email = cli.email.unwrap_or_default();
    let password = cli.password.unwrap_or_default();

    if let Command::Login = cli.command {
        return console::run_login(&client, &email, &password).await;
    }

    if !email.is_empty() {
        AuthService::login(&client, &email, &password).await?;
        tracing::info!("Logged in as {}", email.trim());
    }

    match cli.command {
        Command::Login => Ok(()),
        Command::Clients(args) => {
            console::run_list::<ClientService>(client, args.start_query(), !args.once).await
        }
        Command::Campaigns(args) => {
            console::run_list::<CampaignService>(client, args.start_query(), !args.once).await
        }
        Command::Users(args) => {
            console::run_list::<UserService>(client, args.start_query(), !args.once).await
        }
        Command::Workspaces(args) => {
            console::run_list::<PropertyService>(client, args.start_query(), !args.once).await
        }
        Command::AddonEdit(args) => {
            let changes = AddonChanges {
                title: args.title,
                description: args.description,
                value: args.value,
                status: args.status,
            };
            console::run_addon_edit(&client, &args.query, changes).await
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "admin_console=info,warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}
