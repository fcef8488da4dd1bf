//! `homestay` - command-line front end over the application context.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use homestay_app::{AppConfig, AppContext};
use homestay_auth::{FileStore, SessionFlags};
use homestay_client::PageRequest;
use homestay_client::dto::{LoginRequest, UpdateProfileRequest};
use homestay_observability::LogFormat;
use homestay_router::ROUTES;

#[derive(Parser)]
#[command(name = "homestay")]
#[command(about = "Session and navigation client for the homestay marketplace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides HOMESTAY_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the saved session (overrides HOMESTAY_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogArg::Json)]
    log_format: LogArg,
}

#[derive(Copy, Clone, ValueEnum)]
enum LogArg {
    Json,
    Compact,
}

impl From<LogArg> for LogFormat {
    fn from(value: LogArg) -> Self {
        match value {
            LogArg::Json => LogFormat::Json,
            LogArg::Compact => LogFormat::Compact,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (read from HOMESTAY_PASSWORD when omitted)
        #[arg(short, long, env = "HOMESTAY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show the saved session without contacting the backend
    Whoami,

    /// Fetch the profile, or update it when any field is given
    Profile {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        avatar: Option<String>,
    },

    /// List the signed-in user's bookings
    Orders {
        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = PageRequest::DEFAULT_SIZE)]
        size: u32,
    },

    /// Show where navigating to a path would land with the saved session
    Navigate {
        /// Path such as /my-orders or /properties/12
        path: String,
    },

    /// List the route table
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    homestay_observability::init_with(cli.log_format.into());

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let store = FileStore::in_dir(&config.data_dir)
        .with_context(|| format!("failed to prepare data directory {}", config.data_dir.display()))?;
    let mut ctx = AppContext::new(store, &config.client_config()).context("failed to build HTTP client")?;
    ctx.start();

    match cli.command {
        Commands::Login { username, password } => {
            let profile = ctx
                .login(&LoginRequest::new(username, password))
                .await
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
            print_json(&profile)?;
        }
        Commands::Logout => {
            ctx.logout()?;
            println!("signed out");
        }
        Commands::Whoami => {
            let session = ctx.session();
            let expires_at = session.token_claims().and_then(|claims| claims.exp);
            print_json(&serde_json::json!({
                "authenticated": session.is_authenticated(),
                "landlord": session.is_landlord(),
                "admin": session.is_admin(),
                "user": session.user(),
                "expiresAt": expires_at,
            }))?;
        }
        Commands::Profile { email, phone, avatar } => {
            let request = UpdateProfileRequest {
                email,
                phone,
                avatar,
                password: None,
            };
            let result = if request == UpdateProfileRequest::default() {
                ctx.refresh_profile().await
            } else {
                ctx.update_profile(&request).await
            };
            let profile = result.map_err(|err| anyhow::anyhow!(err.user_message()))?;
            print_json(&profile)?;
        }
        Commands::Orders { page, size } => {
            let page = PageRequest::new(page, size);
            let orders = ctx
                .call(|api| async move { api.orders().mine(page).await })
                .await
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
            let rows: Vec<_> = orders
                .content
                .iter()
                .map(|order| {
                    serde_json::json!({
                        "id": order.id,
                        "orderNumber": order.order_number,
                        "propertyId": order.property_id,
                        "checkIn": order.check_in_date,
                        "checkOut": order.check_out_date,
                        "guests": order.guest_count,
                        "status": order.status,
                        "total": order.total_price,
                    })
                })
                .collect();
            print_json(&serde_json::json!({"total": orders.total_elements, "orders": rows}))?;
        }
        Commands::Navigate { path } => {
            let outcome = ctx.navigate(&path)?;
            print_json(&outcome)?;
        }
        Commands::Routes => {
            for route in ROUTES.iter() {
                let mut needs = Vec::new();
                if route.requires_auth {
                    needs.push("auth");
                }
                if route.requires_landlord {
                    needs.push("landlord");
                }
                if route.requires_admin {
                    needs.push("admin");
                }
                println!("{:<16} {:<24} {}", route.name.as_str(), route.path, needs.join(","));
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{text}");
    Ok(())
}
