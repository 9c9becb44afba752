//! EventMart CLI
//!
//! Drives the admin, vendor and client portals from a terminal. Sessions are
//! kept in a local file so a login survives between invocations.

use clap::{Parser, Subcommand, ValueEnum};
use eventmart_api_client::ApiError;
use eventmart_core::{exit_codes, Role};
use eventmart_portal::PortalError;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{admin, auth, events};

/// EventMart portals from the command line
#[derive(Parser)]
#[command(name = "eventmart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Configuration file (defaults to ./eventmart.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Backend base URL, overrides the configuration file
    #[arg(long, global = true, env = "EVENTMART_API_URL")]
    api_url: Option<String>,

    /// Session file, overrides the configuration file
    #[arg(long, global = true, env = "EVENTMART_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccountKind {
    Vendor,
    Client,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VendorListArg {
    All,
    Pending,
    Rejected,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as admin, vendor or client
    Login {
        /// Portal to log in to
        #[arg(short, long)]
        role: Role,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "EVENTMART_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear a stored session
    Logout {
        #[arg(short, long)]
        role: Role,
    },

    /// Show which portals have a stored session
    Status,

    /// Register a vendor or client account
    Signup {
        /// vendor or client
        #[arg(short, long)]
        role: Role,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long, env = "EVENTMART_PASSWORD", hide_env_values = true)]
        password: String,

        /// Business address (vendors)
        #[arg(long)]
        address: Option<String>,

        /// One-time password; prompted for when omitted
        #[arg(long)]
        otp: Option<String>,
    },

    /// List vendors (admin)
    Vendors {
        #[arg(short, long, value_enum, default_value_t = VendorListArg::All)]
        list: VendorListArg,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// List clients (admin)
    Clients {
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Block a vendor or client account (admin)
    Block {
        #[arg(value_enum)]
        kind: AccountKind,
        id: String,
    },

    /// Unblock a vendor or client account (admin)
    Unblock {
        #[arg(value_enum)]
        kind: AccountKind,
        id: String,
    },

    /// Approve a pending vendor (admin)
    Approve { id: String },

    /// Reject a vendor with a reason (admin)
    Reject {
        id: String,

        #[arg(short, long)]
        reason: String,
    },

    /// List events: a vendor's own, or upcoming events for clients
    Events {
        #[arg(short, long, default_value = "client")]
        role: Role,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show one event (client)
    Event { id: String },

    /// Create an event (vendor)
    CreateEvent(events::NewEventArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        eventmart_telemetry::TelemetryConfig::verbose()
    } else {
        eventmart_telemetry::TelemetryConfig::default()
    };
    if let Err(e) = eventmart_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match &cli.command {
        Commands::Login { role, email, password } => auth::login(&cli, *role, email, password).await,
        Commands::Logout { role } => auth::logout(&cli, *role),
        Commands::Status => auth::status(&cli),
        Commands::Signup {
            role,
            name,
            email,
            phone,
            password,
            address,
            otp,
        } => {
            let details = auth::SignupDetails {
                name,
                email,
                phone,
                password,
                address: address.as_deref(),
            };
            auth::signup(&cli, *role, details, otp.as_deref()).await
        }
        Commands::Vendors { list, page } => admin::vendors(&cli, *list, *page).await,
        Commands::Clients { page } => admin::clients(&cli, *page).await,
        Commands::Block { kind, id } => admin::set_blocked(&cli, *kind, id, true).await,
        Commands::Unblock { kind, id } => admin::set_blocked(&cli, *kind, id, false).await,
        Commands::Approve { id } => admin::approve(&cli, id).await,
        Commands::Reject { id, reason } => admin::reject(&cli, id, reason).await,
        Commands::Events { role, page } => events::list(&cli, *role, *page).await,
        Commands::Event { id } => events::show(&cli, id).await,
        Commands::CreateEvent(args) => events::create(&cli, args).await,
    };

    tracing::debug!(stats = %eventmart_telemetry::stats().export_json(), "Request stats");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report(e, cli.format)),
    }
}

/// Print what the notifier has not already shown and pick the exit code
fn report(err: anyhow::Error, format: Format) -> u8 {
    let code = match err.downcast::<PortalError>() {
        Ok(PortalError::Api(ApiError::Config(message))) => {
            print_core(&eventmart_core::Error::invalid_config(message), format)
        }
        // Backend messages were already shown as notices
        Ok(PortalError::Api(_)) => exit_codes::BACKEND_ERROR,
        Ok(PortalError::Invalid(errors)) => {
            if format == Format::Json {
                eprintln!("{}", serde_json::json!({ "fieldErrors": errors }));
            } else {
                eprintln!("{}", "Please correct the following:".red().bold());
                for (field, message) in &errors {
                    eprintln!("  {} {}", format!("{field}:").bold(), message);
                }
            }
            exit_codes::VALIDATION_ERROR
        }
        Ok(other) => print_core(&other.into(), format),
        Err(err) => match err.downcast::<eventmart_core::Error>() {
            Ok(err) => print_core(&err, format),
            Err(err) => match err.downcast::<ApiError>() {
                Ok(ApiError::Config(message)) => {
                    print_core(&eventmart_core::Error::invalid_config(message), format)
                }
                Ok(other) => print_core(&PortalError::Api(other).into(), format),
                Err(err) => {
                    eprintln!("{} {:#}", "Error:".red().bold(), err);
                    exit_codes::FAILURE
                }
            },
        },
    };
    u8::try_from(code).unwrap_or(1)
}

fn print_core(err: &eventmart_core::Error, format: Format) -> i32 {
    if format == Format::Json {
        eprintln!("{}", serde_json::json!({ "error": err.to_report() }));
    } else {
        eprintln!("{} {}", "Error:".red().bold(), err);
    }
    err.exit_code()
}
