//! site-settings
//!
//! Resolves the container environment into site settings and prints them
//! for the application entrypoint.
//!
//! ```text
//!   DOMAIN, ADDITIONAL_TRUSTED_HOSTS ──┐
//!   DB_NAME, DB_USER, DB_PASSWORD,     │    ┌──────────┐   ┌────────────┐
//!   DB_HOST, DB_PORT                   ├───▶│ resolver │──▶│ validation │──▶ stdout (JSON/TOML)
//!   TRUSTED_PROXY_CIDR                 │    └──────────┘   └────────────┘
//!   /run/secrets/<name>_password ──────┘
//! ```

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use site_settings::config::{load_from_env, LoadOptions};
use site_settings::observability::{init_logging, LogFormat};
use site_settings::security::{TrustedHostMatcher, TrustedProxies};

#[derive(Parser)]
#[command(name = "site-settings", version)]
#[command(about = "Resolve CMS site settings from the container environment", long_about = None)]
struct Cli {
    /// Directory holding Docker secrets.
    #[arg(long, env = "SECRETS_DIR")]
    secrets_dir: Option<PathBuf>,

    /// Name of the database password secret (defaults to DB_NAME).
    #[arg(long, env = "DB_SECRET_NAME")]
    secret_name: Option<String>,

    /// Log output format (text or json).
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings (default)
    Resolve {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Resolve and validate without printing
    Check,
    /// Exit non-zero unless HOST is a trusted host
    CheckHost { host: String },
    /// Exit non-zero unless PEER is a trusted proxy address
    CheckPeer { peer: IpAddr },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Toml,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let options = LoadOptions {
        secrets_dir: cli.secrets_dir,
        secret_name: cli.secret_name,
    };
    let config = load_from_env(&options)?;

    match cli.command.unwrap_or(Commands::Resolve {
        format: OutputFormat::Json,
    }) {
        Commands::Resolve { format } => {
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&config)?,
                OutputFormat::Toml => toml::to_string_pretty(&config)?,
            };
            println!("{rendered}");
        }
        Commands::Check => {
            tracing::info!("Settings are valid");
        }
        Commands::CheckHost { host } => {
            let matcher = TrustedHostMatcher::from_config(&config)?;
            if !matcher.is_allowed(&host) {
                tracing::warn!(%host, "Host is not trusted");
                std::process::exit(1);
            }
            tracing::info!(%host, "Host is trusted");
        }
        Commands::CheckPeer { peer } => {
            let proxies = TrustedProxies::from_settings(&config.reverse_proxy)?;
            if !proxies.is_trusted(peer) {
                tracing::warn!(%peer, "Peer is not a trusted proxy");
                std::process::exit(1);
            }
            tracing::info!(%peer, "Peer is a trusted proxy");
        }
    }

    Ok(())
}
