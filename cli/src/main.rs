//! Command-line front end for the default offers client.
//!
//! Reads the same `config.json` layout as the vendor samples, fetches a
//! bearer token, and optionally uses it to fetch default offers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use default_offers::{ApiResponse, Config, DefaultOffersClient, HeaderParams};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch bearer tokens and default offers")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, env = "DEFAULT_OFFERS_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Override `rootUrl` from the configuration file
    #[arg(long, env = "DEFAULT_OFFERS_ROOT_URL")]
    root_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request a bearer token and print the response
    Token,
    /// Request a bearer token, then fetch the offers for an entry point
    Offers {
        /// External entry point selecting the offer set
        #[arg(long)]
        eep: String,
        /// Client id issued by the vendor (not the OAuth client key)
        #[arg(long)]
        client_id: String,
        /// ISO 3166 alpha-2 country code, e.g. US
        #[arg(long)]
        country_code: String,
        #[arg(long, default_value = "5101")]
        message_type_id: String,
        /// Tracking id; a random UUID when omitted
        #[arg(long)]
        request_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_json_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(root_url) = cli.root_url {
        config.root_url = root_url;
    }
    let mut client = DefaultOffersClient::new(config).context("invalid configuration")?;

    match cli.command {
        Command::Token => {
            let token = client.get_bearer_token().await.context("token request failed")?;
            print_response(&token)?;
        }
        Command::Offers {
            eep,
            client_id,
            country_code,
            message_type_id,
            request_id,
        } => {
            let token = client.authenticate().await.context("token request failed")?;
            info!(expires_in = ?token.expires_in, "obtained bearer token");

            let request_id = request_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let params = HeaderParams::from([
                ("request_id".to_string(), request_id),
                ("client_id".to_string(), client_id),
                ("country_code".to_string(), country_code),
                ("message_type_id".to_string(), message_type_id),
            ]);
            let offers = client
                .get_default_offers(&eep, &params)
                .await
                .context("default offers request failed")?;
            print_response(&offers)?;
        }
    }
    Ok(())
}

fn render(response: &ApiResponse) -> Result<String> {
    Ok(match response.as_json() {
        Some(value) => serde_json::to_string_pretty(value)?,
        None => response.error_message(),
    })
}

fn print_response(response: &ApiResponse) -> Result<()> {
    println!("{}", render(response)?);
    Ok(())
}
