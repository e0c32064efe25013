//! Get All Custom Channels - AdSense Management API Sample
//!
//! Prints every custom channel of an ad client, paging through the
//! `accounts.adclients.customchannels.list` results until exhausted.
//!
//! On first use the application is authorized through the browser with the
//! OAuth client in `client_secrets.json`, and the resulting credentials are
//! stored in `adsense.dat`.
//!
//! # Usage
//!
//! ```bash
//! # List the custom channels of an ad client
//! get-all-custom-channels --ad_client_id accounts/pub-1234/adclients/ca-pub-1234
//!
//! # Keep credentials somewhere else
//! get-all-custom-channels --ad_client_id accounts/pub-1234/adclients/ca-pub-1234 \
//!     --credentials-file ~/.config/adsense.dat
//!
//! # Show request logs
//! RUST_LOG=debug get-all-custom-channels --ad_client_id accounts/pub-1234/adclients/ca-pub-1234
//! ```

mod lister;

use std::path::PathBuf;
use std::time::Duration;

use adsense_common::{
    AdClientId, AuthConfig, MAX_PAGE_SIZE, ReportingClient, client, credentials,
    get_adsense_credentials,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Lists the custom channels of an AdSense ad client.
#[derive(Parser, Debug, Clone)]
#[command(name = "get-all-custom-channels")]
#[command(about = "Gets all custom channels in an ad client")]
struct Args {
    /// The ID of the ad client for which to fetch custom channels.
    /// Format: "accounts/{account}/adclients/{adclient}".
    #[arg(long = "ad_client_id", env = "ADSENSE_AD_CLIENT_ID")]
    ad_client_id: Option<String>,

    /// File holding the authorized credentials.
    #[arg(long, env = "ADSENSE_CREDENTIALS_FILE", default_value = credentials::DEFAULT_CREDENTIALS_FILE)]
    credentials_file: PathBuf,

    /// OAuth client secrets downloaded from the Google Cloud console.
    #[arg(long, env = "ADSENSE_CLIENT_SECRETS_FILE", default_value = credentials::DEFAULT_CLIENT_SECRETS_FILE)]
    client_secrets_file: PathBuf,

    /// Root URL of the AdSense Management API.
    #[arg(long, env = "ADSENSE_BASE_URL", default_value = client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds.
    #[arg(short, long, env = "ADSENSE_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Local port receiving the authorization redirect (0 = any free port).
    #[arg(long, env = "ADSENSE_AUTH_PORT", default_value = "8080")]
    auth_port: u16,
}

impl Args {
    /// Validates the ad client id before anything touches the network.
    fn ad_client_id(&self) -> adsense_common::Result<AdClientId> {
        AdClientId::new(self.ad_client_id.clone().unwrap_or_default())
    }

    fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            credentials_file: self.credentials_file.clone(),
            client_secrets_file: self.client_secrets_file.clone(),
            auth_port: self.auth_port,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let ad_client_id = args.ad_client_id()?;

    let http = client::http_client(Duration::from_secs(args.timeout))?;
    let authorizer = get_adsense_credentials(&args.auth_config()).await?;
    let reporting = ReportingClient::new(http, authorizer, &args.base_url)?;

    let mut stdout = std::io::stdout().lock();
    lister::run(
        &reporting,
        &ad_client_id,
        MAX_PAGE_SIZE,
        &args.credentials_file,
        &mut stdout,
    )
    .await?;

    Ok(())
}
