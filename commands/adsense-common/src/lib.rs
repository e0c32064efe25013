//! AdSense Common - Shared Pieces of the AdSense Management API Samples
//!
//! Everything a sample needs besides its own listing logic:
//!
//! - [`credentials`] - [`get_adsense_credentials`], a yup-oauth2 authenticator
//!   that authorizes on first use and refreshes stored tokens afterwards
//! - [`client`] - [`ReportingClient`], the authenticated API client
//! - [`pager`] - [`Pager`] over any [`CustomChannelsApi`]
//!
//! # Usage
//!
//! ```no_run
//! use adsense_common::{AdClientId, AuthConfig, ReportingClient, client, get_adsense_credentials};
//! use std::time::Duration;
//!
//! # async fn demo() -> adsense_common::Result<()> {
//! let ad_client_id = AdClientId::new("accounts/pub-123/adclients/ca-pub-123")?;
//! let http = client::http_client(Duration::from_secs(30))?;
//! let authorizer = get_adsense_credentials(&AuthConfig::default()).await?;
//! let reporting = ReportingClient::new(http, authorizer, client::DEFAULT_BASE_URL)?;
//! # let _ = (ad_client_id, reporting);
//! # Ok(())
//! # }
//! ```

pub mod ad_client;
pub mod client;
pub mod credentials;
pub mod error;
pub mod model;
pub mod pager;

pub use ad_client::AdClientId;
pub use client::ReportingClient;
pub use credentials::{AuthConfig, Authorizer, TokenProvider, get_adsense_credentials};
pub use error::{Error, Result};
pub use model::{CustomChannel, ListCustomChannelsRequest, ListCustomChannelsResponse, MAX_PAGE_SIZE};
pub use pager::{CustomChannelsApi, Pager};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    use axum::Router;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    pub async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app.into_make_service()).await });
        format!("http://{addr}")
    }
}
