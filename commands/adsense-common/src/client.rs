//! Authenticated client for the AdSense Management API.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::credentials::TokenProvider;
use crate::error::{Error, Result};
use crate::model::{ListCustomChannelsRequest, ListCustomChannelsResponse};
use crate::pager::CustomChannelsApi;

/// Production endpoint of the v2 API.
pub const DEFAULT_BASE_URL: &str = "https://adsense.googleapis.com/v2/";

/// Builds the HTTP client used for API calls.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// API client sending the bearer tokens of `T`.
pub struct ReportingClient<T> {
    http: reqwest::Client,
    base_url: Url,
    tokens: T,
}

impl<T: TokenProvider> ReportingClient<T> {
    pub fn new(http: reqwest::Client, tokens: T, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidArgument(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidArgument(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Appends the parent's segments to the base URL's path.
    ///
    /// The host always stays the base URL's, whatever the ad client id holds.
    fn custom_channels_url(&self, request: &ListCustomChannelsRequest) -> Result<Url> {
        let parent = request.parent.as_str();
        let segments: Vec<&str> = parent.split('/').filter(|s| !s.is_empty()).collect();

        if segments.iter().any(|s| *s == "." || *s == "..") {
            return Err(Error::InvalidArgument(format!(
                "ad client id {parent:?} contains relative path segments"
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidArgument("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("customchannels");
        Ok(url)
    }
}

impl<T: TokenProvider> CustomChannelsApi for ReportingClient<T> {
    async fn list_custom_channels(
        &self,
        request: &ListCustomChannelsRequest,
    ) -> Result<ListCustomChannelsResponse> {
        let url = self.custom_channels_url(request)?;
        let token = self.tokens.bearer_token().await?;

        let mut query = vec![("pageSize", request.page_size.to_string())];
        if let Some(ref page_token) = request.page_token {
            query.push(("pageToken", page_token.clone()));
        }

        tracing::debug!(%url, page_token = ?request.page_token, "listing custom channels");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);

        Err(Error::Api { status, message })
    }
}
