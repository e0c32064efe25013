//! Credential provider for the samples, built on yup-oauth2's installed
//! application flow with tokens persisted to disk.
//!
//! The first run opens the consent page and stores the granted tokens. Later
//! runs only refresh them. When the stored grant is rejected the provider
//! does not fall back to a new consent; it reports
//! [`Error::CredentialsExpired`] so the caller can ask the user to delete the
//! credentials file.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Notify;
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
use yup_oauth2::error::AuthErrorCode;
use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::error::{Error, Result};

/// Read-only access to AdSense data.
pub const ADSENSE_SCOPE: &str = "https://www.googleapis.com/auth/adsense.readonly";

/// Where authorized credentials are kept between runs.
pub const DEFAULT_CREDENTIALS_FILE: &str = "adsense.dat";

/// OAuth client downloaded from the Google Cloud console.
pub const DEFAULT_CLIENT_SECRETS_FILE: &str = "client_secrets.json";

/// Source of bearer tokens for API requests.
pub trait TokenProvider {
    fn bearer_token(&self) -> impl Future<Output = Result<String>>;
}

/// Where credentials live and how the loopback authorization listens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials_file: PathBuf,
    pub client_secrets_file: PathBuf,
    /// Port for the authorization redirect, 0 picks any free port.
    pub auth_port: u16,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            client_secrets_file: PathBuf::from(DEFAULT_CLIENT_SECRETS_FILE),
            auth_port: 8080,
        }
    }
}

/// Shows the consent URL on first use, refuses it once credentials exist.
struct ConsentDelegate {
    allow_consent: bool,
    consent_requested: Arc<Notify>,
}

impl InstalledFlowDelegate for ConsentDelegate {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        _need_code: bool,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            if !self.allow_consent {
                self.consent_requested.notify_one();
                return Err("stored credentials were rejected".to_string());
            }

            eprintln!("Open the following URL in your browser to authorize this application:");
            eprintln!();
            eprintln!("    {url}");
            eprintln!();
            Ok(String::new())
        })
    }
}

/// Authenticator holding the user's tokens for the AdSense scope.
pub struct Authorizer {
    authenticator: DefaultAuthenticator,
    stored: bool,
    consent_requested: Arc<Notify>,
}

/// Builds the credential provider described by `config`.
///
/// Nothing is sent over the network here; tokens are fetched or refreshed on
/// the first call to [`TokenProvider::bearer_token`].
pub async fn get_adsense_credentials(config: &AuthConfig) -> Result<Authorizer> {
    let secret = yup_oauth2::read_application_secret(&config.client_secrets_file)
        .await
        .map_err(|e| Error::Secrets {
            path: config.client_secrets_file.clone(),
            message: e.to_string(),
        })?;

    let stored = tokio::fs::try_exists(&config.credentials_file).await?;
    if stored {
        restrict_permissions(&config.credentials_file)?;
        tracing::debug!(path = %config.credentials_file.display(), "using stored credentials");
    } else {
        tracing::info!(
            path = %config.credentials_file.display(),
            "no stored credentials, authorization required"
        );
    }

    let consent_requested = Arc::new(Notify::new());
    let delegate = ConsentDelegate {
        allow_consent: !stored,
        consent_requested: consent_requested.clone(),
    };

    let authenticator = InstalledFlowAuthenticator::builder(
        secret,
        InstalledFlowReturnMethod::HTTPPortRedirect(config.auth_port),
    )
    .persist_tokens_to_disk(config.credentials_file.clone())
    .flow_delegate(Box::new(delegate))
    .build()
    .await?;

    Ok(Authorizer {
        authenticator,
        stored,
        consent_requested,
    })
}

impl TokenProvider for Authorizer {
    async fn bearer_token(&self) -> Result<String> {
        let token = unless_consent_requested(
            self.stored,
            &self.consent_requested,
            async {
                self.authenticator
                    .token(&[ADSENSE_SCOPE])
                    .await
                    .map_err(map_auth_error)
            },
        )
        .await?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| Error::Authorization("no access token was issued".to_string()))
    }
}

/// Runs `fut`, giving up with [`Error::CredentialsExpired`] as soon as a new
/// consent is requested for credentials that were already stored.
async fn unless_consent_requested<T, F>(
    stored: bool,
    consent_requested: &Notify,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        result = fut => result,
        () = consent_requested.notified(), if stored => {
            tracing::warn!("stored credentials were rejected by the token endpoint");
            Err(Error::CredentialsExpired)
        }
    }
}

fn map_auth_error(e: yup_oauth2::Error) -> Error {
    match e {
        yup_oauth2::Error::AuthError(ref auth) if matches!(auth.error, AuthErrorCode::InvalidGrant) => {
            Error::CredentialsExpired
        }
        other => Error::OAuth(other),
    }
}

/// Makes the credentials file readable by its owner only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    if permissions.mode() & 0o077 != 0 {
        permissions.set_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
