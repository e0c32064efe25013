use std::fmt;

use crate::error::{Error, Result};

/// Resource name of an ad client, `accounts/{account}/adclients/{adclient}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdClientId(String);

impl AdClientId {
    /// Validates a caller-supplied ad client id.
    ///
    /// Only emptiness is rejected. The API is the authority on the rest of
    /// the format, so ids that do not look like a resource name are passed
    /// through with a warning.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into().trim().to_string();

        if id.is_empty() {
            return Err(Error::InvalidArgument(
                r#"missing "ad_client_id", expected "accounts/{account}/adclients/{adclient}""#
                    .to_string(),
            ));
        }

        if !looks_like_resource_name(&id) {
            tracing::warn!(ad_client_id = %id, "ad client id does not look like a resource name");
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn looks_like_resource_name(id: &str) -> bool {
    let parts: Vec<&str> = id.split('/').collect();
    matches!(
        parts.as_slice(),
        ["accounts", account, "adclients", client] if !account.is_empty() && !client.is_empty()
    )
}
