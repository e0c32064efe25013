//! Wire types of the `accounts.adclients.customchannels.list` call.

use serde::{Deserialize, Serialize};

use crate::ad_client::AdClientId;

/// The largest page size the samples request from the API.
pub const MAX_PAGE_SIZE: u32 = 50;

/// A custom channel as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomChannel {
    /// Resource name, `accounts/{account}/adclients/{adclient}/customchannels/{customchannel}`.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_dimension_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// One page of custom channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomChannelsResponse {
    /// Absent on the wire when the page is empty.
    #[serde(default)]
    pub custom_channels: Vec<CustomChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Parameters of a single list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCustomChannelsRequest {
    pub parent: AdClientId,
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl ListCustomChannelsRequest {
    /// First-page request. The page size is capped at [`MAX_PAGE_SIZE`].
    pub fn new(parent: AdClientId, page_size: u32) -> Self {
        Self {
            parent,
            page_size: page_size.min(MAX_PAGE_SIZE),
            page_token: None,
        }
    }
}

/// Builds the request for the page after `previous_response`.
///
/// Returns `None` once the response carries no continuation token.
pub fn list_next(
    previous_request: &ListCustomChannelsRequest,
    previous_response: &ListCustomChannelsResponse,
) -> Option<ListCustomChannelsRequest> {
    let token = previous_response
        .next_page_token
        .as_deref()
        .filter(|token| !token.is_empty())?;

    Some(ListCustomChannelsRequest {
        page_token: Some(token.to_string()),
        ..previous_request.clone()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ListCustomChannelsRequest {
        let parent = AdClientId::new("accounts/pub-1/adclients/ca-pub-1").unwrap();
        ListCustomChannelsRequest::new(parent, 500)
    }

    #[test]
    fn caps_page_size() {
        assert_eq!(request().page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn missing_channels_field_is_an_empty_page() {
        let page: ListCustomChannelsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.custom_channels.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn parses_channels() {
        let page: ListCustomChannelsResponse = serde_json::from_value(json!({
            "customChannels": [{
                "name": "accounts/pub-1/adclients/ca-pub-1/customchannels/42",
                "displayName": "Sidebar",
                "reportingDimensionId": "ca-pub-1:42",
                "active": true
            }],
            "nextPageToken": "abc"
        }))
        .unwrap();

        assert_eq!(page.custom_channels.len(), 1);
        assert_eq!(page.custom_channels[0].display_name, "Sidebar");
        assert_eq!(page.custom_channels[0].active, Some(true));
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn list_next_follows_token() {
        let first = request();
        let page = ListCustomChannelsResponse {
            next_page_token: Some("abc".to_string()),
            ..Default::default()
        };

        let next = list_next(&first, &page).unwrap();
        assert_eq!(next.parent, first.parent);
        assert_eq!(next.page_size, first.page_size);
        assert_eq!(next.page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn list_next_stops_without_token() {
        let first = request();
        assert!(list_next(&first, &ListCustomChannelsResponse::default()).is_none());

        let empty_token = ListCustomChannelsResponse {
            next_page_token: Some(String::new()),
            ..Default::default()
        };
        assert!(list_next(&first, &empty_token).is_none());
    }
}
