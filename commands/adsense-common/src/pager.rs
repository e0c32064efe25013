//! Pull-based pagination over the custom channels listing.

use std::future::Future;

use crate::error::Result;
use crate::model::{ListCustomChannelsRequest, ListCustomChannelsResponse, list_next};

/// The one remote call the listing needs.
pub trait CustomChannelsApi {
    fn list_custom_channels(
        &self,
        request: &ListCustomChannelsRequest,
    ) -> impl Future<Output = Result<ListCustomChannelsResponse>>;
}

/// Walks the pages of a listing, one request at a time.
///
/// Once the last page has been returned, or a request has failed, every
/// further call to [`Pager::next_page`] yields `None`.
pub struct Pager<'a, A> {
    api: &'a A,
    next: Option<ListCustomChannelsRequest>,
    fetched: usize,
}

impl<'a, A: CustomChannelsApi> Pager<'a, A> {
    pub fn new(api: &'a A, first: ListCustomChannelsRequest) -> Self {
        Self {
            api,
            next: Some(first),
            fetched: 0,
        }
    }

    /// Fetches the next page, if any.
    pub async fn next_page(&mut self) -> Option<Result<ListCustomChannelsResponse>> {
        let request = self.next.take()?;

        let response = match self.api.list_custom_channels(&request).await {
            Ok(response) => response,
            Err(e) => return Some(Err(e)),
        };

        self.fetched += 1;
        self.next = list_next(&request, &response);
        tracing::debug!(
            page = self.fetched,
            channels = response.custom_channels.len(),
            more = self.next.is_some(),
            "fetched custom channels page"
        );

        Some(Ok(response))
    }

    /// Number of pages fetched successfully so far.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ad_client::AdClientId;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        pages: RefCell<VecDeque<Result<ListCustomChannelsResponse>>>,
        seen: RefCell<Vec<Option<String>>>,
    }

    impl Scripted {
        fn with(pages: Vec<Result<ListCustomChannelsResponse>>) -> Self {
            Self {
                pages: RefCell::new(pages.into()),
                ..Default::default()
            }
        }
    }

    impl CustomChannelsApi for Scripted {
        async fn list_custom_channels(
            &self,
            request: &ListCustomChannelsRequest,
        ) -> Result<ListCustomChannelsResponse> {
            self.seen.borrow_mut().push(request.page_token.clone());
            self.pages
                .borrow_mut()
                .pop_front()
                .expect("no more scripted pages")
        }
    }

    fn first_request() -> ListCustomChannelsRequest {
        ListCustomChannelsRequest::new(AdClientId::new("accounts/a/adclients/b").unwrap(), 50)
    }

    fn page(token: Option<&str>) -> ListCustomChannelsResponse {
        ListCustomChannelsResponse {
            custom_channels: Vec::new(),
            next_page_token: token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn follows_tokens_until_exhausted() {
        let api = Scripted::with(vec![Ok(page(Some("p2"))), Ok(page(Some("p3"))), Ok(page(None))]);
        let mut pager = Pager::new(&api, first_request());

        while let Some(page) = pager.next_page().await {
            page.unwrap();
        }

        assert_eq!(pager.pages_fetched(), 3);
        assert_eq!(
            *api.seen.borrow(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
        assert!(pager.next_page().await.is_none());
    }

    #[tokio::test]
    async fn stops_after_an_error() {
        let api = Scripted::with(vec![Ok(page(Some("p2"))), Err(Error::CredentialsExpired)]);
        let mut pager = Pager::new(&api, first_request());

        assert!(pager.next_page().await.unwrap().is_ok());
        assert!(matches!(
            pager.next_page().await,
            Some(Err(Error::CredentialsExpired))
        ));
        assert!(pager.next_page().await.is_none());
        assert_eq!(api.seen.borrow().len(), 2);
    }
}
