//! Listing and printing of an ad client's custom channels.

use std::io::Write;
use std::path::Path;
use std::pin::pin;

use adsense_common::{
    AdClientId, CustomChannel, CustomChannelsApi, Error, ListCustomChannelsRequest, Pager, Result,
};
use futures::{Stream, TryStreamExt, stream};

/// Lazily yields every custom channel of `ad_client_id`, page by page.
///
/// At most one page is held at a time. The stream ends after the last page,
/// or right after yielding the first error.
pub fn list_all_custom_channels<'a, A: CustomChannelsApi>(
    api: &'a A,
    ad_client_id: &AdClientId,
    page_size: u32,
) -> impl Stream<Item = Result<CustomChannel>> + use<'a, A> {
    let pager = Pager::new(
        api,
        ListCustomChannelsRequest::new(ad_client_id.clone(), page_size),
    );

    stream::try_unfold(pager, |mut pager| async move {
        match pager.next_page().await {
            Some(Ok(page)) => Ok(Some((page.custom_channels, pager))),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    })
    .map_ok(|channels| stream::iter(channels.into_iter().map(Ok)))
    .try_flatten()
}

/// Prints one line per channel and returns how many were found.
///
/// The "none found" notice is printed once, when the whole listing is empty,
/// not for every empty page.
pub async fn print_custom_channels<A, W>(
    api: &A,
    ad_client_id: &AdClientId,
    page_size: u32,
    out: &mut W,
) -> Result<usize>
where
    A: CustomChannelsApi,
    W: Write,
{
    let mut channels = pin!(list_all_custom_channels(api, ad_client_id, page_size));
    let mut found = 0;

    while let Some(channel) = channels.try_next().await? {
        writeln!(
            out,
            "Custom channel with ID \"{}\" and name \"{}\" was found.",
            channel.name, channel.display_name
        )?;
        found += 1;
    }

    if found == 0 {
        writeln!(out, "No custom channels were found.")?;
    }

    Ok(found)
}

/// Prints the listing, turning revoked credentials into re-authorization
/// instructions. Any other error is returned to the caller.
pub async fn run<A, W>(
    api: &A,
    ad_client_id: &AdClientId,
    page_size: u32,
    credentials_file: &Path,
    out: &mut W,
) -> Result<()>
where
    A: CustomChannelsApi,
    W: Write,
{
    match print_custom_channels(api, ad_client_id, page_size, out).await {
        Ok(found) => {
            tracing::info!(found, ad_client_id = %ad_client_id, "listed custom channels");
            Ok(())
        }
        Err(Error::CredentialsExpired) => {
            tracing::warn!("refresh token rejected, re-authorization required");
            writeln!(
                out,
                "The credentials have been revoked or expired, please delete the \"{}\" file \
                 and re-run the application to re-authorize.",
                credentials_file.display()
            )?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}
