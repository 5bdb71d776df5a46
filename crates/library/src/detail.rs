use crate::Context;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pinchy_extract::models::{MixDescriptor, MixDetail};
use pinchy_extract::parse_detail;
use pinchy_fetch::{Url, resolve};
use tracing::instrument;

/// Fetch a mix's landing page and extract the links to its files.
///
/// # Errors
///
/// - [`ErrorKind::RemoteFetch`] if the page can't be fetched, including any
///   non-2xx answer. Nothing is retried.
/// - [`ErrorKind::MalformedDetailPage`] if the download link or the gallery
///   image is missing.
#[instrument(skip(ctx, descriptor), fields(mix_id = %descriptor.mix_id))]
pub async fn fetch_mix_detail(ctx: &Context, descriptor: &MixDescriptor) -> Result<MixDetail> {
    let url = landing_url(ctx, descriptor)?;
    fetch_detail_at(ctx, &url).await
}

pub(crate) fn landing_url(ctx: &Context, descriptor: &MixDescriptor) -> Result<Url> {
    // The landing path came from the catalog.
    resolve(&ctx.base_url, &descriptor.landing_path).or_raise(|| ErrorKind::MalformedCatalog)
}

pub(crate) async fn fetch_detail_at(ctx: &Context, url: &Url) -> Result<MixDetail> {
    tracing::debug!(%url, "Fetching landing page");
    let page = ctx.source.page(url).await.or_raise(|| ErrorKind::RemoteFetch)?;
    parse_detail(page).or_raise(|| ErrorKind::MalformedDetailPage)
}
