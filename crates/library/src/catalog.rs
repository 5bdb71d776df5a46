use crate::Context;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pinchy_extract::models::MixDescriptor;
use pinchy_extract::parse_catalog;
use std::collections::HashSet;
use tracing::instrument;

/// Fetch the catalog page from the site root and list every mix on it.
#[instrument(skip(ctx), fields(source = ctx.source.name(), url = %ctx.base_url))]
pub async fn fetch_catalog(ctx: &Context) -> Result<Vec<MixDescriptor>> {
    let page = ctx.source.page(&ctx.base_url).await.or_raise(|| ErrorKind::RemoteFetch)?;
    parse_catalog(page).or_raise(|| ErrorKind::MalformedCatalog)
}

/// The mixes in `catalog` that have no directory in `local`, in catalog order.
///
/// A mix listed more than once is only returned once, so that two workers
/// never write into the same directory.
pub fn missing(catalog: Vec<MixDescriptor>, local: &HashSet<String>) -> Vec<MixDescriptor> {
    let mut seen = HashSet::new();
    catalog
        .into_iter()
        .filter(|mix| !local.contains(&mix.mix_id))
        .filter(|mix| {
            let first = seen.insert(mix.mix_id.clone());
            if !first {
                tracing::debug!(mix_id = %mix.mix_id, "Skipping duplicate catalog entry");
            }
            first
        })
        .collect()
}

/// Read the local inventory, fetch the catalog and return what still needs
/// archiving.
#[instrument(skip(ctx), fields(pending))]
pub async fn pending(ctx: &Context) -> Result<Vec<MixDescriptor>> {
    let local = ctx.root.inventory().await.or_raise(|| ErrorKind::LocalIo)?;
    let catalog = fetch_catalog(ctx).await?;
    tracing::debug!(local = local.len(), catalog = catalog.len(), "Comparing catalog with archive");
    let pending = missing(catalog, &local);
    tracing::Span::current().record("pending", pending.len());
    Ok(pending)
}
