use crate::archive::{ArchivedMix, archive_mix};
use crate::error::{Error, Result};
use crate::{Context, MixDescriptor};
use async_stream::stream;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};

/// Progress events emitted by [`archive`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once.
/// 2. [`Planned`](Self::Planned), exactly once, with the number of mixes.
/// 3. [`Archived`](Self::Archived) or [`Failed`](Self::Failed), once per mix,
///    in completion order.
/// 4. [`Complete`](Self::Complete), exactly once.
///
/// A failed mix never ends the stream early.
#[derive(Debug)]
pub enum ArchiveEvent {
    Started,
    Planned(usize),
    Archived(ArchivedMix),
    Failed(MixDescriptor, Error),
    Complete,
}

/// Streams [`ArchiveEvent`]s while archiving `mixes`, at most `concurrency`
/// at a time (a `concurrency` of zero is treated as one).
///
/// Mixes are started in the order given; as each one finishes the next is
/// started, so with a `concurrency` of one they run strictly one after the
/// other. Workers share nothing but the [`Context`], and every mix writes
/// into its own directory.
pub fn archive<'a>(
    ctx: &'a Context,
    mixes: Vec<MixDescriptor>,
    concurrency: usize,
) -> impl Stream<Item = ArchiveEvent> + 'a {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield ArchiveEvent::Started;
        yield ArchiveEvent::Planned(mixes.len());

        let mut queued = mixes.into_iter().map(|mix| archive_one(ctx, mix));
        let mut processing = FuturesUnordered::new();
        processing.extend(queued.by_ref().take(concurrency.max(1)));
        while let Some((mix, outcome)) = processing.next().await {
            yield match outcome {
                Ok(archived) => ArchiveEvent::Archived(archived),
                Err(e) => ArchiveEvent::Failed(mix, e),
            };
            // Pop-n-push, in catalog order.
            if let Some(next) = queued.next() {
                processing.push(next);
            }
        }

        yield ArchiveEvent::Complete;
    })
}

async fn archive_one(ctx: &Context, mix: MixDescriptor) -> (MixDescriptor, Result<ArchivedMix>) {
    let outcome = archive_mix(ctx, &mix).await;
    if let Err(e) = &outcome {
        tracing::warn!(mix_id = %mix.mix_id, error = %**e, "Failed to archive mix");
    }
    (mix, outcome)
}

/// Archive `mixes` with [`archive`] and collect one `(descriptor, outcome)`
/// pair per mix, in completion order.
pub async fn run_all(
    ctx: &Context,
    mixes: Vec<MixDescriptor>,
    concurrency: usize,
) -> Vec<(MixDescriptor, Result<ArchivedMix>)> {
    let mut events = std::pin::pin!(archive(ctx, mixes, concurrency));
    let mut outcomes = Vec::new();
    while let Some(event) = events.next().await {
        match event {
            ArchiveEvent::Archived(archived) => outcomes.push((archived.descriptor.clone(), Ok(archived))),
            ArchiveEvent::Failed(mix, e) => outcomes.push((mix, Err(e))),
            ArchiveEvent::Started | ArchiveEvent::Planned(_) | ArchiveEvent::Complete => {},
        }
    }
    outcomes
}
