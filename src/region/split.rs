//! Cutting a region into consecutive chunks of member positions.
//!
//! A chunk that runs across a gap of a sparse region becomes one sub-region
//! per span it touches; chunks never merge with their neighbours.

use super::{Region, Span, SparseRegion};
use crate::space::Space;

/// Cuts `region` into `count` chunks whose sizes differ by at most one.
///
/// `count <= 1` or a one-unit region yields the region itself; the empty
/// region yields an empty sparse region. `count` is capped at the region's
/// size.
pub(crate) fn split_into<S: Space>(region: &Region<S>, count: i64) -> SparseRegion<S> {
    let space = region.space();
    let total = region.size().units();
    if total == 0 {
        return space.sparse_region_builder().build();
    }
    if count <= 1 || total == 1 {
        return space.sparse_region_builder().concatenate(region).build();
    }

    let chunks = count.min(total);
    let base = total / chunks;
    let extra = total % chunks;
    walk(region, chunks, |i| if i < extra { base + 1 } else { base })
}

/// Cuts `region` into chunks of `chunk` units, the last one possibly
/// shorter. Callers guarantee `0 < chunk < region size`.
pub(crate) fn split_by_size<S: Space>(region: &Region<S>, chunk: i64) -> SparseRegion<S> {
    debug_assert!(chunk > 0);
    walk(region, i64::MAX, |_| chunk)
}

/// Walks the spans of `region`, emitting chunk `i` with `chunk_len(i)`
/// units until the members run out. At most `max_chunks` chunks are cut;
/// the last of them takes every remaining member.
fn walk<S, F>(region: &Region<S>, max_chunks: i64, chunk_len: F) -> SparseRegion<S>
where
    S: Space,
    F: Fn(i64) -> i64,
{
    let space = region.space();
    let spans = region.spans();
    let mut builder = space.sparse_region_builder();

    let mut index = 0usize;
    let mut cursor = spans.first().map(|span| span.start);
    let mut chunk = 0i64;

    while let Some(from) = cursor {
        if chunk >= max_chunks {
            break;
        }
        // A space holds at most i64::MAX members, so this drains the rest.
        let mut wanted = if chunk + 1 == max_chunks {
            i64::MAX
        } else {
            chunk_len(chunk)
        };
        let mut from = from;
        // One chunk may take pieces of several spans.
        while wanted > 0 {
            let span = &spans[index];
            let available = space
                .steps_between(&from, &span.end)
                .map(|steps| steps.saturating_add(1))
                .unwrap_or(i64::MAX);
            if wanted < available {
                let Some(end) = space.offset(&from, wanted - 1) else {
                    cursor = None;
                    break;
                };
                builder.concatenate(&Region::Contiguous(Span::new(space.clone(), from, end)));
                cursor = space.offset(&end, 1);
                wanted = 0;
            } else {
                builder.concatenate(&Region::Contiguous(Span::new(
                    space.clone(),
                    from,
                    span.end,
                )));
                wanted -= available;
                index += 1;
                cursor = spans.get(index).map(|next| next.start);
                match cursor {
                    Some(next) => from = next,
                    None => break,
                }
            }
        }
        chunk += 1;
    }

    builder.build()
}
