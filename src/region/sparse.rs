//! Disjoint unions of contiguous regions.

use std::fmt::{self, Display};

use tracing::{debug, warn};

use super::{algebra, Region, Span};
use crate::error::RegionError;
use crate::position::Position;
use crate::size::Size;
use crate::space::Space;

/// A frozen, ordered sequence of disjoint contiguous sub-regions.
///
/// Sub-regions are strictly increasing by start. Adjacent sub-regions are
/// kept apart, so a split keeps its chunk boundaries.
#[derive(Debug, Clone)]
pub struct SparseRegion<S: Space> {
    space: S,
    spans: Vec<Span<S>>,
    size_units: i64,
}

impl<S: Space> SparseRegion<S> {
    /// Callers guarantee `spans` is sorted and pairwise disjoint.
    pub(crate) fn from_sorted(space: S, spans: Vec<Span<S>>) -> Self {
        debug_assert!(algebra::is_canonical(&spans));
        let size_units = spans
            .iter()
            .fold(0i64, |total, span| total.saturating_add(span.units()));
        Self {
            space,
            spans,
            size_units,
        }
    }

    pub(crate) fn into_parts(self) -> (S, Vec<Span<S>>) {
        (self.space, self.spans)
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn num_regions(&self) -> usize {
        self.spans.len()
    }

    /// The `index`th sub-region, `None` past the end.
    pub fn region(&self, index: usize) -> Option<Region<S>> {
        self.spans
            .get(index)
            .map(|span| Region::Contiguous(span.clone()))
    }

    /// Iterates the sub-regions in order.
    pub fn regions(&self) -> impl Iterator<Item = Region<S>> + '_ {
        self.spans
            .iter()
            .map(|span| Region::Contiguous(span.clone()))
    }

    pub fn spans(&self) -> &[Span<S>] {
        &self.spans
    }

    pub fn start(&self) -> Position<S> {
        match self.spans.first() {
            Some(span) => span.start(),
            None => self.space.out_of_bounds(),
        }
    }

    pub fn end(&self) -> Position<S> {
        match self.spans.last() {
            Some(span) => span.end(),
            None => self.space.out_of_bounds(),
        }
    }

    /// Total number of member positions across all sub-regions.
    pub fn size(&self) -> Size<S> {
        self.space.size(self.size_units)
    }
}

impl<S: Space> PartialEq for SparseRegion<S> {
    fn eq(&self, other: &Self) -> bool {
        algebra::same_members(&self.space, &other.space, &self.spans, &other.spans)
    }
}

impl<S: Space> Display for SparseRegion<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sparse_region:{{")?;
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{{{}}}", span)?;
        }
        write!(f, "}};")
    }
}

/// Accumulates regions of one space into a [`SparseRegion`].
///
/// Nested sparse regions are flattened and empty regions ignored. Regions of
/// another space are refused: [`try_concatenate`](Self::try_concatenate)
/// returns the error, [`concatenate`](Self::concatenate) records it in
/// [`rejections`](Self::rejections) and carries on.
///
/// [`build`](Self::build) sorts the collected sub-regions and joins the
/// ones that overlap; sub-regions that merely touch stay separate.
#[derive(Debug, Clone)]
pub struct SparseRegionBuilder<S: Space> {
    space: S,
    spans: Vec<Span<S>>,
    rejections: Vec<RegionError>,
}

impl<S: Space> SparseRegionBuilder<S> {
    pub fn new(space: S) -> Self {
        Self {
            space,
            spans: Vec::new(),
            rejections: Vec::new(),
        }
    }

    pub fn try_concatenate(&mut self, region: &Region<S>) -> Result<&mut Self, RegionError> {
        if !region.space().same_space(&self.space) {
            return Err(RegionError::SpaceMismatch {
                left: self.space.id(),
                right: region.space().id(),
            });
        }
        self.spans.extend(region.spans().iter().cloned());
        Ok(self)
    }

    pub fn concatenate(&mut self, region: &Region<S>) -> &mut Self {
        if let Err(error) = self.try_concatenate(region) {
            warn!(%error, region = %region, "dropped region from sparse region builder");
            self.rejections.push(error);
        }
        self
    }

    /// Errors of the regions [`concatenate`](Self::concatenate) refused.
    pub fn rejections(&self) -> &[RegionError] {
        &self.rejections
    }

    /// Number of sub-regions collected so far, before merging.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Freezes the collected sub-regions. The builder stays usable.
    pub fn build(&self) -> SparseRegion<S> {
        let space = &self.space;
        let mut sorted = self.spans.clone();
        sorted.sort_by(|a, b| {
            space
                .compare_coords(&a.start, &b.start)
                .then_with(|| space.compare_coords(&a.end, &b.end))
                .to_ordering()
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut merged: Vec<Span<S>> = Vec::with_capacity(sorted.len());
        for span in sorted {
            if let Some(last) = merged.last_mut() {
                if space.compare_coords(&span.start, &last.end).is_le() {
                    debug!(left = %last, right = %span, "merged overlapping sub-regions");
                    if space.compare_coords(&span.end, &last.end).is_gt() {
                        last.set_end(span.end);
                    }
                    continue;
                }
            }
            merged.push(span);
        }

        SparseRegion::from_sorted(space.clone(), merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ArraySpace;

    #[test]
    fn build_sorts_sub_regions() {
        let space = ArraySpace::standard();
        let sparse = space
            .sparse_region_builder()
            .concatenate(&space.range(20, 29))
            .concatenate(&space.range(0, 9))
            .build();
        assert_eq!(sparse.num_regions(), 2);
        assert_eq!(sparse.region(0), Some(space.range(0, 9)));
        assert_eq!(sparse.region(1), Some(space.range(20, 29)));
        assert_eq!(sparse.region(2), None);
        assert_eq!(sparse.size(), space.length(20));
    }

    #[test]
    fn build_merges_overlap_but_keeps_adjacent_apart() {
        let space = ArraySpace::standard();
        let sparse = space
            .sparse_region_builder()
            .concatenate(&space.range(0, 9))
            .concatenate(&space.range(5, 12))
            .concatenate(&space.range(13, 20))
            .build();
        assert_eq!(sparse.num_regions(), 2);
        assert_eq!(sparse.region(0), Some(space.range(0, 12)));
        assert_eq!(sparse.region(1), Some(space.range(13, 20)));
    }

    #[test]
    fn nested_sparse_regions_are_flattened() {
        let space = ArraySpace::standard();
        let inner = space
            .sparse_region_builder()
            .concatenate(&space.range(0, 1))
            .concatenate(&space.range(4, 5))
            .build();
        let outer = space
            .sparse_region_builder()
            .concatenate(&Region::from(inner))
            .concatenate(&space.range(8, 9))
            .concatenate(&space.empty())
            .build();
        assert_eq!(outer.num_regions(), 3);
        assert_eq!(outer.size(), space.length(6));
    }

    #[test]
    fn cross_space_regions_are_rejected() {
        let a = ArraySpace::with_bounds(0, 99).unwrap();
        let b = ArraySpace::with_bounds(0, 99).unwrap();
        let mut builder = a.sparse_region_builder();
        assert!(builder.try_concatenate(&b.range(0, 5)).is_err());
        builder.concatenate(&b.range(0, 5)).concatenate(&a.range(0, 5));
        assert_eq!(builder.rejections().len(), 1);
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.build().size(), a.length(6));
    }

    #[test]
    fn builder_is_reusable_after_build() {
        let space = ArraySpace::standard();
        let mut builder = space.sparse_region_builder();
        builder.concatenate(&space.range(0, 3));
        let first = builder.build();
        builder.concatenate(&space.range(10, 13));
        let second = builder.build();
        assert_eq!(first.num_regions(), 1);
        assert_eq!(second.num_regions(), 2);
    }

    #[test]
    fn empty_builder_builds_empty_region() {
        let space = ArraySpace::standard();
        let sparse = space.sparse_region_builder().build();
        assert!(sparse.is_empty());
        assert!(sparse.start().is_out_of_bounds());
        assert!(sparse.size().is_none());
        assert!(Region::from(sparse).is_empty());
    }

    #[test]
    fn display_lists_sub_regions() {
        let space = ArraySpace::standard();
        let sparse = space
            .sparse_region_builder()
            .concatenate(&space.range(0, 4))
            .concatenate(&space.range(10, 14))
            .build();
        assert_eq!(sparse.to_string(), "sparse_region:{{0..4},{10..14}};");
    }
}
