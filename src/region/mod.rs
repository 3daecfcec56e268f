//! Regions: ordered, possibly disjoint sets of positions.
//!
//! A [`Region`] is either empty, one contiguous [`Span`], or a
//! [`SparseRegion`] of several spans. All set operations run on the sorted
//! span lists (see the `algebra` module), so sparse operands are handled
//! exactly rather than through their `[start, end]` extent.
//!
//! # Equality
//!
//! Two regions are equal when they hold the same member positions of the
//! same space. `{[0,4],[5,9]}` equals `[0,9]`; the chunk boundaries of a
//! split are visible through [`Region::num_regions`], not through `==`.

mod algebra;
mod order;
mod search;
mod sparse;
mod split;


pub use order::RegionOrder;
pub use search::{Criterion, Found, SpecificPosition};
pub use sparse::{SparseRegion, SparseRegionBuilder};

pub(crate) use algebra::{compute_intersection, compute_subtract, compute_union};
pub(crate) use split::{split_by_size, split_into};

use std::fmt::{self, Display};

use crate::expr::{PositionExpression, RegionExpression};
use crate::outcome::Outcome;
use crate::position::Position;
use crate::size::Size;
use crate::space::Space;

/// A non-empty contiguous run `[start, end]` of one space.
#[derive(Debug, Clone)]
pub struct Span<S: Space> {
    space: S,
    start: S::Coord,
    end: S::Coord,
}

impl<S: Space> Span<S> {
    /// Callers guarantee `start <= end` and both lie inside the space.
    pub(crate) fn new(space: S, start: S::Coord, end: S::Coord) -> Self {
        debug_assert!(space.compare_coords(&start, &end).is_le());
        Self { space, start, end }
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn start(&self) -> Position<S> {
        Position::at(self.space.clone(), self.start)
    }

    pub fn end(&self) -> Position<S> {
        Position::at(self.space.clone(), self.end)
    }

    pub fn start_coord(&self) -> S::Coord {
        self.start
    }

    pub fn end_coord(&self) -> S::Coord {
        self.end
    }

    /// Number of member positions.
    pub fn units(&self) -> i64 {
        self.space
            .steps_between(&self.start, &self.end)
            .map(|steps| steps.saturating_add(1))
            .unwrap_or(i64::MAX)
    }

    pub fn size(&self) -> Size<S> {
        self.space.size(self.units())
    }

    pub fn contains_coord(&self, coord: &S::Coord) -> bool {
        self.space.compare_coords(&self.start, coord).is_le()
            && self.space.compare_coords(coord, &self.end).is_le()
    }

    pub(crate) fn set_end(&mut self, end: S::Coord) {
        self.end = end;
    }
}

impl<S: Space> Display for Span<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Raw `[start, end]` coordinates of one span, as produced by
/// [`Region::to_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanRecord<C> {
    pub start: C,
    pub end: C,
}

/// An ordered set of positions of one [`Space`].
#[derive(Debug, Clone)]
pub enum Region<S: Space> {
    Empty(S),
    Contiguous(Span<S>),
    Sparse(SparseRegion<S>),
}

impl<S: Space> Region<S> {
    /// Builds the region holding exactly `spans`, which must be sorted and
    /// pairwise disjoint.
    pub(crate) fn from_spans(space: S, mut spans: Vec<Span<S>>) -> Self {
        match spans.len() {
            0 => Region::Empty(space),
            1 => Region::Contiguous(spans.remove(0)),
            _ => Region::Sparse(SparseRegion::from_sorted(space, spans)),
        }
    }

    pub fn space(&self) -> &S {
        match self {
            Region::Empty(space) => space,
            Region::Contiguous(span) => span.space(),
            Region::Sparse(sparse) => sparse.space(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans().is_empty()
    }

    /// The sorted, disjoint spans making up this region.
    pub fn spans(&self) -> &[Span<S>] {
        match self {
            Region::Empty(_) => &[],
            Region::Contiguous(span) => std::slice::from_ref(span),
            Region::Sparse(sparse) => sparse.spans(),
        }
    }

    /// First member position; out of bounds for the empty region.
    pub fn start(&self) -> Position<S> {
        match self.spans().first() {
            Some(span) => span.start(),
            None => self.space().out_of_bounds(),
        }
    }

    /// Last member position; out of bounds for the empty region.
    pub fn end(&self) -> Position<S> {
        match self.spans().last() {
            Some(span) => span.end(),
            None => self.space().out_of_bounds(),
        }
    }

    /// Number of member positions.
    pub fn size(&self) -> Size<S> {
        match self {
            Region::Empty(space) => space.none(),
            Region::Contiguous(span) => span.size(),
            Region::Sparse(sparse) => sparse.size(),
        }
    }

    /// Length of `[start, end]`, gaps included.
    pub(crate) fn extent_units(&self) -> i64 {
        match (self.spans().first(), self.spans().last()) {
            (Some(first), Some(last)) => self
                .space()
                .steps_between(&first.start, &last.end)
                .map(|steps| steps.saturating_add(1))
                .unwrap_or(i64::MAX),
            _ => 0,
        }
    }

    pub fn num_regions(&self) -> usize {
        self.spans().len()
    }

    /// The `index`th contiguous sub-region.
    pub fn sub_region(&self, index: usize) -> Option<Region<S>> {
        self.spans()
            .get(index)
            .map(|span| Region::Contiguous(span.clone()))
    }

    pub fn contains(&self, position: &Position<S>) -> bool {
        if !position.space().same_space(self.space()) || position.is_out_of_bounds() {
            return false;
        }
        self.search(&SpecificPosition::new(position.clone()))
            .is_some()
    }

    /// Binary search for a member position matching `criterion`.
    pub fn search<C: Criterion<S> + ?Sized>(&self, criterion: &C) -> Option<Found<S>> {
        search::search(self, criterion)
    }

    /// Iterates the member positions in order.
    pub fn iter(&self) -> Positions<'_, S> {
        Positions {
            spans: self.spans(),
            index: 0,
            next: self.spans().first().map(|span| span.start),
        }
    }

    /// Set algebra on this region, bounded by the whole space.
    pub fn expr(&self) -> RegionExpression<S> {
        self.space().expr(self)
    }

    /// Arithmetic on `position`, bounded by this region.
    pub fn expr_at(&self, position: &Position<S>) -> PositionExpression<S> {
        PositionExpression::new(self.clone(), position.clone())
    }

    pub fn union(&self, other: &Region<S>) -> Outcome<Region<S>> {
        self.expr().union(other).region()
    }

    pub fn intersection(&self, other: &Region<S>) -> Outcome<Region<S>> {
        self.expr().intersection(other).region()
    }

    pub fn difference(&self, other: &Region<S>) -> Outcome<Region<S>> {
        self.expr().difference(other).region()
    }

    pub fn subtract(&self, other: &Region<S>) -> Outcome<Region<S>> {
        self.expr().subtract(other).region()
    }

    pub fn concatenate(&self, other: &Region<S>) -> Outcome<Region<S>> {
        self.expr().concatenate(other).region()
    }

    pub fn invert(&self) -> Outcome<Region<S>> {
        self.expr().invert().region()
    }

    pub fn scale(&self, size: &Size<S>) -> Outcome<Region<S>> {
        self.expr().scale(size).region()
    }

    pub fn split(&self, count: i64) -> SparseRegion<S> {
        self.expr().split(count)
    }

    pub fn split_by(&self, size: &Size<S>) -> SparseRegion<S> {
        self.expr().split_by(size)
    }

    /// Raw span coordinates, in order.
    pub fn to_records(&self) -> Vec<SpanRecord<S::Coord>> {
        self.spans()
            .iter()
            .map(|span| SpanRecord {
                start: span.start,
                end: span.end,
            })
            .collect()
    }

    /// The member position following `coord`, skipping gaps.
    pub(crate) fn successor(&self, coord: &S::Coord) -> Option<S::Coord> {
        let spans = self.spans();
        let index = self.span_index(coord)?;
        let span = &spans[index];
        if self.space().compare_coords(coord, &span.end).is_lt() {
            self.space().offset(coord, 1)
        } else {
            spans.get(index + 1).map(|next| next.start)
        }
    }

    /// The member position preceding `coord`, skipping gaps.
    pub(crate) fn predecessor(&self, coord: &S::Coord) -> Option<S::Coord> {
        let spans = self.spans();
        let index = self.span_index(coord)?;
        let span = &spans[index];
        if self.space().compare_coords(&span.start, coord).is_lt() {
            self.space().offset(coord, -1)
        } else {
            index.checked_sub(1).map(|prev| spans[prev].end)
        }
    }

    /// Index of the span containing `coord`.
    fn span_index(&self, coord: &S::Coord) -> Option<usize> {
        let space = self.space();
        self.spans()
            .binary_search_by(|span| {
                if space.compare_coords(&span.end, coord).is_lt() {
                    std::cmp::Ordering::Less
                } else if space.compare_coords(coord, &span.start).is_lt() {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()
    }
}

impl<S: Space> From<SparseRegion<S>> for Region<S> {
    /// Zero or one sub-region collapses to the empty or contiguous form.
    fn from(sparse: SparseRegion<S>) -> Self {
        if sparse.num_regions() > 1 {
            return Region::Sparse(sparse);
        }
        let (space, spans) = sparse.into_parts();
        Region::from_spans(space, spans)
    }
}

impl<S: Space> PartialEq for Region<S> {
    fn eq(&self, other: &Self) -> bool {
        algebra::same_members(self.space(), other.space(), self.spans(), other.spans())
    }
}

impl<S: Space> Display for Region<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Empty(_) => write!(f, "region:{{}};"),
            Region::Contiguous(span) => write!(f, "region:{{{}}};", span),
            Region::Sparse(sparse) => write!(f, "{}", sparse),
        }
    }
}

impl<'a, S: Space> IntoIterator for &'a Region<S> {
    type Item = Position<S>;
    type IntoIter = Positions<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the member positions of a region.
#[derive(Debug, Clone)]
pub struct Positions<'a, S: Space> {
    spans: &'a [Span<S>],
    index: usize,
    next: Option<S::Coord>,
}

impl<S: Space> Iterator for Positions<'_, S> {
    type Item = Position<S>;

    fn next(&mut self) -> Option<Position<S>> {
        let coord = self.next?;
        let span = &self.spans[self.index];
        self.next = if span.space.compare_coords(&coord, &span.end).is_lt() {
            span.space.offset(&coord, 1)
        } else {
            self.index += 1;
            self.spans.get(self.index).map(|next| next.start)
        };
        Some(Position::at(span.space.clone(), coord))
    }
}
