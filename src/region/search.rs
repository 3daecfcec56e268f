//! Ordered lookup of member positions.

use super::{Region, Span};
use crate::order::{Comparison, Order};
use crate::position::{Position, PositionOrder};
use crate::space::Space;

/// Guides a binary search through a region.
///
/// `compare` tells how a candidate relates to what is sought: `Less` means
/// the match lies later, `Greater` earlier, `Equal` is a hit.
/// `Incomparable` ends the search without a match.
pub trait Criterion<S: Space> {
    fn compare(&self, candidate: &Position<S>) -> Comparison;
}

impl<S: Space, F> Criterion<S> for F
where
    F: Fn(&Position<S>) -> Comparison,
{
    fn compare(&self, candidate: &Position<S>) -> Comparison {
        self(candidate)
    }
}

/// Finds one specific position.
#[derive(Debug, Clone)]
pub struct SpecificPosition<S: Space> {
    target: Position<S>,
}

impl<S: Space> SpecificPosition<S> {
    pub fn new(target: Position<S>) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Position<S> {
        &self.target
    }
}

impl<S: Space> Criterion<S> for SpecificPosition<S> {
    fn compare(&self, candidate: &Position<S>) -> Comparison {
        PositionOrder.compare(candidate, &self.target)
    }
}

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<S: Space> {
    pub position: Position<S>,
    /// Index of the sub-region holding `position`.
    pub sub_region: usize,
}

pub(super) fn search<S, C>(region: &Region<S>, criterion: &C) -> Option<Found<S>>
where
    S: Space,
    C: Criterion<S> + ?Sized,
{
    let spans = region.spans();
    let mut lo = 0usize;
    let mut hi = spans.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let span = &spans[mid];
        match criterion.compare(&span.start()) {
            Comparison::Equal => return found(span.start(), mid),
            Comparison::Greater => hi = mid,
            Comparison::Incomparable => return None,
            Comparison::Less => match criterion.compare(&span.end()) {
                Comparison::Equal => return found(span.end(), mid),
                Comparison::Less => lo = mid + 1,
                Comparison::Greater => return search_within(span, mid, criterion),
                Comparison::Incomparable => return None,
            },
        }
    }
    None
}

fn found<S: Space>(position: Position<S>, sub_region: usize) -> Option<Found<S>> {
    Some(Found {
        position,
        sub_region,
    })
}

/// Searches the interior of a span whose endpoints bracket the match.
fn search_within<S, C>(span: &Span<S>, index: usize, criterion: &C) -> Option<Found<S>>
where
    S: Space,
    C: Criterion<S> + ?Sized,
{
    let space = &span.space;
    let last = space.steps_between(&span.start, &span.end)?;
    let mut lo = 1i64;
    let mut hi = last - 1;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let coord = space.offset(&span.start, mid)?;
        let candidate = Position::at(space.clone(), coord);
        match criterion.compare(&candidate) {
            Comparison::Equal => return found(candidate, index),
            Comparison::Less => lo = mid + 1,
            Comparison::Greater => hi = mid - 1,
            Comparison::Incomparable => return None,
        }
    }
    None
}
