use tracing::trace;

use super::{out_of_bounds, space_mismatch};
use crate::error::RegionError;
use crate::order::Order;
use crate::outcome::Outcome;
use crate::region::{
    compute_intersection, compute_subtract, compute_union, split_by_size, split_into, Criterion,
    Found, Region, SparseRegion,
};
use crate::size::Size;
use crate::space::Space;

/// Set algebra on a region that must stay inside the extent of `bound`.
#[derive(Debug, Clone)]
pub struct RegionExpression<S: Space> {
    bound: Region<S>,
    current: Outcome<Region<S>>,
}

impl<S: Space> RegionExpression<S> {
    /// Fails unless `region` lies within `[bound.start, bound.end]`.
    pub fn new(bound: Region<S>, region: Region<S>) -> Self {
        if !region.space().same_space(bound.space()) {
            let error = space_mismatch(&bound, region.space());
            return Self::failed(bound, error);
        }
        if !within_extent(&region, &bound) {
            let error = out_of_bounds(&region, &bound);
            return Self::failed(bound, error);
        }
        Self {
            bound,
            current: Outcome::Success(region),
        }
    }

    pub(crate) fn failed(bound: Region<S>, error: RegionError) -> Self {
        let fallback = bound.space().empty();
        Self {
            bound,
            current: Outcome::failure(fallback, error),
        }
    }

    pub fn bound(&self) -> &Region<S> {
        &self.bound
    }

    pub fn outcome(&self) -> &Outcome<Region<S>> {
        &self.current
    }

    /// The resulting region, or the empty region.
    pub fn region(&self) -> Outcome<Region<S>> {
        self.current.clone()
    }

    pub fn into_outcome(self) -> Outcome<Region<S>> {
        self.current
    }

    fn with(&self, region: Region<S>) -> Self {
        Self::new(self.bound.clone(), region)
    }

    fn fail(&self, error: RegionError) -> Self {
        Self::failed(self.bound.clone(), error)
    }

    /// Applies `op` to the current region and a same-space operand.
    fn combine<F>(&self, other: &Region<S>, op: F) -> Self
    where
        F: FnOnce(&Region<S>, &Region<S>) -> Region<S>,
    {
        let current = match &self.current {
            Outcome::Success(region) => region,
            Outcome::Failure { .. } => return self.clone(),
        };
        if !other.space().same_space(current.space()) {
            return self.fail(space_mismatch(&self.bound, other.space()));
        }
        self.with(op(current, other))
    }

    pub fn union(&self, other: &Region<S>) -> Self {
        self.combine(other, |a, b| {
            Region::from_spans(a.space().clone(), compute_union(a.spans(), b.spans()))
        })
    }

    pub fn intersection(&self, other: &Region<S>) -> Self {
        self.combine(other, |a, b| {
            Region::from_spans(a.space().clone(), compute_intersection(a.spans(), b.spans()))
        })
    }

    /// Members of exactly one of the two regions. The two halves are
    /// concatenated, so pieces that merely touch stay separate sub-regions.
    pub fn difference(&self, other: &Region<S>) -> Self {
        self.combine(other, symmetric_difference)
    }

    /// Members of the current region that are not members of `other`.
    pub fn subtract(&self, other: &Region<S>) -> Self {
        self.combine(other, |a, b| {
            Region::from_spans(a.space().clone(), compute_subtract(a.spans(), b.spans()))
        })
    }

    /// Appends `other` as further sub-regions.
    pub fn concatenate(&self, other: &Region<S>) -> Self {
        self.combine(other, |a, b| {
            let mut builder = a.space().sparse_region_builder();
            builder.concatenate(a).concatenate(b);
            Region::from(builder.build())
        })
    }

    /// Every position of the space that is not a member.
    pub fn invert(&self) -> Self {
        match &self.current {
            Outcome::Success(region) => {
                self.with(symmetric_difference(&region.space().all(), region))
            }
            Outcome::Failure { .. } => self.clone(),
        }
    }

    /// Resizes to `size` units, growing or shrinking evenly about the
    /// centre of the current extent. An odd unit goes to the end.
    pub fn scale(&self, size: &Size<S>) -> Self {
        let current = match &self.current {
            Outcome::Success(region) => region,
            Outcome::Failure { .. } => return self.clone(),
        };
        let space = current.space();
        if !size.space().same_space(space) {
            return self.fail(space_mismatch(&self.bound, size.space()));
        }
        if current.size() == *size {
            return self.clone();
        }

        let unscalable = || RegionError::Unscalable {
            region: current.to_string(),
            size: size.to_string(),
        };
        let ratio = size.expr().ratio(&current.size());
        if !ratio.is_some_and(|r| r > 0.0) {
            trace!(region = %current, %size, "scale ratio is not positive");
            return self.fail(unscalable());
        }

        let (Some(start), Some(end)) = (current.start().coord(), current.end().coord()) else {
            return self.fail(unscalable());
        };
        let Some(grow) = size.units().checked_sub(current.extent_units()) else {
            return self.fail(unscalable());
        };
        let front = grow / 2;
        let back = grow - front;
        let scaled = front
            .checked_neg()
            .and_then(|steps| space.offset(&start, steps))
            .zip(space.offset(&end, back));
        match scaled {
            Some((start, end)) => self.with(space.span(start, end)),
            None => self.fail(unscalable()),
        }
    }

    /// Cuts the region into `count` chunks whose sizes differ by at most
    /// one. See [`Region::split`].
    pub fn split(&self, count: i64) -> SparseRegion<S> {
        match &self.current {
            Outcome::Success(region) => split_into(region, count),
            Outcome::Failure { .. } => self.bound.space().sparse_region_builder().build(),
        }
    }

    /// Cuts the region into chunks of `size` units; the last chunk may be
    /// shorter. A `none`, negative or foreign size yields an empty sparse
    /// region, a size covering the whole region yields the region itself.
    pub fn split_by(&self, size: &Size<S>) -> SparseRegion<S> {
        let space = self.bound.space();
        let empty = || space.sparse_region_builder().build();
        let current = match &self.current {
            Outcome::Success(region) => region,
            Outcome::Failure { .. } => return empty(),
        };
        if !size.space().same_space(space) || size.units() <= 0 {
            return empty();
        }
        if size.units() < current.size().units() {
            split_by_size(current, size.units())
        } else {
            space.sparse_region_builder().concatenate(current).build()
        }
    }

    /// Binary search over the current region.
    pub fn search<C: Criterion<S> + ?Sized>(&self, criterion: &C) -> Option<Found<S>> {
        self.current.value().search(criterion)
    }
}

fn symmetric_difference<S: Space>(a: &Region<S>, b: &Region<S>) -> Region<S> {
    let space = a.space();
    let left = Region::from_spans(space.clone(), compute_subtract(a.spans(), b.spans()));
    let right = Region::from_spans(space.clone(), compute_subtract(b.spans(), a.spans()));
    let mut builder = space.sparse_region_builder();
    builder.concatenate(&left).concatenate(&right);
    Region::from(builder.build())
}

/// Returns true if `region` lies within `[bound.start, bound.end]`.
fn within_extent<S: Space>(region: &Region<S>, bound: &Region<S>) -> bool {
    if region.is_empty() {
        return true;
    }
    let order = bound.space().order();
    order.compare(&bound.start(), &region.start()).is_le()
        && order.compare(&region.end(), &bound.end()).is_le()
}
