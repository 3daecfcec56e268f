use super::Region;
use crate::order::{Comparison, Order};
use crate::position::PositionOrder;
use crate::size::SizeOrder;
use crate::space::Space;

/// The order of regions within a space.
///
/// Regions compare by start, then by end. Ties are broken by:
///
/// 1. larger size first (a contiguous region ranks before a sparse region
///    with the same endpoints),
/// 2. fewer sub-regions first,
/// 3. the sub-regions themselves, pairwise by start then end.
///
/// The empty region ranks before every non-empty region of its space.
/// Regions of different spaces are [`Comparison::Incomparable`].
///
/// This is a total order over the span lists, so it can tell apart regions
/// that `==` (set equality) considers equal, e.g. `[0,9]` and
/// `{[0,4],[5,9]}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionOrder;

impl<S: Space> Order<Region<S>> for RegionOrder {
    fn compare(&self, left: &Region<S>, right: &Region<S>) -> Comparison {
        if !left.space().same_space(right.space()) {
            return Comparison::Incomparable;
        }
        match (left.is_empty(), right.is_empty()) {
            (true, true) => return Comparison::Equal,
            (true, false) => return Comparison::Less,
            (false, true) => return Comparison::Greater,
            (false, false) => {}
        }

        PositionOrder
            .compare(&left.start(), &right.start())
            .then_with(|| PositionOrder.compare(&left.end(), &right.end()))
            .then_with(|| SizeOrder.compare(&left.size(), &right.size()).reverse())
            .then_with(|| left.num_regions().cmp(&right.num_regions()).into())
            .then_with(|| {
                let space = left.space();
                left.spans()
                    .iter()
                    .zip(right.spans())
                    .map(|(l, r)| {
                        space
                            .compare_coords(&l.start, &r.start)
                            .then_with(|| space.compare_coords(&l.end, &r.end))
                    })
                    .find(|c| !c.is_eq())
                    .unwrap_or(Comparison::Equal)
            })
    }
}
