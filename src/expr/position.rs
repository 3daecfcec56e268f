use tracing::trace;

use super::{out_of_bounds, space_mismatch, RegionExpression, SizeExpression};
use crate::error::RegionError;
use crate::outcome::Outcome;
use crate::position::Position;
use crate::region::Region;
use crate::size::Size;
use crate::space::Space;

/// Arithmetic on a position that must stay inside `bound`.
#[derive(Debug, Clone)]
pub struct PositionExpression<S: Space> {
    bound: Region<S>,
    current: Outcome<Position<S>>,
}

impl<S: Space> PositionExpression<S> {
    /// Fails unless `position` is a member of `bound`.
    pub fn new(bound: Region<S>, position: Position<S>) -> Self {
        if !position.space().same_space(bound.space()) {
            let error = space_mismatch(&bound, position.space());
            return Self::failed(bound, error);
        }
        if !bound.contains(&position) {
            let error = out_of_bounds(&position, &bound);
            return Self::failed(bound, error);
        }
        Self {
            bound,
            current: Outcome::Success(position),
        }
    }

    fn failed(bound: Region<S>, error: RegionError) -> Self {
        let fallback = bound.space().out_of_bounds();
        Self {
            bound,
            current: Outcome::failure(fallback, error),
        }
    }

    pub fn bound(&self) -> &Region<S> {
        &self.bound
    }

    pub fn outcome(&self) -> &Outcome<Position<S>> {
        &self.current
    }

    /// The resulting position, or the out-of-bounds sentinel.
    pub fn position(&self) -> Outcome<Position<S>> {
        self.current.clone()
    }

    pub fn into_outcome(self) -> Outcome<Position<S>> {
        self.current
    }

    fn coord(&self) -> Option<S::Coord> {
        match &self.current {
            Outcome::Success(position) => position.coord(),
            Outcome::Failure { .. } => None,
        }
    }

    /// Moves to `coord` if it is a member of the bound.
    fn moved_to(&self, coord: Option<S::Coord>, what: impl FnOnce() -> String) -> Self {
        let space = self.bound.space();
        match coord {
            Some(coord) => Self::new(self.bound.clone(), space.position(coord)),
            None => Self::failed(self.bound.clone(), out_of_bounds(what(), &self.bound)),
        }
    }

    /// Offsets by `size` unit steps, then requires membership in the bound.
    pub fn add(&self, size: &Size<S>) -> Self {
        let Some(coord) = self.coord() else {
            return self.clone();
        };
        if !size.space().same_space(self.bound.space()) {
            return Self::failed(self.bound.clone(), space_mismatch(&self.bound, size.space()));
        }
        let moved = self.bound.space().offset(&coord, size.units());
        self.moved_to(moved, || format!("{} + {}", coord, size))
    }

    pub fn subtract(&self, size: &Size<S>) -> Self {
        let Some(coord) = self.coord() else {
            return self.clone();
        };
        if !size.space().same_space(self.bound.space()) {
            return Self::failed(self.bound.clone(), space_mismatch(&self.bound, size.space()));
        }
        let moved = size
            .units()
            .checked_neg()
            .and_then(|steps| self.bound.space().offset(&coord, steps));
        self.moved_to(moved, || format!("{} - {}", coord, size))
    }

    /// The next member of the bound, skipping gaps.
    pub fn next(&self) -> Self {
        let Some(coord) = self.coord() else {
            return self.clone();
        };
        let moved = self.bound.successor(&coord);
        self.moved_to(moved, || format!("next({})", coord))
    }

    /// The previous member of the bound, skipping gaps.
    pub fn previous(&self) -> Self {
        let Some(coord) = self.coord() else {
            return self.clone();
        };
        let moved = self.bound.predecessor(&coord);
        self.moved_to(moved, || format!("previous({})", coord))
    }

    /// Signed distance from `other` to this position.
    pub fn subtract_position(&self, other: &Position<S>) -> SizeExpression<S> {
        let space = self.bound.space();
        let coord = match &self.current {
            Outcome::Success(position) => position.coord(),
            Outcome::Failure { error, .. } => {
                return SizeExpression::failed(self.bound.clone(), error.clone())
            }
        };
        if !other.space().same_space(space) {
            return SizeExpression::failed(self.bound.clone(), space_mismatch(&self.bound, other.space()));
        }
        let distance = coord
            .zip(other.coord())
            .and_then(|(to, from)| space.steps_between(&from, &to));
        match distance {
            Some(units) => SizeExpression::new(self.bound.clone(), space.size(units)),
            None => SizeExpression::failed(
                self.bound.clone(),
                RegionError::Incomparable {
                    left: self.current.value().to_string(),
                    right: other.to_string(),
                },
            ),
        }
    }

    /// Offset from the space origin, modulo `size`.
    pub fn modulo(&self, size: &Size<S>) -> SizeExpression<S> {
        let space = self.bound.space();
        let coord = match &self.current {
            Outcome::Success(position) => position.coord(),
            Outcome::Failure { error, .. } => {
                return SizeExpression::failed(self.bound.clone(), error.clone())
            }
        };
        if !size.space().same_space(space) {
            return SizeExpression::failed(self.bound.clone(), space_mismatch(&self.bound, size.space()));
        }
        if size.is_none() {
            trace!(position = %self.current.value(), "modulo by none size");
            return SizeExpression::failed(
                self.bound.clone(),
                RegionError::NoneSize {
                    operation: "modulo",
                },
            );
        }
        let remainder = coord
            .and_then(|coord| space.steps_between(&space.origin_coord(), &coord))
            .and_then(|offset| offset.checked_rem_euclid(size.units()));
        match remainder {
            Some(units) => SizeExpression::new(self.bound.clone(), space.size(units)),
            None => SizeExpression::failed(
                self.bound.clone(),
                out_of_bounds(format!("{} % {}", self.current.value(), size), &self.bound),
            ),
        }
    }

    /// The region from this position to `end`, bounded like this expression.
    pub fn to(&self, end: &Position<S>) -> RegionExpression<S> {
        match &self.current {
            Outcome::Success(start) => {
                let space = self.bound.space();
                if !end.space().same_space(space) {
                    return RegionExpression::failed(
                        self.bound.clone(),
                        space_mismatch(&self.bound, end.space()),
                    );
                }
                RegionExpression::new(self.bound.clone(), space.region(start, end))
            }
            Outcome::Failure { error, .. } => {
                RegionExpression::failed(self.bound.clone(), error.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ArraySpace;

    #[test]
    fn add_within_bound() {
        let space = ArraySpace::standard();
        let p = space.expr(space.index(3)).add(&space.length(4)).position();
        assert_eq!(p, Outcome::Success(space.index(7)));
    }

    #[test]
    fn max_plus_one_is_out_of_bounds() {
        let space = ArraySpace::with_bounds(0, 99).unwrap();
        let p = space.expr(space.max()).add(&space.one()).position();
        assert!(p.is_failure());
        assert!(p.value().is_out_of_bounds());
        assert!(matches!(p.error(), Some(RegionError::OutOfBounds { .. })));
    }

    #[test]
    fn min_minus_one_is_out_of_bounds() {
        let space = ArraySpace::standard();
        let p = space.expr(space.min()).subtract(&space.one()).position();
        assert!(p.value().is_out_of_bounds());
    }

    #[test]
    fn failure_is_sticky() {
        let space = ArraySpace::with_bounds(0, 9).unwrap();
        let e = space.expr(space.index(9)).add(&space.one());
        let error = e.outcome().error().cloned();
        let later = e.subtract(&space.length(5)).next();
        assert!(later.outcome().is_failure());
        assert_eq!(later.outcome().error().cloned(), error);
    }

    #[test]
    fn start_outside_bound_fails() {
        let space = ArraySpace::standard();
        let e = space.range(0, 9).expr_at(&space.index(20));
        assert!(e.outcome().is_failure());
    }

    #[test]
    fn next_and_previous_skip_gaps() {
        let space = ArraySpace::standard();
        let bound = space.range(0, 4).union(&space.range(10, 14)).or_sentinel();
        let e = bound.expr_at(&space.index(4));
        assert_eq!(e.next().position(), Outcome::Success(space.index(10)));
        assert_eq!(
            e.next().previous().position(),
            Outcome::Success(space.index(4))
        );
        assert!(bound.expr_at(&space.index(14)).next().outcome().is_failure());
        assert!(bound.expr_at(&space.index(0)).previous().outcome().is_failure());
    }

    #[test]
    fn add_into_a_gap_fails() {
        let space = ArraySpace::standard();
        let bound = space.range(0, 4).union(&space.range(10, 14)).or_sentinel();
        assert!(bound
            .expr_at(&space.index(3))
            .add(&space.length(3))
            .outcome()
            .is_failure());
        assert!(bound
            .expr_at(&space.index(3))
            .add(&space.length(8))
            .outcome()
            .is_success());
    }

    #[test]
    fn distance_between_positions_is_signed() {
        let space = ArraySpace::standard();
        let forward = space.expr(space.index(10)).subtract_position(&space.index(4));
        assert_eq!(forward.size(), Outcome::Success(space.length(6)));
        let backward = space.expr(space.index(4)).subtract_position(&space.index(10));
        assert_eq!(backward.size(), Outcome::Success(space.size(-6)));
    }

    #[test]
    fn modulo_is_offset_from_origin() {
        let space = ArraySpace::with_bounds(100, 200).unwrap();
        let m = space.expr(space.index(117)).modulo(&space.length(5));
        assert_eq!(m.size(), Outcome::Success(space.length(2)));
        let by_none = space.expr(space.index(117)).modulo(&space.none());
        assert_eq!(
            by_none.size().error(),
            Some(&RegionError::NoneSize { operation: "modulo" })
        );
    }

    #[test]
    fn to_builds_region_in_same_bound() {
        let space = ArraySpace::standard();
        let bound = space.range(0, 20);
        let r = bound.expr_at(&space.index(5)).to(&space.index(9));
        assert_eq!(r.bound(), &bound);
        assert_eq!(r.region(), Outcome::Success(space.range(5, 9)));
    }

    #[test]
    fn cross_space_operand_fails() {
        let a = ArraySpace::with_bounds(0, 9).unwrap();
        let b = ArraySpace::with_bounds(0, 9).unwrap();
        let p = a.expr(a.index(1)).add(&b.one()).position();
        assert!(matches!(p.error(), Some(RegionError::SpaceMismatch { .. })));
        assert!(p.value().is_out_of_bounds());
        let foreign = a.expr(b.index(1)).position();
        assert!(foreign.is_failure());
    }
}
