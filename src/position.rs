//! Positions: single addressable points of a space.

use std::fmt::{self, Display};

use crate::expr::PositionExpression;
use crate::order::{Comparison, Order};
use crate::space::Space;

/// A single point of one [`Space`], or that space's out-of-bounds sentinel.
#[derive(Debug, Clone)]
pub struct Position<S: Space> {
    space: S,
    coord: Option<S::Coord>,
}

impl<S: Space> Position<S> {
    /// Position at `coord`; callers guarantee the coordinate is in the domain.
    pub(crate) fn at(space: S, coord: S::Coord) -> Self {
        Self {
            space,
            coord: Some(coord),
        }
    }

    pub(crate) fn out_of_bounds(space: S) -> Self {
        Self { space, coord: None }
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    /// Raw coordinate; `None` for the out-of-bounds sentinel.
    pub fn coord(&self) -> Option<S::Coord> {
        self.coord
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.coord.is_none()
    }

    /// Arithmetic on this position, bounded by the whole space.
    pub fn expr(&self) -> PositionExpression<S> {
        self.space.expr(self)
    }
}

impl<S: Space> PartialEq for Position<S> {
    fn eq(&self, other: &Self) -> bool {
        PositionOrder.compare(self, other).is_eq()
    }
}

impl<S: Space> Display for Position<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coord {
            Some(coord) => write!(f, "{}", coord),
            None => write!(f, "out_of_bounds"),
        }
    }
}

/// The order of positions within a space.
///
/// Positions of different spaces are [`Comparison::Incomparable`]. The
/// out-of-bounds sentinel equals itself and is incomparable with every
/// in-bounds position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionOrder;

impl<S: Space> Order<Position<S>> for PositionOrder {
    fn compare(&self, left: &Position<S>, right: &Position<S>) -> Comparison {
        if !left.space.same_space(&right.space) {
            return Comparison::Incomparable;
        }
        match (&left.coord, &right.coord) {
            (Some(l), Some(r)) => left.space.compare_coords(l, r),
            (None, None) => Comparison::Equal,
            _ => Comparison::Incomparable,
        }
    }
}
