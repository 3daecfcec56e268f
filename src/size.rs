//! Sizes: signed magnitudes measured in unit steps of a space.

use std::fmt::{self, Display};

use crate::expr::SizeExpression;
use crate::order::{Comparison, Order};
use crate::space::Space;

/// A magnitude or offset of one [`Space`], counted in unit steps.
///
/// `none` (zero units) is the absorbing element, `one` is the unit step.
/// Distances between positions may be negative.
#[derive(Debug, Clone)]
pub struct Size<S: Space> {
    space: S,
    units: i64,
}

impl<S: Space> Size<S> {
    pub(crate) fn new(space: S, units: i64) -> Self {
        Self { space, units }
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn is_none(&self) -> bool {
        self.units == 0
    }

    /// Arithmetic on this size, bounded by the whole space.
    pub fn expr(&self) -> SizeExpression<S> {
        self.space.expr(self)
    }
}

impl<S: Space> PartialEq for Size<S> {
    fn eq(&self, other: &Self) -> bool {
        SizeOrder.compare(self, other).is_eq()
    }
}

impl<S: Space> Display for Size<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.units == 1 {
            write!(f, "1 unit")
        } else {
            write!(f, "{} units", self.units)
        }
    }
}

/// Orders sizes of the same space by their unit count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeOrder;

impl<S: Space> Order<Size<S>> for SizeOrder {
    fn compare(&self, left: &Size<S>, right: &Size<S>) -> Comparison {
        if !left.space.same_space(&right.space) {
            return Comparison::Incomparable;
        }
        left.units.cmp(&right.units).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ArraySpace;

    #[test]
    fn none_and_one_differ() {
        let space = ArraySpace::standard();
        assert!(space.none().is_none());
        assert!(!space.one().is_none());
        assert_ne!(space.none(), space.one());
    }

    #[test]
    fn sizes_order_by_units() {
        let space = ArraySpace::standard();
        assert_eq!(
            SizeOrder.compare(&space.length(3), &space.length(5)),
            Comparison::Less
        );
        assert_eq!(
            SizeOrder.compare(&space.size(-2), &space.none()),
            Comparison::Less
        );
    }

    #[test]
    fn cross_space_sizes_are_incomparable() {
        let a = ArraySpace::with_bounds(0, 9).unwrap();
        let b = ArraySpace::with_bounds(0, 9).unwrap();
        assert_eq!(
            SizeOrder.compare(&a.one(), &b.one()),
            Comparison::Incomparable
        );
    }

    #[test]
    fn display() {
        let space = ArraySpace::standard();
        assert_eq!(space.one().to_string(), "1 unit");
        assert_eq!(space.length(4).to_string(), "4 units");
    }
}
