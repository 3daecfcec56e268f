//! Four-state comparisons and pluggable orders.
//!
//! Every ordering decision in the crate goes through an [`Order`]. Unlike
//! [`std::cmp::Ordering`], a [`Comparison`] can be [`Comparison::Incomparable`],
//! which is what values from two different spaces produce.

use std::cmp::Ordering;

/// Result of comparing two values under an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    /// The operands cannot be ordered (e.g. they belong to different spaces).
    Incomparable,
}

impl Comparison {
    pub const fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }

    /// Converts back to a std ordering; `None` for incomparable operands.
    pub const fn to_ordering(self) -> Option<Ordering> {
        match self {
            Comparison::Less => Some(Ordering::Less),
            Comparison::Equal => Some(Ordering::Equal),
            Comparison::Greater => Some(Ordering::Greater),
            Comparison::Incomparable => None,
        }
    }

    /// Swaps `Less` and `Greater`.
    pub const fn reverse(self) -> Self {
        match self {
            Comparison::Less => Comparison::Greater,
            Comparison::Greater => Comparison::Less,
            other => other,
        }
    }

    pub const fn is_comparable(self) -> bool {
        !matches!(self, Comparison::Incomparable)
    }

    pub const fn is_lt(self) -> bool {
        matches!(self, Comparison::Less)
    }

    pub const fn is_le(self) -> bool {
        matches!(self, Comparison::Less | Comparison::Equal)
    }

    pub const fn is_eq(self) -> bool {
        matches!(self, Comparison::Equal)
    }

    pub const fn is_ge(self) -> bool {
        matches!(self, Comparison::Greater | Comparison::Equal)
    }

    pub const fn is_gt(self) -> bool {
        matches!(self, Comparison::Greater)
    }

    /// Chains a second comparison when this one is `Equal`.
    pub fn then_with<F: FnOnce() -> Comparison>(self, f: F) -> Self {
        match self {
            Comparison::Equal => f(),
            other => other,
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        Comparison::from_ordering(ordering)
    }
}

impl From<Option<Ordering>> for Comparison {
    fn from(ordering: Option<Ordering>) -> Self {
        ordering
            .map(Comparison::from_ordering)
            .unwrap_or(Comparison::Incomparable)
    }
}

/// A consistent, transitive order over comparable pairs of `T`.
///
/// Implementations must return [`Comparison::Incomparable`] rather than
/// panicking when the operands cannot be ordered.
pub trait Order<T: ?Sized> {
    fn compare(&self, left: &T, right: &T) -> Comparison;

    /// Returns the smaller operand, or `None` if they are incomparable.
    /// Ties return `left`.
    fn min_of<'a>(&self, left: &'a T, right: &'a T) -> Option<&'a T> {
        match self.compare(left, right) {
            Comparison::Less | Comparison::Equal => Some(left),
            Comparison::Greater => Some(right),
            Comparison::Incomparable => None,
        }
    }

    /// Returns the larger operand, or `None` if they are incomparable.
    /// Ties return `left`.
    fn max_of<'a>(&self, left: &'a T, right: &'a T) -> Option<&'a T> {
        match self.compare(left, right) {
            Comparison::Greater | Comparison::Equal => Some(left),
            Comparison::Less => Some(right),
            Comparison::Incomparable => None,
        }
    }

    /// Stable insertion sort.
    ///
    /// An item only moves left past neighbours that compare greater, so an
    /// incomparable neighbour stops it. With pairwise comparable items the
    /// result is fully sorted; otherwise each run between incomparable
    /// items comes out sorted. Never panics, whatever the order returns.
    fn sort(&self, items: &mut [T])
    where
        T: Sized,
    {
        for i in 1..items.len() {
            let mut j = i;
            while j > 0 && self.compare(&items[j - 1], &items[j]).is_gt() {
                items.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}

impl<T: ?Sized, F> Order<T> for F
where
    F: Fn(&T, &T) -> Comparison,
{
    fn compare(&self, left: &T, right: &T) -> Comparison {
        self(left, right)
    }
}

/// Order derived from `PartialOrd`; NaN-like values are incomparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: PartialOrd + ?Sized> Order<T> for NaturalOrder {
    fn compare(&self, left: &T, right: &T) -> Comparison {
        left.partial_cmp(right).into()
    }
}

/// Reverses another order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<O>(pub O);

impl<T: ?Sized, O: Order<T>> Order<T> for Reversed<O> {
    fn compare(&self, left: &T, right: &T) -> Comparison {
        self.0.compare(left, right).reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_on_integers() {
        assert_eq!(NaturalOrder.compare(&1, &2), Comparison::Less);
        assert_eq!(NaturalOrder.compare(&2, &2), Comparison::Equal);
        assert_eq!(NaturalOrder.compare(&3, &2), Comparison::Greater);
    }

    #[test]
    fn natural_order_nan_is_incomparable() {
        assert_eq!(
            NaturalOrder.compare(&f64::NAN, &1.0),
            Comparison::Incomparable
        );
    }

    #[test]
    fn reversed_swaps_less_and_greater() {
        let order = Reversed(NaturalOrder);
        assert_eq!(order.compare(&1, &2), Comparison::Greater);
        assert_eq!(order.compare(&2, &2), Comparison::Equal);
        assert_eq!(
            order.compare(&f64::NAN, &1.0),
            Comparison::Incomparable
        );
    }

    #[test]
    fn closure_is_an_order() {
        let descending = |a: &i32, b: &i32| Comparison::from(b.cmp(a));
        assert_eq!(descending.compare(&1, &2), Comparison::Greater);
        assert_eq!(descending.compare(&2, &2), Comparison::Equal);
    }

    #[test]
    fn min_and_max_of() {
        assert_eq!(NaturalOrder.min_of(&4, &7), Some(&4));
        assert_eq!(NaturalOrder.max_of(&4, &7), Some(&7));
        assert_eq!(NaturalOrder.min_of(&f64::NAN, &1.0), None);
    }

    #[test]
    fn sort_with_reversed_order() {
        let mut items = vec![3, 1, 2];
        Reversed(NaturalOrder).sort(&mut items);
        assert_eq!(items, vec![3, 2, 1]);
    }

    #[test]
    fn sort_tolerates_incomparable_items() {
        let mut items = vec![3.0, f64::NAN, 2.0, 1.0, f64::NAN, 0.5];
        NaturalOrder.sort(&mut items);
        assert_eq!(items[0], 3.0);
        assert!(items[1].is_nan());
        assert_eq!(&items[2..4], &[1.0, 2.0]);
        assert!(items[4].is_nan());
        assert_eq!(items[5], 0.5);

        let mut mixed: Vec<f64> = (0..200)
            .map(|i| if i % 7 == 0 { f64::NAN } else { ((i * 37) % 101) as f64 })
            .collect();
        NaturalOrder.sort(&mut mixed);
        assert_eq!(mixed.len(), 200);
    }

    #[test]
    fn sort_is_stable() {
        let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        let by_key = |a: &(i32, char), b: &(i32, char)| Comparison::from(a.0.cmp(&b.0));
        by_key.sort(&mut items);
        assert_eq!(items, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn comparison_predicates() {
        assert!(Comparison::Less.is_le());
        assert!(Comparison::Equal.is_ge());
        assert!(!Comparison::Incomparable.is_le());
        assert!(!Comparison::Incomparable.is_ge());
        assert!(!Comparison::Incomparable.is_comparable());
        assert_eq!(Comparison::Less.to_ordering(), Some(Ordering::Less));
        assert_eq!(Comparison::Incomparable.to_ordering(), None);
    }

    #[test]
    fn then_with_only_breaks_ties() {
        assert_eq!(
            Comparison::Equal.then_with(|| Comparison::Less),
            Comparison::Less
        );
        assert_eq!(
            Comparison::Greater.then_with(|| Comparison::Less),
            Comparison::Greater
        );
    }
}
