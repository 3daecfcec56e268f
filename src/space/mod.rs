//! Addressing domains.
//!
//! A [`Space`] anchors one addressing domain: it supplies the domain's
//! bounds, its unit step, its sentinels and the [`Order`](crate::order::Order)
//! every comparison goes through. Positions, sizes and regions always belong
//! to exactly one space; mixing spaces never panics, it degrades to the
//! space's sentinels.
//!
//! Two domains ship with the crate:
//!
//! | Space            | Coordinate | Unit step                      |
//! |------------------|------------|--------------------------------|
//! | [`ArraySpace`]   | `u64`      | one array element              |
//! | [`TimeSpace<U>`] | `i64` tick | one interval of a `qtty` unit  |

mod array;
mod time;

pub use array::{ArraySpace, ArraySpaceConfig};
pub use time::{TimeSpace, TimeSpaceConfig};

use std::fmt::{self, Debug, Display};

use uuid::Uuid;

use crate::error::SpaceError;
use crate::expr::{PositionExpression, RegionExpression, SizeExpression};
use crate::order::Comparison;
use crate::position::{Position, PositionOrder};
use crate::region::{Region, Span, SpanRecord, SparseRegionBuilder};
use crate::size::Size;

/// Identity of one space instance.
///
/// Clones of a space share its id; independently constructed spaces get a
/// fresh UUID, so their values are mutually incomparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(Uuid);

impl SpaceId {
    /// Generates a new unique identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One discrete, ordered addressing domain.
///
/// Implementors provide the raw coordinate primitives; everything else
/// (sentinels, region construction, expression factories) is derived from
/// them and must not be overridden with different semantics.
///
/// # Contract
///
/// - `compare_coords` is consistent and transitive.
/// - `min_coord() <= max_coord()` under `compare_coords` (checked by the
///   constructors of the concrete spaces).
/// - `offset` returns `None` instead of leaving `[min, max]` or overflowing.
/// - `steps_between(a, b)` is the signed number of unit steps from `a` to
///   `b`, `None` if it does not fit an `i64`.
pub trait Space: Clone + Debug + Sized {
    /// Raw coordinate of a position inside the domain.
    type Coord: Copy + Debug + Display + PartialEq;

    fn id(&self) -> SpaceId;

    fn min_coord(&self) -> Self::Coord;

    fn max_coord(&self) -> Self::Coord;

    fn origin_coord(&self) -> Self::Coord {
        self.min_coord()
    }

    fn compare_coords(&self, left: &Self::Coord, right: &Self::Coord) -> Comparison;

    /// Moves `coord` by `steps` unit steps (negative moves backwards).
    fn offset(&self, coord: &Self::Coord, steps: i64) -> Option<Self::Coord>;

    fn steps_between(&self, from: &Self::Coord, to: &Self::Coord) -> Option<i64>;

    fn same_space(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Returns true if `coord` lies within `[min, max]`.
    fn contains_coord(&self, coord: &Self::Coord) -> bool {
        self.compare_coords(&self.min_coord(), coord).is_le()
            && self.compare_coords(coord, &self.max_coord()).is_le()
    }

    /// Position at `coord`, or the out-of-bounds sentinel outside the domain.
    fn position(&self, coord: Self::Coord) -> Position<Self> {
        if self.contains_coord(&coord) {
            Position::at(self.clone(), coord)
        } else {
            self.out_of_bounds()
        }
    }

    fn min(&self) -> Position<Self> {
        self.position(self.min_coord())
    }

    fn max(&self) -> Position<Self> {
        self.position(self.max_coord())
    }

    fn origin(&self) -> Position<Self> {
        self.position(self.origin_coord())
    }

    fn out_of_bounds(&self) -> Position<Self> {
        Position::out_of_bounds(self.clone())
    }

    /// A size of `units` unit steps.
    fn size(&self, units: i64) -> Size<Self> {
        Size::new(self.clone(), units)
    }

    /// The absorbing, zero-length size.
    fn none(&self) -> Size<Self> {
        self.size(0)
    }

    /// One unit step.
    fn one(&self) -> Size<Self> {
        self.size(1)
    }

    fn order(&self) -> PositionOrder {
        PositionOrder
    }

    /// Builds the contiguous region `[start, end]`.
    ///
    /// Returns the empty region if `start > end`, if either endpoint is out
    /// of bounds, or if either belongs to another space.
    fn region(&self, start: &Position<Self>, end: &Position<Self>) -> Region<Self> {
        if !start.space().same_space(self) || !end.space().same_space(self) {
            return self.empty();
        }
        match (start.coord(), end.coord()) {
            (Some(s), Some(e)) if self.compare_coords(&s, &e).is_le() => {
                Region::Contiguous(Span::new(self.clone(), s, e))
            }
            _ => self.empty(),
        }
    }

    /// Builds `[start, end]` from raw coordinates.
    fn span(&self, start: Self::Coord, end: Self::Coord) -> Region<Self> {
        self.region(&self.position(start), &self.position(end))
    }

    /// The whole domain `[min, max]`.
    fn all(&self) -> Region<Self> {
        self.region(&self.min(), &self.max())
    }

    fn empty(&self) -> Region<Self> {
        Region::Empty(self.clone())
    }

    /// Wraps a position, size or region in its expression, bounded by
    /// [`Space::all`].
    fn expr<T: Express<Self>>(&self, value: T) -> T::Expression {
        value.express(self.all())
    }

    fn sparse_region_builder(&self) -> SparseRegionBuilder<Self> {
        SparseRegionBuilder::new(self.clone())
    }

    /// Rebuilds a region from the records produced by
    /// [`Region::to_records`].
    fn region_from_records(
        &self,
        records: &[SpanRecord<Self::Coord>],
    ) -> Result<Region<Self>, SpaceError> {
        let mut builder = self.sparse_region_builder();
        for record in records {
            let region = self.span(record.start, record.end);
            if region.is_empty() {
                return Err(SpaceError::InvalidRecord {
                    start: record.start.to_string(),
                    end: record.end.to_string(),
                });
            }
            builder.concatenate(&region);
        }
        Ok(Region::from(builder.build()))
    }
}

/// Values that can be wrapped in a bounded expression.
pub trait Express<S: Space> {
    type Expression;

    fn express(self, bound: Region<S>) -> Self::Expression;
}

impl<S: Space> Express<S> for Position<S> {
    type Expression = PositionExpression<S>;

    fn express(self, bound: Region<S>) -> PositionExpression<S> {
        PositionExpression::new(bound, self)
    }
}

impl<S: Space> Express<S> for &Position<S> {
    type Expression = PositionExpression<S>;

    fn express(self, bound: Region<S>) -> PositionExpression<S> {
        PositionExpression::new(bound, self.clone())
    }
}

impl<S: Space> Express<S> for Size<S> {
    type Expression = SizeExpression<S>;

    fn express(self, bound: Region<S>) -> SizeExpression<S> {
        SizeExpression::new(bound, self)
    }
}

impl<S: Space> Express<S> for &Size<S> {
    type Expression = SizeExpression<S>;

    fn express(self, bound: Region<S>) -> SizeExpression<S> {
        SizeExpression::new(bound, self.clone())
    }
}

impl<S: Space> Express<S> for Region<S> {
    type Expression = RegionExpression<S>;

    fn express(self, bound: Region<S>) -> RegionExpression<S> {
        RegionExpression::new(bound, self)
    }
}

impl<S: Space> Express<S> for &Region<S> {
    type Expression = RegionExpression<S>;

    fn express(self, bound: Region<S>) -> RegionExpression<S> {
        RegionExpression::new(bound, self.clone())
    }
}
