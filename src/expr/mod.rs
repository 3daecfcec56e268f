//! Bounded arithmetic and region algebra.
//!
//! An expression pairs a value with the region that bounds it. Operations
//! return new expressions, so they chain:
//!
//! ```ignore
//! let end = space.expr(space.index(3)).add(&space.length(4)).next().position();
//! ```
//!
//! Any step that leaves the bound, mixes spaces or divides by `none` turns the
//! expression into a failure carrying the space's sentinel (out-of-bounds
//! position, `none` size, empty region). Later steps leave a failed
//! expression untouched, so the first error is the one reported.

mod position;
mod region;
mod size;

pub use position::PositionExpression;
pub use region::RegionExpression;
pub use size::SizeExpression;

use tracing::trace;

use crate::error::RegionError;
use crate::region::Region;
use crate::space::Space;

/// Error for an operand that belongs to another space than the bound.
fn space_mismatch<S: Space>(bound: &Region<S>, other: &S) -> RegionError {
    let error = RegionError::SpaceMismatch {
        left: bound.space().id(),
        right: other.id(),
    };
    trace!(%error, "expression operand from another space");
    error
}

/// Error for a result that lies outside the bound.
fn out_of_bounds<S: Space>(value: impl std::fmt::Display, bound: &Region<S>) -> RegionError {
    let error = RegionError::OutOfBounds {
        value: value.to_string(),
        bound: bound.to_string(),
    };
    trace!(%error, "expression left its bound");
    error
}
