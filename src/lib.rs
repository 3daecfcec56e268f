//! regionalg - region algebra over ordered index domains
//!
//! Positions, sizes and regions of arbitrary discrete addressing domains
//! (array indices, timeline ticks), with a total set algebra over regions
//! and bounded arithmetic that degrades to sentinels instead of panicking.

pub mod error;
pub mod expr;
pub mod order;
pub mod outcome;
pub mod position;
pub mod region;
pub mod size;
pub mod space;

pub use error::{RegionError, SpaceError};
pub use expr::{PositionExpression, RegionExpression, SizeExpression};
pub use order::{Comparison, NaturalOrder, Order, Reversed};
pub use outcome::Outcome;
pub use position::{Position, PositionOrder};
pub use region::{
    Criterion, Found, Region, RegionOrder, Span, SpanRecord, SparseRegion, SparseRegionBuilder,
    SpecificPosition,
};
pub use size::{Size, SizeOrder};
pub use space::{ArraySpace, ArraySpaceConfig, Express, Space, SpaceId, TimeSpace, TimeSpaceConfig};
