//! Array index domain.

use tracing::debug;

use super::{Space, SpaceId};
use crate::error::SpaceError;
use crate::order::Comparison;
use crate::position::Position;
use crate::region::Region;
use crate::size::Size;

/// Identity shared by every [`ArraySpace::standard`] instance.
const STANDARD_ID: SpaceId = SpaceId::from_u128(0x5d1c_7a2e_0b44_4f7e_9a61_3c0d_a11a_0001);

/// Highest index of the standard space; `[0, STANDARD_MAX]` holds exactly
/// `i64::MAX` positions.
const STANDARD_MAX: u64 = i64::MAX as u64 - 1;

/// Bounds of an array index space.
///
/// A space may hold at most `i64::MAX` positions, so `max - min` must stay
/// below `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArraySpaceConfig {
    /// Lowest valid index.
    pub min: u64,
    /// Highest valid index (inclusive).
    pub max: u64,
}

impl Default for ArraySpaceConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: STANDARD_MAX,
        }
    }
}

/// Indices `[min, max]` of an array, one element per unit step.
#[derive(Debug, Clone, Copy)]
pub struct ArraySpace {
    id: SpaceId,
    min: u64,
    max: u64,
}

impl ArraySpace {
    /// The default space `[0, i64::MAX - 1]`; every call returns the same space.
    pub const fn standard() -> Self {
        Self {
            id: STANDARD_ID,
            min: 0,
            max: STANDARD_MAX,
        }
    }

    /// Creates a new, distinct space from `config`.
    pub fn new(config: ArraySpaceConfig) -> Result<Self, SpaceError> {
        if config.min > config.max {
            return Err(SpaceError::InvalidBounds {
                min: config.min.to_string(),
                max: config.max.to_string(),
            });
        }
        if config.max - config.min > STANDARD_MAX {
            return Err(SpaceError::TooManyPositions {
                min: config.min.to_string(),
                max: config.max.to_string(),
            });
        }
        let space = Self {
            id: SpaceId::generate(),
            min: config.min,
            max: config.max,
        };
        debug!(space = %space.id, min = space.min, max = space.max, "created array space");
        Ok(space)
    }

    pub fn with_bounds(min: u64, max: u64) -> Result<Self, SpaceError> {
        Self::new(ArraySpaceConfig { min, max })
    }

    pub fn config(&self) -> ArraySpaceConfig {
        ArraySpaceConfig {
            min: self.min,
            max: self.max,
        }
    }

    /// Position of array element `index`.
    pub fn index(&self, index: u64) -> Position<Self> {
        self.position(index)
    }

    /// Size of `length` elements.
    pub fn length(&self, length: i64) -> Size<Self> {
        self.size(length)
    }

    /// The contiguous index range `[start, end]`.
    pub fn range(&self, start: u64, end: u64) -> Region<Self> {
        self.span(start, end)
    }
}

impl PartialEq for ArraySpace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArraySpace {}

impl Space for ArraySpace {
    type Coord = u64;

    fn id(&self) -> SpaceId {
        self.id
    }

    fn min_coord(&self) -> u64 {
        self.min
    }

    fn max_coord(&self) -> u64 {
        self.max
    }

    fn compare_coords(&self, left: &u64, right: &u64) -> Comparison {
        left.cmp(right).into()
    }

    fn offset(&self, coord: &u64, steps: i64) -> Option<u64> {
        let moved = if steps >= 0 {
            coord.checked_add(steps as u64)?
        } else {
            coord.checked_sub(steps.unsigned_abs())?
        };
        (self.min..=self.max).contains(&moved).then_some(moved)
    }

    fn steps_between(&self, from: &u64, to: &u64) -> Option<i64> {
        i64::try_from(*to as i128 - *from as i128).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_a_single_space() {
        assert_eq!(ArraySpace::standard(), ArraySpace::standard());
        assert_eq!(ArraySpace::standard().index(3), ArraySpace::standard().index(3));
    }

    #[test]
    fn new_spaces_are_distinct() {
        let a = ArraySpace::with_bounds(0, 10).unwrap();
        let b = ArraySpace::with_bounds(0, 10).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn min_greater_than_max_is_rejected() {
        let err = ArraySpace::with_bounds(10, 3).unwrap_err();
        assert_eq!(
            err,
            SpaceError::InvalidBounds {
                min: "10".to_string(),
                max: "3".to_string()
            }
        );
    }

    #[test]
    fn position_count_must_fit_a_size() {
        assert_eq!(
            ArraySpace::with_bounds(0, u64::MAX).unwrap_err(),
            SpaceError::TooManyPositions {
                min: "0".to_string(),
                max: u64::MAX.to_string()
            }
        );
        assert!(ArraySpace::with_bounds(0, i64::MAX as u64).is_err());
        let widest = ArraySpace::with_bounds(1, i64::MAX as u64).unwrap();
        assert_eq!(widest.all().size().units(), i64::MAX);
        let shifted = ArraySpace::with_bounds(u64::MAX - (i64::MAX as u64 - 1), u64::MAX).unwrap();
        assert_eq!(shifted.all().size().units(), i64::MAX);
    }

    #[test]
    fn standard_space_size_is_exact() {
        let space = ArraySpace::standard();
        assert_eq!(space.max(), space.index(i64::MAX as u64 - 1));
        assert_eq!(space.all().size().units(), i64::MAX);
    }

    #[test]
    fn degenerate_single_index_space() {
        let space = ArraySpace::with_bounds(5, 5).unwrap();
        assert_eq!(space.min(), space.max());
        assert_eq!(space.all().size().units(), 1);
    }

    #[test]
    fn default_config_matches_standard_bounds() {
        let config = ArraySpaceConfig::default();
        assert_eq!(config, ArraySpace::standard().config());
    }

    #[test]
    fn offset_stays_within_bounds() {
        let space = ArraySpace::with_bounds(2, 8).unwrap();
        assert_eq!(space.offset(&2, 6), Some(8));
        assert_eq!(space.offset(&8, 1), None);
        assert_eq!(space.offset(&2, -1), None);
        assert_eq!(space.offset(&0, -1), None);
        assert_eq!(space.offset(&u64::MAX, 1), None);
    }

    #[test]
    fn steps_between_is_signed() {
        let space = ArraySpace::standard();
        assert_eq!(space.steps_between(&3, &10), Some(7));
        assert_eq!(space.steps_between(&10, &3), Some(-7));
        assert_eq!(space.steps_between(&0, &u64::MAX), None);
    }

    #[test]
    fn sentinels() {
        let space = ArraySpace::with_bounds(0, 99).unwrap();
        assert_eq!(space.origin(), space.index(0));
        assert_eq!(space.none().units(), 0);
        assert_eq!(space.one().units(), 1);
        assert!(space.out_of_bounds().is_out_of_bounds());
        assert!(space.index(100).is_out_of_bounds());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_roundtrip() {
        let config = ArraySpaceConfig { min: 4, max: 400 };
        let json = serde_json::to_string(&config).unwrap();
        let back: ArraySpaceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
