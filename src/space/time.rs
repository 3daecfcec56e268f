//! Timeline domain: ticks of a fixed `qtty` interval.
//!
//! A [`TimeSpace<U>`] divides time into `num_intervals` steps of `interval`
//! starting at `origin`. Positions are integer tick numbers `0..=num_intervals`;
//! any quantity of the same dimension as `U` can be converted into ticks.

use std::fmt::{self, Debug};

use qtty::{Quantity, Second, Unit};
use tracing::debug;

use super::{Space, SpaceId};
use crate::error::SpaceError;
use crate::order::Comparison;
use crate::position::Position;
use crate::size::Size;

/// Configuration of a [`TimeSpace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpaceConfig<U: Unit> {
    /// Length of one unit step.
    pub interval: Quantity<U>,
    /// Instant of tick 0.
    pub origin: Quantity<U>,
    /// Number of steps after the origin; the last tick is `num_intervals`.
    /// Must be below `i64::MAX` so the `num_intervals + 1` ticks fit a size.
    pub num_intervals: i64,
}

impl<U: Unit> Default for TimeSpaceConfig<U> {
    fn default() -> Self {
        Self {
            interval: Quantity::new(1.0),
            origin: Quantity::new(0.0),
            num_intervals: i64::MAX - 1,
        }
    }
}

impl TimeSpaceConfig<Second> {
    /// Nanosecond resolution, ~292 years.
    pub fn nanoseconds() -> Self {
        Self {
            interval: Quantity::new(1e-9),
            ..Self::default()
        }
    }

    /// 44.1 kHz audio samples, ~287 years.
    pub fn audio() -> Self {
        Self {
            interval: Quantity::new(1.0 / 44_100.0),
            origin: Quantity::new(0.0),
            num_intervals: 400_000_000_000_000,
        }
    }

    /// Beats at 120 bpm.
    pub fn music() -> Self {
        Self {
            interval: Quantity::new(60.0 / 120.0),
            origin: Quantity::new(0.0),
            num_intervals: 4_000_000_000_000_000_000,
        }
    }

    /// Video frames at 29.997 fps.
    pub fn video() -> Self {
        Self {
            interval: Quantity::new(1.0 / 29.997),
            origin: Quantity::new(0.0),
            num_intervals: 200_000_000_000,
        }
    }
}

/// Ticks `0..=num_intervals` of a timeline.
#[derive(Clone, Copy)]
pub struct TimeSpace<U: Unit> {
    id: SpaceId,
    interval: Quantity<U>,
    origin: Quantity<U>,
    num_intervals: i64,
}

impl<U: Unit> TimeSpace<U> {
    pub fn new(config: TimeSpaceConfig<U>) -> Result<Self, SpaceError> {
        let interval = config.interval.value();
        if !interval.is_finite() || interval <= 0.0 {
            return Err(SpaceError::InvalidInterval {
                interval: interval.to_string(),
            });
        }
        if !config.origin.value().is_finite() {
            return Err(SpaceError::InvalidOrigin {
                origin: config.origin.value().to_string(),
            });
        }
        if config.num_intervals < 0 {
            return Err(SpaceError::NegativeIntervalCount(config.num_intervals));
        }
        if config.num_intervals == i64::MAX {
            return Err(SpaceError::TooManyPositions {
                min: "0".to_string(),
                max: config.num_intervals.to_string(),
            });
        }
        let space = Self {
            id: SpaceId::generate(),
            interval: config.interval,
            origin: config.origin,
            num_intervals: config.num_intervals,
        };
        debug!(
            space = %space.id,
            interval,
            num_intervals = space.num_intervals,
            "created time space"
        );
        Ok(space)
    }

    pub fn interval(&self) -> Quantity<U> {
        self.interval
    }

    /// The instant of tick 0.
    pub fn origin_instant(&self) -> Quantity<U> {
        self.origin
    }

    pub fn num_intervals(&self) -> i64 {
        self.num_intervals
    }

    pub fn tick(&self, tick: i64) -> Position<Self> {
        self.position(tick)
    }

    /// Position of the tick nearest to `instant`, or out of bounds.
    pub fn tick_at<V>(&self, instant: Quantity<V>) -> Position<Self>
    where
        V: Unit<Dim = U::Dim>,
    {
        let instant: Quantity<U> = instant.to();
        let ticks = (instant.value() - self.origin.value()) / self.interval.value();
        match round_ticks(ticks) {
            Some(tick) => self.position(tick),
            None => self.out_of_bounds(),
        }
    }

    /// The instant a position stands for; `None` for foreign or
    /// out-of-bounds positions.
    pub fn instant_of(&self, position: &Position<Self>) -> Option<Quantity<U>> {
        if !position.space().same_space(self) {
            return None;
        }
        let tick = position.coord()?;
        Some(Quantity::new(
            self.origin.value() + tick as f64 * self.interval.value(),
        ))
    }

    /// The number of whole ticks nearest to `duration`; `none` if it
    /// cannot be represented.
    pub fn size_of<V>(&self, duration: Quantity<V>) -> Size<Self>
    where
        V: Unit<Dim = U::Dim>,
    {
        let duration: Quantity<U> = duration.to();
        let units = round_ticks(duration.value() / self.interval.value()).unwrap_or(0);
        self.size(units)
    }

    pub fn duration_of(&self, size: &Size<Self>) -> Quantity<U> {
        Quantity::new(size.units() as f64 * self.interval.value())
    }
}

fn round_ticks(value: f64) -> Option<i64> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

impl<U: Unit> Debug for TimeSpace<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSpace")
            .field("id", &self.id)
            .field("interval", &self.interval.value())
            .field("origin", &self.origin.value())
            .field("num_intervals", &self.num_intervals)
            .finish()
    }
}

impl<U: Unit> PartialEq for TimeSpace<U> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<U: Unit> Space for TimeSpace<U> {
    type Coord = i64;

    fn id(&self) -> SpaceId {
        self.id
    }

    fn min_coord(&self) -> i64 {
        0
    }

    fn max_coord(&self) -> i64 {
        self.num_intervals
    }

    fn compare_coords(&self, left: &i64, right: &i64) -> Comparison {
        left.cmp(right).into()
    }

    fn offset(&self, coord: &i64, steps: i64) -> Option<i64> {
        let moved = coord.checked_add(steps)?;
        (0..=self.num_intervals).contains(&moved).then_some(moved)
    }

    fn steps_between(&self, from: &i64, to: &i64) -> Option<i64> {
        to.checked_sub(*from)
    }
}

// =============================================================================
// TimeSpaceConfig Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for TimeSpaceConfig<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("TimeSpaceConfig", 3)?;
        s.serialize_field("interval", &self.interval.value())?;
        s.serialize_field("origin", &self.origin.value())?;
        s.serialize_field("num_intervals", &self.num_intervals)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for TimeSpaceConfig<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            interval: f64,
            origin: f64,
            num_intervals: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self {
            interval: Quantity::new(raw.interval),
            origin: Quantity::new(raw.origin),
            num_intervals: raw.num_intervals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Minute;

    fn quarter_hours() -> TimeSpace<Second> {
        TimeSpace::new(TimeSpaceConfig {
            interval: Quantity::new(900.0),
            origin: Quantity::new(0.0),
            num_intervals: 96,
        })
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_interval() {
        let err = TimeSpace::new(TimeSpaceConfig::<Second> {
            interval: Quantity::new(0.0),
            ..TimeSpaceConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, SpaceError::InvalidInterval { .. }));
    }

    #[test]
    fn rejects_negative_interval_count() {
        let err = TimeSpace::new(TimeSpaceConfig::<Second> {
            num_intervals: -1,
            ..TimeSpaceConfig::default()
        })
        .unwrap_err();
        assert_eq!(err, SpaceError::NegativeIntervalCount(-1));
    }

    #[test]
    fn rejects_non_finite_origin() {
        let err = TimeSpace::new(TimeSpaceConfig::<Second> {
            origin: Quantity::new(f64::INFINITY),
            ..TimeSpaceConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, SpaceError::InvalidOrigin { .. }));
    }

    #[test]
    fn rejects_more_ticks_than_a_size_counts() {
        let err = TimeSpace::new(TimeSpaceConfig::<Second> {
            num_intervals: i64::MAX,
            ..TimeSpaceConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, SpaceError::TooManyPositions { .. }));
    }

    #[test]
    fn nanosecond_timeline_size_is_exact() {
        let space = TimeSpace::new(TimeSpaceConfig::nanoseconds()).unwrap();
        assert_eq!(space.all().size().units(), i64::MAX);
        let halves = space.all().split(2);
        assert_eq!(halves.num_regions(), 2);
        assert_eq!(halves.size(), space.all().size());
        assert_eq!(halves.region(1).map(|r| r.end()), Some(space.max()));
    }

    #[test]
    fn presets_are_valid() {
        assert!(TimeSpace::new(TimeSpaceConfig::nanoseconds()).is_ok());
        assert!(TimeSpace::new(TimeSpaceConfig::audio()).is_ok());
        assert!(TimeSpace::new(TimeSpaceConfig::music()).is_ok());
        assert!(TimeSpace::new(TimeSpaceConfig::video()).is_ok());
    }

    #[test]
    fn tick_at_rounds_to_nearest_tick() {
        let space = quarter_hours();
        assert_eq!(space.tick_at(Quantity::<Second>::new(1000.0)), space.tick(1));
        assert_eq!(space.tick_at(Quantity::<Minute>::new(30.0)), space.tick(2));
        assert!(space.tick_at(Quantity::<Second>::new(-5000.0)).is_out_of_bounds());
        assert!(space.tick_at(Quantity::<Second>::new(1.0e9)).is_out_of_bounds());
    }

    #[test]
    fn instant_of_tick() {
        let space = quarter_hours();
        let instant = space.instant_of(&space.tick(4)).unwrap();
        assert!((instant.value() - 3600.0).abs() < 1e-9);
        assert_eq!(space.instant_of(&space.out_of_bounds()), None);
    }

    #[test]
    fn sizes_convert_between_units() {
        let space = quarter_hours();
        let size = space.size_of(Quantity::<Minute>::new(45.0));
        assert_eq!(size.units(), 3);
        let duration = space.duration_of(&size);
        assert!((duration.value() - 2700.0).abs() < 1e-9);
        assert_eq!(space.size_of(Quantity::<Second>::new(1.0)), space.none());
    }

    #[test]
    fn domain_bounds() {
        let space = quarter_hours();
        assert_eq!(space.min(), space.tick(0));
        assert_eq!(space.max(), space.tick(96));
        assert!(space.tick(97).is_out_of_bounds());
        assert_eq!(space.all().size().units(), 97);
    }

    #[test]
    fn spaces_with_same_config_are_distinct() {
        let a = quarter_hours();
        let b = quarter_hours();
        assert_ne!(a, b);
        assert!(a.region(&a.tick(0), &b.tick(4)).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_roundtrip() {
        let config = TimeSpaceConfig::<Second>::audio();
        let json = serde_json::to_string(&config).unwrap();
        let back: TimeSpaceConfig<Second> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
