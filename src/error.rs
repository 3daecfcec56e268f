//! Error types for region arithmetic and space construction.

use thiserror::Error;

use crate::space::SpaceId;

/// A recoverable failure of bounded arithmetic or region algebra.
///
/// These never escape as panics: they travel inside
/// [`Outcome::Failure`](crate::outcome::Outcome) next to the sentinel value
/// the operation fell back to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("Operands belong to different spaces: {left} vs {right}")]
    SpaceMismatch { left: SpaceId, right: SpaceId },

    #[error("{value} falls outside the bounding region {bound}")]
    OutOfBounds { value: String, bound: String },

    #[error("Cannot compare {left} with {right}")]
    Incomparable { left: String, right: String },

    #[error("Cannot {operation} by a none size")]
    NoneSize { operation: &'static str },

    #[error("Cannot scale {region} to {size}")]
    Unscalable { region: String, size: String },
}

/// A construction-time contract violation.
///
/// Unlike [`RegionError`] this is fatal for the value being built: the
/// constructor returns it instead of a space or region.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpaceError {
    #[error("Space minimum {min} is greater than its maximum {max}")]
    InvalidBounds { min: String, max: String },

    #[error("Space [{min}, {max}] holds more positions than a size can count")]
    TooManyPositions { min: String, max: String },

    #[error("Time space interval must be positive and finite, got {interval}")]
    InvalidInterval { interval: String },

    #[error("Time space origin must be finite, got {origin}")]
    InvalidOrigin { origin: String },

    #[error("Time space needs a non-negative number of intervals, got {0}")]
    NegativeIntervalCount(i64),

    #[error("Record {start}..{end} is not a valid region of this space")]
    InvalidRecord { start: String, end: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_mismatch_display_names_both_spaces() {
        let left = SpaceId::from_u128(1);
        let right = SpaceId::from_u128(2);
        let e = RegionError::SpaceMismatch { left, right };
        let s = e.to_string();
        assert!(s.contains(&left.to_string()));
        assert!(s.contains(&right.to_string()));
    }

    #[test]
    fn out_of_bounds_display() {
        let e = RegionError::OutOfBounds {
            value: "12".to_string(),
            bound: "region:{0..9};".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "12 falls outside the bounding region region:{0..9};"
        );
    }

    #[test]
    fn none_size_display() {
        let e = RegionError::NoneSize { operation: "divide" };
        assert_eq!(e.to_string(), "Cannot divide by a none size");
    }

    #[test]
    fn invalid_bounds_display() {
        let e = SpaceError::InvalidBounds {
            min: "10".to_string(),
            max: "3".to_string(),
        };
        assert_eq!(e.to_string(), "Space minimum 10 is greater than its maximum 3");
    }

    #[test]
    fn too_many_positions_display() {
        let e = SpaceError::TooManyPositions {
            min: "0".to_string(),
            max: u64::MAX.to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Space [0, 18446744073709551615] holds more positions than a size can count"
        );
    }

    #[test]
    fn negative_interval_count_display() {
        let e = SpaceError::NegativeIntervalCount(-4);
        assert_eq!(
            e.to_string(),
            "Time space needs a non-negative number of intervals, got -4"
        );
    }

    #[test]
    fn error_equality() {
        let a = RegionError::NoneSize { operation: "modulo" };
        assert_eq!(a.clone(), a);
        assert_ne!(a, RegionError::NoneSize { operation: "divide" });
    }
}
