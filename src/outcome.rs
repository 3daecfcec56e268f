//! Tagged success/failure result of bounded arithmetic.

use crate::error::RegionError;

/// The result of a bounded operation.
///
/// A failure still carries a usable value: the sentinel of the space the
/// operation ran in (out-of-bounds position, `none` size, empty region).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure { fallback: T, error: RegionError },
}

impl<T> Outcome<T> {
    pub fn failure(fallback: T, error: RegionError) -> Self {
        Outcome::Failure { fallback, error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The computed value, or the sentinel on failure.
    pub fn value(&self) -> &T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure { fallback, .. } => fallback,
        }
    }

    pub fn error(&self) -> Option<&RegionError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { error, .. } => Some(error),
        }
    }

    /// Consumes the outcome, returning the value or the sentinel.
    pub fn or_sentinel(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure { fallback, .. } => fallback,
        }
    }

    /// Consumes the outcome, returning the value or `default`.
    pub fn or(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure { .. } => default,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<T, RegionError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { error, .. } => Err(error),
        }
    }

    /// Maps both the value and the sentinel.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure { fallback, error } => Outcome::Failure {
                fallback: f(fallback),
                error,
            },
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, RegionError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> Outcome<i64> {
        Outcome::failure(0, RegionError::NoneSize { operation: "divide" })
    }

    #[test]
    fn success_accessors() {
        let o = Outcome::Success(5);
        assert!(o.is_success());
        assert_eq!(*o.value(), 5);
        assert_eq!(o.error(), None);
        assert_eq!(o.clone().ok(), Some(5));
        assert_eq!(o.into_result(), Ok(5));
    }

    #[test]
    fn failure_falls_back_to_sentinel() {
        let o = failed();
        assert!(o.is_failure());
        assert_eq!(*o.value(), 0);
        assert_eq!(o.clone().or_sentinel(), 0);
        assert_eq!(o.clone().or(9), 9);
        assert_eq!(o.clone().ok(), None);
        assert_eq!(
            o.into_result(),
            Err(RegionError::NoneSize { operation: "divide" })
        );
    }

    #[test]
    fn map_applies_to_fallback() {
        let o = failed().map(|v| v + 1);
        assert_eq!(*o.value(), 1);
        assert!(o.is_failure());
    }
}
