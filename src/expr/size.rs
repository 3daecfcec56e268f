use super::{out_of_bounds, space_mismatch};
use crate::error::RegionError;
use crate::outcome::Outcome;
use crate::region::Region;
use crate::size::Size;
use crate::space::Space;

/// Arithmetic on a size whose magnitude must not exceed the extent of
/// `bound`.
#[derive(Debug, Clone)]
pub struct SizeExpression<S: Space> {
    bound: Region<S>,
    current: Outcome<Size<S>>,
}

impl<S: Space> SizeExpression<S> {
    pub fn new(bound: Region<S>, size: Size<S>) -> Self {
        if !size.space().same_space(bound.space()) {
            let error = space_mismatch(&bound, size.space());
            return Self::failed(bound, error);
        }
        if size.units().unsigned_abs() > bound.extent_units().unsigned_abs() {
            let error = out_of_bounds(&size, &bound);
            return Self::failed(bound, error);
        }
        Self {
            bound,
            current: Outcome::Success(size),
        }
    }

    pub(crate) fn failed(bound: Region<S>, error: RegionError) -> Self {
        let fallback = bound.space().none();
        Self {
            bound,
            current: Outcome::failure(fallback, error),
        }
    }

    pub fn bound(&self) -> &Region<S> {
        &self.bound
    }

    pub fn outcome(&self) -> &Outcome<Size<S>> {
        &self.current
    }

    /// The resulting size, or `none`.
    pub fn size(&self) -> Outcome<Size<S>> {
        self.current.clone()
    }

    pub fn into_outcome(self) -> Outcome<Size<S>> {
        self.current
    }

    fn units(&self) -> Option<i64> {
        match &self.current {
            Outcome::Success(size) => Some(size.units()),
            Outcome::Failure { .. } => None,
        }
    }

    /// Applies `op` to this size and a same-space operand.
    fn combine<F>(&self, other: &Size<S>, symbol: &str, op: F) -> Self
    where
        F: FnOnce(i64, i64) -> Option<i64>,
    {
        let Some(units) = self.units() else {
            return self.clone();
        };
        if !other.space().same_space(self.bound.space()) {
            return Self::failed(self.bound.clone(), space_mismatch(&self.bound, other.space()));
        }
        self.with_units(op(units, other.units()), || {
            format!("{} {} {}", units, symbol, other)
        })
    }

    fn with_units(&self, units: Option<i64>, what: impl FnOnce() -> String) -> Self {
        match units {
            Some(units) => Self::new(self.bound.clone(), self.bound.space().size(units)),
            None => Self::failed(self.bound.clone(), out_of_bounds(what(), &self.bound)),
        }
    }

    fn none_divisor(&self, operation: &'static str) -> Self {
        Self::failed(self.bound.clone(), RegionError::NoneSize { operation })
    }

    pub fn add(&self, other: &Size<S>) -> Self {
        self.combine(other, "+", i64::checked_add)
    }

    pub fn subtract(&self, other: &Size<S>) -> Self {
        self.combine(other, "-", i64::checked_sub)
    }

    /// Scales by `factor`, rounding to the nearest unit.
    pub fn multiply(&self, factor: f64) -> Self {
        let Some(units) = self.units() else {
            return self.clone();
        };
        let product = (units as f64 * factor).round();
        let scaled = (product.is_finite()
            && product >= i64::MIN as f64
            && product < i64::MAX as f64)
            .then_some(product as i64);
        self.with_units(scaled, || format!("{} * {}", units, factor))
    }

    /// Integer division, truncating toward zero.
    pub fn divide(&self, divisor: i64) -> Self {
        let Some(units) = self.units() else {
            return self.clone();
        };
        if divisor == 0 {
            return self.none_divisor("divide");
        }
        self.with_units(units.checked_div(divisor), || {
            format!("{} / {}", units, divisor)
        })
    }

    pub fn modulo(&self, other: &Size<S>) -> Self {
        if self.units().is_some() && other.space().same_space(self.bound.space()) && other.is_none()
        {
            return self.none_divisor("modulo");
        }
        self.combine(other, "%", i64::checked_rem)
    }

    /// `self / other` as a real number; `None` when `other` is `none`,
    /// belongs to another space or this expression has failed.
    pub fn ratio(&self, other: &Size<S>) -> Option<f64> {
        let units = self.units()?;
        if !other.space().same_space(self.bound.space()) || other.is_none() {
            return None;
        }
        Some(units as f64 / other.units() as f64)
    }
}
