//! Monetary values and discount rates.
//!
//! Money is stored in integer minor units (e.g. cents), never floats, so
//! totals and balances stay exact. Discount rates are basis points, which keeps
//! them hashable/comparable and makes rate arithmetic integer as well.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::{DomainError, DomainResult};

/// A monetary amount in minor currency units.
///
/// Signed: bulk price adjustments with a negative percentage can drive a price
/// below zero, and that result is representable rather than clamped.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor(&self) -> i64 {
        self.0
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Line total for `qty` units at this unit price. Fails with
    /// `InvariantViolation` when the product overflows the minor-unit range.
    pub fn multiply_quantity(&self, qty: i64) -> DomainResult<Self> {
        self.0
            .checked_mul(qty)
            .map(Self)
            .ok_or_else(|| DomainError::invariant("money amount overflows"))
    }

    /// Like [`Money::multiply_quantity`] but clamps at the range bounds.
    /// Used by reporting sums, where a clamped figure beats failing the
    /// whole report.
    pub const fn saturating_multiply_quantity(&self, qty: i64) -> Self {
        Self(self.0.saturating_mul(qty))
    }

    /// Scale by `(1 + percent / 100)`, rounding to the nearest minor unit.
    ///
    /// `percent` is unbounded; negative values shrink the amount and can cross
    /// zero.
    pub fn scale_by_percent(&self, percent: f64) -> Self {
        Self((self.0 as f64 * (1.0 + percent / 100.0)).round() as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// A customer-specific discount rate in basis points (100 bps = 1%).
///
/// Valid range is 0–100% (0–10_000 bps); construction rejects anything else.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    pub const ZERO: Self = Self(0);

    const MAX_BPS: u32 = 10_000;

    pub fn from_bps(bps: u32) -> DomainResult<Self> {
        if bps > Self::MAX_BPS {
            return Err(DomainError::validation(format!(
                "discount rate must be within 0-100% (got {bps} bps)"
            )));
        }
        Ok(Self(bps))
    }

    /// Convenience constructor from a percentage (e.g. `15.0` for 15%).
    pub fn from_percent(percent: f64) -> DomainResult<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DomainError::validation(format!(
                "discount rate must be within 0-100% (got {percent})"
            )));
        }
        Ok(Self((percent * 100.0).round() as u32))
    }

    pub const fn bps(&self) -> u32 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Discounted price for `base`. A zero rate returns `base` unchanged.
    pub fn apply_to(&self, base: Money) -> Money {
        if self.0 == 0 {
            return base;
        }
        let discount = (base.minor() as i128 * self.0 as i128) / Self::MAX_BPS as i128;
        Money::from_minor(base.minor() - discount as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn money_arithmetic() {
        let a = Money::from_minor(1_000);
        let b = Money::from_minor(250);

        assert_eq!((a + b).minor(), 1_250);
        assert_eq!((a - b).minor(), 750);
        assert_eq!(a.multiply_quantity(3).unwrap().minor(), 3_000);
        assert_eq!([a, b].into_iter().sum::<Money>().minor(), 1_250);
    }

    #[test]
    fn multiply_quantity_guards_against_overflow() {
        let huge = Money::from_minor(i64::MAX / 2);
        match huge.multiply_quantity(3) {
            Err(DomainError::InvariantViolation(_)) => {}
            other => panic!("Expected InvariantViolation error, got {other:?}"),
        }

        // The saturating variant clamps instead.
        assert_eq!(
            huge.saturating_multiply_quantity(3),
            Money::from_minor(i64::MAX)
        );
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_minor(85_000).to_string(), "850.00");
        assert_eq!(Money::from_minor(95_05).to_string(), "95.05");
        assert_eq!(Money::from_minor(-5_50).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn scale_by_percent_raises_and_lowers() {
        let price = Money::from_minor(10_000);
        assert_eq!(price.scale_by_percent(10.0).minor(), 11_000);
        assert_eq!(price.scale_by_percent(-10.0).minor(), 9_000);
        // Unbounded downward: crossing zero is representable.
        assert_eq!(price.scale_by_percent(-150.0).minor(), -5_000);
    }

    #[test]
    fn discount_rate_bounds() {
        assert!(DiscountRate::from_percent(0.0).is_ok());
        assert!(DiscountRate::from_percent(100.0).is_ok());

        for bad in [-1.0, 100.5, f64::NAN] {
            match DiscountRate::from_percent(bad) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn discount_applies_to_price() {
        let rate = DiscountRate::from_percent(20.0).unwrap();
        assert_eq!(rate.apply_to(Money::from_minor(10_000)).minor(), 8_000);

        // Zero rate leaves the base price unchanged.
        assert_eq!(
            DiscountRate::ZERO.apply_to(Money::from_minor(10_000)).minor(),
            10_000
        );
    }

    proptest! {
        /// Property: a valid discount never increases the price and never
        /// drives a non-negative price negative.
        #[test]
        fn discounted_price_stays_within_bounds(
            minor in 0i64..1_000_000_000i64,
            bps in 0u32..=10_000u32,
        ) {
            let rate = DiscountRate::from_bps(bps).unwrap();
            let discounted = rate.apply_to(Money::from_minor(minor));
            prop_assert!(discounted.minor() <= minor);
            prop_assert!(discounted.minor() >= 0);
        }
    }
}
