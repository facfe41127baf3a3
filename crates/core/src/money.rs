//! Money value object.
//!
//! Amounts are held in the smallest currency unit (e.g. cents), so a price
//! can never be negative or carry sub-cent precision.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A non-negative monetary amount in minor currency units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from minor units (e.g. cents).
    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Amount from whole major units (e.g. dollars).
    pub fn from_major(major: u64) -> Self {
        Self(major * 100)
    }

    pub fn minor(&self) -> u64 {
        self.0
    }

    /// Price after a fractional discount, rounded to the nearest minor unit.
    ///
    /// `fraction` must be within `[0, 1]`; the business ceiling on discounts
    /// is enforced by the caller, not here.
    pub fn discounted(self, fraction: f64) -> DomainResult<Money> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(DomainError::validation(format!(
                "discount fraction must be within [0, 1], got {fraction}"
            )));
        }
        let minor = (self.0 as f64 * (1.0 - fraction)).round() as u64;
        Ok(Self(minor))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_major_is_hundred_minor() {
        assert_eq!(Money::from_major(5500), Money::from_minor(550_000));
    }

    #[test]
    fn display_renders_two_decimals() {
        assert_eq!(Money::from_minor(385_000).to_string(), "$3850.00");
        assert_eq!(Money::from_minor(7).to_string(), "$0.07");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn discount_rounds_to_nearest_minor_unit() {
        // 9.99 * 0.5 = 4.995 -> 5.00
        assert_eq!(
            Money::from_minor(999).discounted(0.5).unwrap(),
            Money::from_minor(500)
        );
    }

    #[test]
    fn discount_of_zero_is_identity() {
        let price = Money::from_minor(12_345);
        assert_eq!(price.discounted(0.0).unwrap(), price);
    }

    #[test]
    fn discount_rejects_out_of_range_fractions() {
        let price = Money::from_major(100);
        assert!(price.discounted(-0.1).is_err());
        assert!(price.discounted(1.1).is_err());
        assert!(price.discounted(f64::NAN).is_err());
        assert!(price.discounted(f64::INFINITY).is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A valid discount never increases the price.
            #[test]
            fn discount_never_increases_price(
                minor in 0u64..1_000_000_000,
                fraction in 0.0f64..=1.0
            ) {
                let price = Money::from_minor(minor);
                let discounted = price.discounted(fraction).unwrap();
                prop_assert!(discounted <= price);
            }

            /// Discounting matches the rounded reference computation.
            #[test]
            fn discount_matches_reference_rounding(
                minor in 0u64..1_000_000_000,
                fraction in 0.0f64..=1.0
            ) {
                let price = Money::from_minor(minor);
                let discounted = price.discounted(fraction).unwrap();
                let expected = (minor as f64 * (1.0 - fraction)).round() as u64;
                prop_assert_eq!(discounted.minor(), expected);
            }
        }
    }
}
